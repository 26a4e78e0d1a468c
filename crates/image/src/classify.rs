//! Path-based classification of encoded image files.
//!
//! Decoding is gated on the file name alone; content sniffing happens later
//! in [`crate::detect_format`]. Both tables below are fixed at process start
//! and read-only for the life of the process.

use tracing::warn;

/// Extensions the decoder understands, in diagnostic order.
pub const KNOWN_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp"];

/// File paths skipped without a warning.
///
/// Matched whole-string and case-sensitive against the raw path, so
/// `Folder.jpg` is skipped while `folder.jpg` still classifies by suffix.
pub const SKIP_PATHS: &[&str] = &[
    "Thumbs.db",
    "thumbs.db",
    "Folder.jpg",
    "AlbumArtSmall.jpg",
    ".DS_Store",
    "desktop.ini",
];

/// How a path fared against the extension tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Ends with a supported extension.
    Supported,
    /// Present verbatim in the skip table.
    Skipped,
    /// Neither supported nor skipped.
    Unknown,
}

/// Comma-separated listing of every supported extension, in table order.
///
/// Used verbatim in diagnostics.
pub fn supported_extensions_list() -> String {
    KNOWN_EXTENSIONS.join(", ")
}

/// Classify a path against the skip and known tables.
///
/// The skip table is consulted first, against the raw path; the known table
/// is then matched as a case-insensitive suffix of the full path.
pub fn classify_path(path: &str) -> PathClass {
    if SKIP_PATHS.iter().any(|skip| *skip == path) {
        return PathClass::Skipped;
    }
    let path_low = path.to_ascii_lowercase();
    if KNOWN_EXTENSIONS.iter().any(|ext| path_low.ends_with(ext)) {
        return PathClass::Supported;
    }
    PathClass::Unknown
}

/// Whether `path` names a file the decoder can handle, judged by suffix only.
///
/// Skipped paths return `false` silently; an unrecognized extension returns
/// `false` and logs one warning naming the path and the supported set.
///
/// # Example
/// ```
/// use pixelpipe_image::has_supported_extension;
///
/// assert!(has_supported_extension("photos/IMG_2041.JPG"));
/// assert!(!has_supported_extension("Thumbs.db"));
/// ```
pub fn has_supported_extension(path: &str) -> bool {
    match classify_path(path) {
        PathClass::Supported => true,
        PathClass::Skipped => false,
        PathClass::Unknown => {
            warn!(
                "file {} has an extension the decoder does not support; supported extensions: {}",
                path,
                supported_extensions_list()
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::span;

    #[derive(Clone)]
    struct WarnCapture(Arc<Mutex<Vec<String>>>);

    impl tracing::Subscriber for WarnCapture {
        fn enabled(&self, metadata: &tracing::Metadata<'_>) -> bool {
            *metadata.level() == tracing::Level::WARN
        }

        fn new_span(&self, _: &span::Attributes<'_>) -> span::Id {
            span::Id::from_u64(1)
        }

        fn record(&self, _: &span::Id, _: &span::Record<'_>) {}

        fn record_follows_from(&self, _: &span::Id, _: &span::Id) {}

        fn event(&self, event: &tracing::Event<'_>) {
            struct Message(String);

            impl tracing::field::Visit for Message {
                fn record_debug(
                    &mut self,
                    field: &tracing::field::Field,
                    value: &dyn std::fmt::Debug,
                ) {
                    if field.name() == "message" {
                        self.0 = format!("{value:?}");
                    }
                }
            }

            let mut message = Message(String::new());
            event.record(&mut message);
            self.0.lock().unwrap().push(message.0);
        }

        fn enter(&self, _: &span::Id) {}

        fn exit(&self, _: &span::Id) {}
    }

    fn capture_warnings(f: impl FnOnce()) -> Vec<String> {
        let capture = WarnCapture(Arc::new(Mutex::new(Vec::new())));
        tracing::subscriber::with_default(capture.clone(), f);
        let warnings = capture.0.lock().unwrap();
        warnings.clone()
    }

    #[test]
    fn known_extensions_match_any_case() {
        for ext in KNOWN_EXTENSIONS {
            assert!(has_supported_extension(&format!("x{ext}")));
            assert!(has_supported_extension(&format!(
                "x{}",
                ext.to_ascii_uppercase()
            )));
        }
        assert!(has_supported_extension("photo.JPG"));
        assert!(has_supported_extension("scans/receipt.JpEg"));
    }

    #[test]
    fn skip_paths_are_silently_rejected() {
        for path in SKIP_PATHS {
            assert_eq!(classify_path(path), PathClass::Skipped);
            let warnings = capture_warnings(|| {
                assert!(!has_supported_extension(path));
            });
            assert!(warnings.is_empty());
        }
    }

    #[test]
    fn skip_match_is_exact_and_case_sensitive() {
        // Verbatim skip entry wins over its known extension
        assert_eq!(classify_path("Folder.jpg"), PathClass::Skipped);
        // The lower-cased variant is not in the skip table
        assert_eq!(classify_path("folder.jpg"), PathClass::Supported);
        // Skip entries never match as suffixes
        assert_eq!(classify_path("photos/Thumbs.db"), PathClass::Unknown);
    }

    #[test]
    fn unknown_extension_warns_exactly_once() {
        let warnings = capture_warnings(|| {
            assert!(!has_supported_extension("readme.txt"));
        });
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("readme.txt"));
        for ext in KNOWN_EXTENSIONS {
            assert!(warnings[0].contains(ext));
        }
    }

    #[test]
    fn supported_listing_preserves_order() {
        let listing = supported_extensions_list();
        assert!(!listing.ends_with(", "));
        let parts: Vec<&str> = listing.split(", ").collect();
        assert_eq!(parts, KNOWN_EXTENSIONS);
    }

    #[test]
    fn extension_must_anchor_at_end() {
        let warnings = capture_warnings(|| {
            assert!(!has_supported_extension("archive.png.bak"));
        });
        assert_eq!(warnings.len(), 1);
    }
}
