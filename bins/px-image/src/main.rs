//! px-image: CLI tool for image classification, inspection, and decoding.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use pixelpipe_image::{
    classify_path, detect_format, extract_metadata, has_supported_extension, Image,
    ImageColorType, PathClass,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "px-image")]
#[command(about = "Image classification and decoding CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Rgb,
    Bgr,
    Gray,
}

impl From<ColorArg> for ImageColorType {
    fn from(color: ColorArg) -> Self {
        match color {
            ColorArg::Rgb => ImageColorType::Rgb,
            ColorArg::Bgr => ImageColorType::Bgr,
            ColorArg::Gray => ImageColorType::Gray,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a path by file name, without reading the file
    Classify {
        /// Path to check
        path: PathBuf,
    },
    /// Detect image format from file contents
    Detect {
        /// Path to image file
        path: PathBuf,
    },
    /// Read the image shape from the header without decoding
    Shape {
        /// Path to image file
        path: PathBuf,
        /// Output color type used for the channel count
        #[arg(long, value_enum, default_value = "rgb")]
        color: ColorArg,
    },
    /// Extract metadata from an image
    Metadata {
        /// Path to image file
        path: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode an image to raw pixels
    Decode {
        /// Path to image file
        path: PathBuf,
        /// Output color type
        #[arg(long, value_enum, default_value = "rgb")]
        color: ColorArg,
        /// Write the raw pixel bytes to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Analyze images in a directory
    Analyze {
        /// Directory to analyze
        path: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { path } => {
            let raw = path.to_string_lossy();
            let supported = has_supported_extension(&raw);
            match classify_path(&raw) {
                PathClass::Supported => println!("{}: supported", raw),
                PathClass::Skipped => println!("{}: skipped", raw),
                PathClass::Unknown => println!("{}: unsupported", raw),
            }
            if !supported {
                std::process::exit(1);
            }
        }

        Commands::Detect { path } => {
            let data = std::fs::read(&path)?;
            match detect_format(&data) {
                Ok(format) => {
                    println!("Format: {:?}", format);
                    println!("MIME: {}", format.mime_type());
                    println!("Extensions: {:?}", format.extensions());
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Shape { path, color } => {
            let data = std::fs::read(&path)?;
            let img = Image::new(&data, color.into())?;
            let shape = img.peek_shape()?;
            println!("Format: {:?}", img.format());
            println!("Shape: {}", shape);
        }

        Commands::Metadata { path, json } => {
            let data = std::fs::read(&path)?;
            match extract_metadata(&data) {
                Some(meta) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&meta)?);
                    } else {
                        println!("Format: {:?}", meta.format);
                        println!("Dimensions: {}x{}", meta.width, meta.height);
                        println!("Channels: {}", meta.channels);
                        println!("Aspect Ratio: {:.2}", meta.aspect_ratio());
                        println!("Size: {} bytes", meta.size_bytes);
                        println!(
                            "Orientation: {}",
                            if meta.is_landscape() {
                                "Landscape"
                            } else if meta.is_portrait() {
                                "Portrait"
                            } else {
                                "Square"
                            }
                        );
                    }
                }
                None => {
                    eprintln!("Could not extract metadata");
                    std::process::exit(1);
                }
            }
        }

        Commands::Decode { path, color, output } => {
            let data = std::fs::read(&path)?;
            let mut img = Image::new(&data, color.into())?;
            img.decode()?;
            let shape = img.shape()?;
            let pixels = img.pixels()?;
            println!("Format: {:?}", img.format());
            println!("Shape: {}", shape);
            println!("Decoded: {} bytes", pixels.len());
            if let Some(output) = output {
                std::fs::write(&output, &pixels[..])?;
                println!("Wrote {}", output.display());
            }
        }

        Commands::Analyze { path, json } => {
            let entries: Vec<_> = WalkDir::new(&path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .collect();

            let pb = ProgressBar::new(entries.len() as u64);
            pb.set_style(ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("#>-"));

            let mut results = Vec::new();
            let mut skipped = 0usize;
            let mut unsupported = 0usize;
            for entry in entries {
                pb.inc(1);
                let raw = entry.path().to_string_lossy().into_owned();
                match classify_path(&raw) {
                    PathClass::Skipped => {
                        skipped += 1;
                        continue;
                    }
                    PathClass::Unknown => {
                        has_supported_extension(&raw);
                        unsupported += 1;
                        continue;
                    }
                    PathClass::Supported => {}
                }
                if let Ok(data) = std::fs::read(entry.path()) {
                    if let Some(meta) = extract_metadata(&data) {
                        results.push(serde_json::json!({
                            "path": raw,
                            "format": meta.format,
                            "width": meta.width,
                            "height": meta.height,
                            "channels": meta.channels,
                            "size_bytes": meta.size_bytes,
                        }));
                    }
                }
            }
            pb.finish_with_message("Done");

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("\nFound {} images", results.len());
                println!("{} files skipped, {} unsupported", skipped, unsupported);
            }
        }
    }

    Ok(())
}
