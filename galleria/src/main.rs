pub mod catalog;
pub mod source;

use clap::{Parser, Subcommand};
use colored::Colorize;
use dominant::{Batch, BatchOptions, DominantColor, extract_image, sort_by_color};
use eyre::{Result, ensure};
use image::ImageReader;
use log::debug;

use std::path::{Path, PathBuf};
use std::time::Duration;

use catalog::{Artwork, FileCatalog};
use source::FileImageSource;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Artwork catalog
    #[arg(short, long, default_value = "catalog.toml")]
    catalog: PathBuf,
    /// Base directory for relative image references [default: the catalog's directory]
    #[arg(short, long)]
    images: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Extract dominant colors for artworks that have none and print a JSON summary
    Extract {
        /// Artworks processed at once
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,
        /// Extra attempts after a failed read or write
        #[arg(short, long, default_value_t = 0)]
        retries: u32,
        /// Seconds to wait for one image
        #[arg(long, default_value_t = 30)]
        fetch_timeout: u64,
    },
    /// List artworks sorted by dominant color
    Gallery {
        /// Print JSON instead of swatches
        #[arg(long)]
        json: bool,
    },
    /// Print the dominant color of a single image file
    Inspect { file: PathBuf },
}

fn swatch(color: Option<&DominantColor>) -> String {
    match color {
        Some(c) => {
            let hex = c.to_hex();
            format!(
                "{} #{:02X}{:02X}{:02X}",
                "    ".on_truecolor(hex.r, hex.g, hex.b),
                hex.r,
                hex.g,
                hex.b
            )
        }
        None => format!("     {}", "-------".dimmed()),
    }
}

fn extract(args: &Args, options: BatchOptions, fetch_timeout: Duration) -> Result<()> {
    let catalog = FileCatalog::open(&args.catalog)?;
    let images = args.images.clone().unwrap_or_else(|| {
        catalog
            .path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });
    debug!("resolving images against {}", images.display());
    let source = FileImageSource::new(&images, fetch_timeout);
    let summary = Batch::new(&source, &catalog).options(options).run()?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn gallery(args: &Args, json: bool) -> Result<()> {
    let mut artworks: Vec<Artwork> = FileCatalog::open(&args.catalog)?.artworks()?;
    sort_by_color(&mut artworks, |a| a.color.as_ref());
    if json {
        println!("{}", serde_json::to_string_pretty(&artworks)?);
        return Ok(());
    }
    for artwork in &artworks {
        println!(
            "{} {} {}",
            swatch(artwork.color.as_ref()),
            artwork.title.bold(),
            format!("({})", artwork.id).dimmed()
        );
    }
    Ok(())
}

fn inspect(file: &Path) -> Result<()> {
    let image = ImageReader::open(file)?.with_guessed_format()?.decode()?;
    debug!(
        "{}: decoded {}x{} image",
        file.display(),
        image.width(),
        image.height()
    );
    let color = extract_image(&image);
    println!("{} {}", swatch(Some(&color)), serde_json::to_string(&color)?);
    Ok(())
}

fn main() -> Result<()> {
    pretty_env_logger::init_custom_env("GALLERIA_LOG");
    let args = Args::parse();
    debug!("Arguments: {:?}", &args);
    match &args.command {
        Command::Extract {
            jobs,
            retries,
            fetch_timeout,
        } => {
            ensure!(*fetch_timeout > 0, "fetch timeout must be at least one second");
            let options = BatchOptions {
                jobs: *jobs,
                retries: *retries,
            };
            extract(&args, options, Duration::from_secs(*fetch_timeout))
        }
        Command::Gallery { json } => gallery(&args, *json),
        Command::Inspect { file } => inspect(file),
    }
}

#[cfg(test)]
/// Shared helpers for unit tests.
pub(crate) mod test {
    use std::path::{Path, PathBuf};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use dominant::{Batch, BatchOptions, CatalogStore, DominantColor};
    use image::{ImageFormat, Rgb, RgbImage};

    use crate::catalog::FileCatalog;
    use crate::catalog::test::DUMMY_CATALOG;
    use crate::source::FileImageSource;

    /// Scratch directory for one test, deleted on drop.
    pub(crate) struct TempDir {
        path: PathBuf,
    }

    impl TempDir {
        pub(crate) fn new(name: &str) -> Self {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default();
            let path = std::env::temp_dir()
                .join(format!("galleria-{name}-{}-{nanos}", std::process::id()));
            std::fs::create_dir_all(&path).unwrap();
            Self { path }
        }

        pub(crate) fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    /// Named pipe with no writer: opening it for reading blocks.
    #[cfg(unix)]
    pub(crate) fn make_fifo(path: &Path) {
        let status = std::process::Command::new("mkfifo")
            .arg(path)
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_extract_into_catalog() {
        let tmp = TempDir::new("extract");
        let base = tmp.path();
        let catalog_path = base.join("catalog.toml");
        std::fs::write(&catalog_path, DUMMY_CATALOG).unwrap();
        RgbImage::from_pixel(40, 20, Rgb([0x33, 0x66, 0x99]))
            .save_with_format(base.join("harbour.png"), ImageFormat::Png)
            .unwrap();

        let catalog = FileCatalog::open(&catalog_path).unwrap();
        let source = FileImageSource::new(base, Duration::from_secs(5));
        let summary = Batch::new(&source, &catalog)
            .options(BatchOptions {
                jobs: 2,
                retries: 1,
            })
            .run()
            .unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.results[0].id, "a-001");
        assert_eq!(
            summary.results[0].color,
            Some(DominantColor::chromatic(210, 50, 40))
        );
        assert_eq!(
            summary.results[1].error.as_deref(),
            Some("artwork has no image")
        );

        let reopened = FileCatalog::open(&catalog_path).unwrap();
        let missing = reopened.list_missing_descriptor().unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].id, "a-002");
    }

    #[cfg(unix)]
    #[test]
    fn test_stalled_image_does_not_block_batch() {
        let tmp = TempDir::new("stalled");
        let base = tmp.path();
        let catalog_path = base.join("catalog.toml");
        std::fs::write(
            &catalog_path,
            r#"
            [[artworks]]
            id = "stalled"
            title = "Stalled"
            image = "stalled.png"

            [[artworks]]
            id = "fine"
            title = "Fine"
            image = "fine.png"
            "#,
        )
        .unwrap();
        make_fifo(&base.join("stalled.png"));
        RgbImage::from_pixel(8, 8, Rgb([255, 0, 0]))
            .save_with_format(base.join("fine.png"), ImageFormat::Png)
            .unwrap();

        let catalog = FileCatalog::open(&catalog_path).unwrap();
        let source = FileImageSource::new(base, Duration::from_millis(100));
        let summary = Batch::new(&source, &catalog).run().unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.processed, 1);
        assert!(!summary.results[0].success);
        assert!(
            summary.results[0]
                .error
                .as_ref()
                .unwrap()
                .starts_with("timed out fetching image stalled.png")
        );
        assert!(summary.results[1].success);
        assert_eq!(
            summary.results[1].color,
            Some(DominantColor::chromatic(0, 100, 50))
        );
    }

    #[test]
    fn test_catalog_defaults() {
        use clap::Parser;

        let args = crate::Args::try_parse_from(["galleria", "gallery"]).unwrap();
        assert_eq!(args.catalog, PathBuf::from("catalog.toml"));
        assert!(args.images.is_none());
        let args =
            crate::Args::try_parse_from(["galleria", "-c", "art/list.toml", "extract", "-j", "4"])
                .unwrap();
        assert_eq!(args.catalog, PathBuf::from("art/list.toml"));
        assert!(matches!(args.command, crate::Command::Extract { jobs: 4, .. }));
    }
}
