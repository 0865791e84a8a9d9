use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use sticker_core::{image_file, init, Config, ImageFile, StickerMaker, StickerStyle};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image to convert into a sticker; omit to launch the window
    input: Option<PathBuf>,

    /// Sticker style: redraw (cartoon) or stickerify (keep original)
    #[arg(short, long, default_value_t = StickerStyle::Redraw)]
    style: StickerStyle,

    /// Override the model defined in .env
    #[arg(short, long)]
    model: Option<String>,

    /// Where to save the generated sticker (headless mode)
    #[arg(short, long, default_value = image_file::DOWNLOAD_FILE_NAME)]
    output: PathBuf,

    /// Open the window even when an input image is given
    #[arg(long, default_value_t = false)]
    gui: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup
    let _ = dotenvy::dotenv();
    init();
    let args = Args::parse();

    // Load config and override model if specified via CLI
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(m) = args.model {
        config.model_name = m;
        config.model_overridden = true;
    }

    let app = StickerMaker::with_config(config);

    // Decode the input image, if any
    let image = match &args.input {
        Some(path) => {
            let image = ImageFile::from_path(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            match image {
                Some(image) => Some(image),
                None => bail!(
                    "{} is not an image file (expected png, jpg, webp, gif or bmp)",
                    path.display()
                ),
            }
        }
        None => None,
    };

    // No input, or explicitly asked for the window: run interactive
    let Some(image) = image else {
        return app
            .run_interactive(None)
            .context("Failed to run the sticker maker window");
    };
    if args.gui {
        return app
            .run_interactive(Some(image))
            .context("Failed to run the sticker maker window");
    }

    // Headless: one generate-and-save cycle
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.green} {msg}")?,
    );
    spinner.set_message(format!(
        "Generating {} sticker from {}...",
        args.style, image.name
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = app.generate(&image, args.style).await;

    spinner.finish_and_clear();

    let sticker = result.context("Sticker generation failed")?;
    let bytes = sticker.to_bytes().context("Model returned invalid image data")?;

    std::fs::write(&args.output, bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Saved sticker to {}", args.output.display());
    Ok(())
}
