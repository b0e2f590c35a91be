//! Standalone preview binary — exercises one full photobooth event
//! without a host application.
//!
//! Renders the QR for a synthetic capture, runs the processing and
//! wait-screen hooks against a blank frame, and writes the composited
//! frame to a timestamped PNG in the current directory.
//!
//! Usage: `preview [config.json] [photo-path]`

use anyhow::Context;
use image::{Rgba, RgbaImage};
use tracing_subscriber::EnvFilter;

use booth_qrcode::{BoothHooks, CaptureContext, QrConfig, QrPlugin};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);

    let config: QrConfig = match args.next() {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config file {path}"))?
        }
        None => QrConfig {
            prefix_url: "https://photos.example.com/share/{picture}".into(),
            ..QrConfig::default()
        },
    };

    let plugin = QrPlugin::new(config)?;

    let picture = args.next().unwrap_or_else(|| "IMG_0001.jpg".into());
    let ctx = CaptureContext::new()
        .with_picture(picture)
        .with_counter("count", 1);

    plugin.photo_processed(&ctx);

    // 800x480 matches the common booth touchscreen.
    let mut frame = RgbaImage::from_pixel(800, 480, Rgba([32, 32, 32, 255]));
    plugin.wait_screen(&ctx, &mut frame);

    let out = format!(
        "preview_{}.png",
        chrono::Local::now().format("%Y-%m-%d-%H-%M-%S")
    );
    frame.save(&out).with_context(|| format!("writing {out}"))?;
    tracing::info!(file = %out, "Preview frame written");

    Ok(())
}
