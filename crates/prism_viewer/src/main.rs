use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use prism_renderer::RenderedFrame;

mod camera_controller;
mod replay;
mod settings;

use replay::Replay;
use settings::ViewerSettings;

/// Write a frame as `frame_NNNN.png` in `dir`.
fn save_frame(frame: &RenderedFrame, dir: &Path) -> Result<PathBuf> {
    let image = &frame.image;
    let path = dir.join(format!("frame_{:04}.png", frame.index));

    let buffer = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba8())
        .context("Frame buffer does not match its size")?;
    buffer
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Prism Viewer");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = ViewerSettings::load_or_default(settings_path.as_deref())?;

    std::fs::create_dir_all(&settings.output_dir)
        .with_context(|| format!("Failed to create {}", settings.output_dir.display()))?;

    log::info!(
        "Replaying {} input steps at {}x{}",
        settings.steps.len(),
        settings.width,
        settings.height
    );

    let mut replay = Replay::new(&settings);
    let frames = replay.run(&settings.steps, |frame| {
        let path = save_frame(frame, &settings.output_dir)?;
        log::info!("Frame {} ({:.2?}) -> {}", frame.index, frame.elapsed, path.display());
        Ok(())
    })?;

    log::info!("Rendered {} frames", frames);

    Ok(())
}
