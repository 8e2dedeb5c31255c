//! Still frame example.
//!
//! Renders the default scene from the default camera and saves it as PPM.

use prism_renderer::{
    color_to_rgba, render, Camera, FrameContext, ImageBuffer, Scene, ShadingConfig,
};
use std::fs::File;
use std::io::{BufWriter, Write};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn main() -> std::io::Result<()> {
    println!("Prism - Still Frame Example");
    println!("===========================");

    let scene = Scene::default();
    let config = ShadingConfig::default();
    let camera = Camera::default().with_viewport(WIDTH, HEIGHT);
    let frame = FrameContext::new(camera, &scene, &config, WIDTH, HEIGHT);

    println!("Rendering {}x{}...", WIDTH, HEIGHT);

    let start = std::time::Instant::now();
    let image = render(&frame);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let rgba = color_to_rgba(image.get(x, y));
            writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
        }
    }

    writer.flush()
}
