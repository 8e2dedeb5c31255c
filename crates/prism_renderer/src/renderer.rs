//! Per-pixel shading and full-frame rendering.
//!
//! Every pixel is a pure function of the camera snapshot, the scene, the
//! shading configuration and the pixel coordinate. Frames are split into
//! buckets that rayon renders in parallel; no pixel depends on another.

use std::time::Instant;

use prism_core::{Color, Scene, ShadingConfig};
use prism_math::{Interval, Ray, Vec4};
use rayon::prelude::*;

use crate::{
    bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE},
    camera::{viewport_coord, Camera},
    compositor::{apply_fog, blend_reflection, finalize},
    hittable::nearest_hit,
    lighting::direct_lighting,
    reflection::trace_reflection,
    sky::sky_color,
};

/// Linear radiance seen along `ray`, before tone mapping.
///
/// Rays that miss every sphere return the sky color untouched.
pub fn trace_radiance(ray: &Ray, scene: &Scene, config: &ShadingConfig) -> Color {
    let sky = sky_color(config, ray.direction());

    let Some(rec) = nearest_hit(scene, ray, Interval::above(config.min_ray_distance)) else {
        return sky;
    };

    let material = rec.material;
    let mut color = direct_lighting(scene, config, rec.p, rec.normal, -ray.direction(), material);

    if material.is_reflective() {
        let reflected =
            trace_reflection(scene, config, ray.direction(), rec.p, rec.normal, material);
        color = blend_reflection(color, reflected, material);
    }

    apply_fog(config, color, sky, rec.t)
}

/// Everything needed to evaluate one frame.
///
/// Holds the camera by value so the whole frame is shaded from one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub camera: Camera,
    pub scene: &'a Scene,
    pub config: &'a ShadingConfig,
    pub width: u32,
    pub height: u32,
}

impl<'a> FrameContext<'a> {
    /// Create a new frame context.
    pub fn new(
        camera: Camera,
        scene: &'a Scene,
        config: &'a ShadingConfig,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            camera,
            scene,
            config,
            width,
            height,
        }
    }

    /// Display color of pixel (x, y), alpha always 1.
    pub fn render_pixel(&self, x: u32, y: u32) -> Vec4 {
        let p = viewport_coord(x, y, self.width, self.height);
        let ray = self.camera.get_ray(p);
        finalize(trace_radiance(&ray, self.scene, self.config))
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a display color to 8-bit RGBA.
pub fn color_to_rgba(color: Vec4) -> [u8; 4] {
    let to_byte = |c: f32| (255.0 * clamp_01(c) + 0.5) as u8;
    [
        to_byte(color.x),
        to_byte(color.y),
        to_byte(color.z),
        to_byte(color.w),
    ]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec4>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::W; width as usize * height as usize],
        }
    }

    /// Offset of pixel (x, y) in `pixels`.
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Vec4) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let i = i as u32;
            self.set(bucket.x + i % bucket.width, bucket.y + i / bucket.width, *color);
        }
    }

    /// Convert to tightly packed RGBA8 bytes, row-major from the top.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let rgba: Vec<[u8; 4]> = self.pixels.iter().map(|c| color_to_rgba(*c)).collect();
        bytemuck::cast_slice(&rgba).to_vec()
    }
}

/// Render the entire frame to an image buffer.
///
/// Buckets are rendered in parallel on the rayon pool.
pub fn render(frame: &FrameContext) -> ImageBuffer {
    let start = Instant::now();
    let buckets = generate_buckets(frame.width, frame.height, DEFAULT_BUCKET_SIZE);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, frame)))
        .collect();

    let mut image = ImageBuffer::new(frame.width, frame.height);
    for result in &results {
        image.write_bucket(result);
    }

    log::debug!(
        "Rendered {}x{} frame in {} buckets ({:?})",
        frame.width,
        frame.height,
        results.len(),
        start.elapsed()
    );

    image
}
