//! Prism renderer - analytic sphere ray tracing
//!
//! Shades a fixed five-sphere scene one pixel at a time: nearest-hit
//! intersection, soft shadows with ambient occlusion, sun lighting, a
//! bounded reflection pass, sky, fog and tone mapping. Frames are rendered
//! in parallel buckets and only when the view changed.

mod bucket;
mod camera;
mod compositor;
mod frame;
mod hittable;
mod lighting;
mod reflection;
mod renderer;
mod shadow;
mod sky;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{viewport_coord, Camera};
pub use compositor::{apply_fog, blend_reflection, finalize, fog_amount, gamma_encode, tone_map};
pub use frame::{FrameScheduler, RenderedFrame};
pub use hittable::{nearest_hit, HitRecord, Hittable};
pub use lighting::direct_lighting;
pub use reflection::trace_reflection;
pub use renderer::{color_to_rgba, render, trace_radiance, FrameContext, ImageBuffer};
pub use shadow::{ao_sample_direction, shadow_factor, SHADOW_RANGE};
pub use sky::sky_color;

/// Re-export the scene types the renderer is driven with
pub use prism_core::{Color, Material, Scene, ShadingConfig, Sphere};
pub use prism_math::{Interval, Ray, Vec2, Vec3, Vec4};
