//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon. Bucket coordinates are pixel
//! coordinates, so `y` grows upward like [`Renderer::pixel_color`].
//!
//! [`Renderer::pixel_color`]: crate::Renderer::pixel_color

use rand::RngCore;

use crate::error::{RenderError, RenderResult};
use crate::{ImageBuffer, Sampler, Tracer};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of the bucket's first column
    pub x: u32,
    /// Y coordinate of the bucket's first (lowest) row
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets closer to the center come first, so a progressive display shows
/// the most important part of the image early.
///
/// A zero `bucket_size` yields no buckets.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    if bucket_size == 0 {
        return buckets;
    }

    let mut index = 0;

    // Generate grid of buckets
    for y in (0..height).step_by(bucket_size as usize) {
        for x in (0..width).step_by(bucket_size as usize) {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
        }
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center (spiral order).
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let dist_sq = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    // Stable sort keeps row-major order among equidistant buckets
    buckets.sort_by(|a, b| dist_sq(a).total_cmp(&dist_sq(b)));
}

/// Render a single bucket.
///
/// Returns pixels in row-major order within the bucket, bottom row first.
pub fn render_bucket<R: RngCore>(
    bucket: &Bucket,
    tracer: &Tracer,
    sampler: &mut Sampler<R>,
) -> RenderResult<BucketResult> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let rgb = tracer.pixel_color(bucket.x + local_x, bucket.y + local_y, sampler)?;
            pixels.push(rgb);
        }
    }

    Ok(BucketResult::new(*bucket, pixels))
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order, bottom row first
    pub pixels: Vec<[u8; 3]>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<[u8; 3]>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the pixels into a top-left based image.
    pub fn write_to(&self, image: &mut ImageBuffer) -> RenderResult<()> {
        let b = &self.bucket;
        for (i, rgb) in self.pixels.iter().enumerate() {
            let x = b.x + i as u32 % b.width;
            let y = b.y + i as u32 / b.width;
            let row = image.height.checked_sub(y + 1).ok_or(RenderError::PixelOutOfBounds {
                x,
                y,
                width: image.width,
                height: image.height,
            })?;
            image.set(x, row, *rgb)?;
        }
        Ok(())
    }
}
