//! Rendered image storage and file output.

use std::path::Path;

use image::RgbImage;

use crate::error::{RenderError, RenderResult};

/// 8-bit RGB image, row-major with the origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    ///
    /// Fails when the RGB byte count does not fit in memory addressing.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let too_large = || RenderError::ImageTooLarge { width, height };

        let pixel_count = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(too_large)?;
        let byte_count = pixel_count.checked_mul(3).ok_or_else(too_large)?;
        if byte_count > isize::MAX as usize {
            return Err(too_large());
        }

        Ok(Self {
            width,
            height,
            pixels: vec![[0, 0, 0]; pixel_count],
        })
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the pixel at (x, y), or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) -> RenderResult<()> {
        let i = self.index(x, y).ok_or(RenderError::PixelOutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.pixels[i] = rgb;
        Ok(())
    }

    /// Flatten to `RGBRGB...` bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Convert to an `image` crate buffer.
    pub fn to_image(&self) -> RenderResult<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.to_rgb_bytes()).ok_or(
            RenderError::ImageTooLarge {
                width: self.width,
                height: self.height,
            },
        )
    }

    /// Save to disk. The format follows the file extension (png, ppm, ...).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_image()?.save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut image = ImageBuffer::new(3, 2).unwrap();
        image.set(2, 1, [10, 20, 30]).unwrap();
        assert_eq!(image.get(2, 1), Some([10, 20, 30]));
        assert_eq!(image.get(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut image = ImageBuffer::new(2, 2).unwrap();

        // x past the row end must not wrap into the next row
        assert_eq!(image.get(3, 0), None);
        assert_eq!(image.get(0, 2), None);
        assert!(matches!(
            image.set(2, 0, [1, 1, 1]),
            Err(RenderError::PixelOutOfBounds { x: 2, y: 0, width: 2, height: 2 })
        ));
        assert!(image.pixels.iter().all(|p| *p == [0, 0, 0]));
    }

    #[test]
    fn test_oversized_image_rejected() {
        assert!(matches!(
            ImageBuffer::new(u32::MAX, u32::MAX),
            Err(RenderError::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn test_large_dimensions_index_without_overflow() {
        // 65536 * 65536 overflows u32; a one-row buffer keeps the test small
        let mut image = ImageBuffer::new(65536, 1).unwrap();
        image.set(65535, 0, [7, 8, 9]).unwrap();
        assert_eq!(image.get(65535, 0), Some([7, 8, 9]));
        assert_eq!(image.get(65536, 0), None);
    }

    #[test]
    fn test_to_rgb_bytes() {
        let mut image = ImageBuffer::new(2, 1).unwrap();
        image.set(0, 0, [1, 2, 3]).unwrap();
        image.set(1, 0, [4, 5, 6]).unwrap();
        assert_eq!(image.to_rgb_bytes(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_to_image_matches_pixels() {
        let mut image = ImageBuffer::new(2, 2).unwrap();
        image.set(1, 0, [255, 0, 0]).unwrap();
        let rgb = image.to_image().unwrap();
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 0, 0]);
        assert_eq!(rgb.get_pixel(0, 1).0, [0, 0, 0]);
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let image = ImageBuffer::new(1, 1).unwrap();
        let path = std::env::temp_dir().join("rt_renderer_output_test.unknownext");
        assert!(image.save(&path).is_err());
    }
}
