//! Rendered output handed back to the caller.

use std::path::Path;

use image::{Rgb, RgbImage, Rgba, RgbaImage};

use crate::error::{RenderError, Result};
use crate::raster::Raster;

/// A finished render: `width * height` pixels, row-major, `0x00RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl PixelBuffer {
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Raw native-endian bytes of the pixel words.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let [r, g, b] = split_rgb(self.pixels[(y * self.width + x) as usize]);
            Rgb([r, g, b])
        })
    }

    /// RGBA copy where every `key` pixel is fully transparent, the way
    /// renders are composited onto a presentation layer.
    pub fn to_rgba_image_keyed(&self, key: u32) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let pixel = self.pixels[(y * self.width + x) as usize];
            let [r, g, b] = split_rgb(pixel);
            let alpha = if pixel & 0xFF_FFFF == key & 0xFF_FFFF { 0 } else { 0xFF };
            Rgba([r, g, b, alpha])
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_rgb_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

impl From<Raster> for PixelBuffer {
    fn from(raster: Raster) -> Self {
        let width = raster.width() as u32;
        let height = raster.height() as u32;
        Self {
            width,
            height,
            pixels: raster.into_pixels(),
        }
    }
}

fn split_rgb(pixel: u32) -> [u8; 3] {
    [(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PixelBuffer {
        PixelBuffer::from_pixels(2, 1, vec![0xFF8000, 0x000000]).unwrap()
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(PixelBuffer::from_pixels(2, 2, vec![0; 3]).is_err());
    }

    #[test]
    fn pixel_lookup() {
        let buffer = sample();
        assert_eq!(buffer.pixel(0, 0), Some(0xFF8000));
        assert_eq!(buffer.pixel(2, 0), None);
    }

    #[test]
    fn rgb_export() {
        let image = sample().to_rgb_image();
        assert_eq!(image.get_pixel(0, 0), &Rgb([0xFF, 0x80, 0x00]));
        assert_eq!(image.get_pixel(1, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn keyed_export_makes_black_transparent() {
        let image = sample().to_rgba_image_keyed(0x000000);
        assert_eq!(image.get_pixel(0, 0)[3], 0xFF);
        assert_eq!(image.get_pixel(1, 0)[3], 0);
    }

    #[test]
    fn bytes_cover_every_pixel() {
        assert_eq!(sample().as_bytes().len(), 8);
    }

    #[test]
    fn raster_converts_into_buffer() {
        let mut raster = Raster::new(3, 2);
        raster.fill_rect(0, 0, 1, 1, 0x123456);
        let buffer = PixelBuffer::from(raster);
        assert_eq!((buffer.width, buffer.height), (3, 2));
        assert_eq!(buffer.pixel(0, 0), Some(0x123456));
    }
}
