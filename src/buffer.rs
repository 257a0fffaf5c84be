//! Canonical pixel buffer shared by all decoders and the page assembler.
//!
//! Every decoder produces a [`CanonicalPixelBuffer`]; the container writer
//! consumes it unchanged. The buffer owns exactly `stride * height` bytes,
//! so rows never alias and row access is pure slice arithmetic.
//!
//! Pixel conventions:
//! - `Mono1`: MSB-first packed bits, bit 0 = black, bit 1 = white
//! - `Indexed8`: one byte per pixel (palette index or gray level)
//! - `Rgb24`: three bytes per pixel in B,G,R order

use crate::error::{Error, Result};

/// Resolution in dots per inch assumed when the source declares none.
pub const DEFAULT_RESOLUTION: u32 = 200;

/// Pixel layout of a canonical buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 1 bit per pixel, packed MSB-first
    Mono1,
    /// 8 bits per pixel, single channel
    Indexed8,
    /// 24 bits per pixel, B,G,R byte order
    Rgb24,
}

impl PixelFormat {
    /// Minimum row stride in bytes implied by `width` pixels.
    pub fn min_stride(&self, width: u32) -> usize {
        match self {
            PixelFormat::Mono1 => (width as usize).div_ceil(8),
            PixelFormat::Indexed8 => width as usize,
            PixelFormat::Rgb24 => width as usize * 3,
        }
    }
}

/// Decoder-agnostic raster representation of one corrected image.
#[derive(Debug, Clone)]
pub struct CanonicalPixelBuffer {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel layout
    pub format: PixelFormat,
    /// Row size in bytes; at least the minimum the format implies
    pub stride: usize,
    /// Horizontal resolution in dots per inch
    pub x_resolution: u32,
    /// Vertical resolution in dots per inch
    pub y_resolution: u32,
    pixels: Vec<u8>,
}

impl CanonicalPixelBuffer {
    /// Allocate a zero-filled buffer of exactly `stride * height` bytes.
    ///
    /// Fails with [`Error::CodecIo`] if `stride` is below the minimum the
    /// format implies for `width`; a smaller stride would make rows alias.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        stride: usize,
        resolution: u32,
    ) -> Result<Self> {
        let min = format.min_stride(width);
        if stride < min {
            return Err(Error::CodecIo {
                filters: String::new(),
                width,
                height,
                reason: format!("stride {} below minimum {} for {:?}", stride, min, format),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            stride,
            x_resolution: resolution,
            y_resolution: resolution,
            pixels: vec![0u8; stride * height as usize],
        })
    }

    /// Borrow the whole pixel buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Borrow one row; the slice is exactly `stride` bytes.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.pixels[start..start + self.stride]
    }

    /// Mutably borrow one row; the slice is exactly `stride` bytes.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        &mut self.pixels[start..start + self.stride]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_stride() {
        assert_eq!(PixelFormat::Mono1.min_stride(8), 1);
        assert_eq!(PixelFormat::Mono1.min_stride(9), 2);
        assert_eq!(PixelFormat::Indexed8.min_stride(10), 10);
        assert_eq!(PixelFormat::Rgb24.min_stride(10), 30);
    }

    #[test]
    fn test_buffer_length_invariant() {
        let buf = CanonicalPixelBuffer::new(17, 5, PixelFormat::Mono1, 3, 200).unwrap();
        assert_eq!(buf.pixels().len(), buf.stride * buf.height as usize);
        assert_eq!(buf.pixels().len(), 15);
    }

    #[test]
    fn test_stride_below_minimum_rejected() {
        let result = CanonicalPixelBuffer::new(17, 5, PixelFormat::Mono1, 2, 200);
        assert!(result.is_err());
    }

    #[test]
    fn test_over_allocated_stride_allowed() {
        // The legacy writer's 1-bit layout uses width/8 + 1 bytes per row.
        let buf = CanonicalPixelBuffer::new(8, 2, PixelFormat::Mono1, 2, 200).unwrap();
        assert_eq!(buf.stride, 2);
        assert_eq!(buf.pixels().len(), 4);
    }

    #[test]
    fn test_rows_do_not_alias() {
        let mut buf = CanonicalPixelBuffer::new(4, 2, PixelFormat::Indexed8, 4, 200).unwrap();
        buf.row_mut(0).copy_from_slice(&[1, 2, 3, 4]);
        buf.row_mut(1).copy_from_slice(&[5, 6, 7, 8]);
        assert_eq!(buf.row(0), &[1, 2, 3, 4]);
        assert_eq!(buf.row(1), &[5, 6, 7, 8]);
    }
}
