//! DCTDecode (JPEG) passthrough.
//!
//! PDF's DCTDecode filter is plain JPEG, and the legacy writer bug never
//! touched JPEG streams, so this path only decodes the stream into the
//! canonical layout without any repair work.
//!
//! PDF Spec: ISO 32000-1:2008, Section 7.4.8 - DCTDecode Filter

use crate::buffer::{CanonicalPixelBuffer, PixelFormat};
use crate::config::RepairOptions;
use crate::error::{Error, Result};
use crate::record::ImageRecord;

/// Decode a JPEG stream into a canonical pixel buffer.
///
/// The decoded component count selects the pixel format: one component maps
/// to `Indexed8` (8-bit gray), three to `Rgb24` (stored B,G,R). Anything
/// else is converted to RGB first.
pub fn decode_jpeg(record: &ImageRecord, options: &RepairOptions) -> Result<CanonicalPixelBuffer> {
    use image::GenericImageView;

    let img = image::load_from_memory_with_format(&record.data, image::ImageFormat::Jpeg)
        .map_err(|e| Error::CodecIo {
            filters: record.filter_description(),
            width: record.width,
            height: record.height,
            reason: e.to_string(),
        })?;

    // The JPEG stream carries its own dimensions; trust those over the
    // container dictionary, which the legacy writer sometimes got wrong.
    let (width, height) = img.dimensions();
    if width != record.width || height != record.height {
        log::warn!(
            "JPEG dimensions {}x{} differ from declared {}x{}",
            width,
            height,
            record.width,
            record.height
        );
    }

    let buffer = match img.color() {
        image::ColorType::L8 | image::ColorType::L16 => {
            let gray = img.to_luma8();
            let mut buffer = CanonicalPixelBuffer::new(
                width,
                height,
                PixelFormat::Indexed8,
                width as usize,
                options.default_resolution,
            )?;
            for (y, src) in gray.as_raw().chunks_exact(width as usize).enumerate() {
                buffer.row_mut(y as u32).copy_from_slice(src);
            }
            buffer
        },
        _ => {
            let rgb = img.to_rgb8();
            let mut buffer = CanonicalPixelBuffer::new(
                width,
                height,
                PixelFormat::Rgb24,
                width as usize * 3,
                options.default_resolution,
            )?;
            for (y, src) in rgb.as_raw().chunks_exact(width as usize * 3).enumerate() {
                let dst = buffer.row_mut(y as u32);
                for x in 0..width as usize {
                    dst[x * 3] = src[x * 3 + 2];
                    dst[x * 3 + 1] = src[x * 3 + 1];
                    dst[x * 3 + 2] = src[x * 3];
                }
            }
            buffer
        },
    };

    log::debug!(
        "jpeg decoded: {}x{} {:?}, {} input bytes",
        buffer.width,
        buffer.height,
        buffer.format,
        record.data.len()
    );

    Ok(buffer)
}
