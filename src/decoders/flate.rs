//! FlateDecode raster decoding.
//!
//! The legacy writer packed raw scanlines with DEFLATE and no predictor.
//! Its 1-bit row layout is over-allocated: `width/8 + 1` bytes per row
//! (integer division), one byte more than the packing needs whenever the
//! width is a multiple of 8. Decoding has to honor that exact layout or
//! every row after the first is read at the wrong offset.
//!
//! PDF Spec: ISO 32000-1:2008, Section 7.4.4 - FlateDecode Filter

use std::io::{self, Read};

use flate2::read::{DeflateDecoder, ZlibDecoder};

use crate::buffer::{CanonicalPixelBuffer, PixelFormat};
use crate::config::RepairOptions;
use crate::error::{Error, Result};
use crate::record::{ColorSpace, ImageRecord};

/// DEFLATE-decompress a stream, with decompression bomb protection.
///
/// Tries zlib first, then raw deflate for streams whose zlib wrapper is
/// corrupt. Limit violations and undecodable input surface as
/// `io::ErrorKind::InvalidData`.
pub fn inflate(input: &[u8], options: &RepairOptions) -> io::Result<Vec<u8>> {
    let mut output = Vec::new();
    let zlib_err = match ZlibDecoder::new(input).read_to_end(&mut output) {
        Ok(_) => {
            check_limits(input.len(), output.len(), options)?;
            return Ok(output);
        },
        Err(e) => e,
    };

    // Some streams carry valid deflate data behind a corrupt zlib header.
    log::debug!("zlib decode failed ({}), trying raw deflate", zlib_err);
    output.clear();
    match DeflateDecoder::new(input).read_to_end(&mut output) {
        Ok(_) => {
            log::debug!("raw deflate recovery succeeded: {} bytes", output.len());
            check_limits(input.len(), output.len(), options)?;
            Ok(output)
        },
        Err(deflate_err) => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "flate decompression failed (zlib: {}, deflate: {})",
                zlib_err, deflate_err
            ),
        )),
    }
}

fn check_limits(compressed: usize, decompressed: usize, options: &RepairOptions) -> io::Result<()> {
    if options.max_decompression_ratio > 0 && compressed > 0 {
        let ratio = decompressed as u64 / compressed.max(1) as u64;
        if ratio > options.max_decompression_ratio as u64 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "decompression ratio {}:1 exceeds limit {}:1",
                    ratio, options.max_decompression_ratio
                ),
            ));
        }
    }
    if options.max_decompressed_size > 0 && decompressed > options.max_decompressed_size {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "decompressed size {} bytes exceeds limit {} bytes",
                decompressed, options.max_decompressed_size
            ),
        ));
    }
    Ok(())
}

/// Decode a FlateDecode raster image into a canonical pixel buffer.
///
/// Decompresses the stream, then repacks each source row into the buffer:
/// straight byte copy for 1-bit and 8-bit single-channel rows, a per-pixel
/// R,G,B -> B,G,R channel swap for 24-bit rows.
pub fn decode_flate_raster(
    record: &ImageRecord,
    options: &RepairOptions,
) -> Result<CanonicalPixelBuffer> {
    let decoded = inflate(&record.data, options).map_err(|e| Error::CodecIo {
        filters: record.filter_description(),
        width: record.width,
        height: record.height,
        reason: e.to_string(),
    })?;

    let width = record.width as usize;
    let (src_row_bytes, format) = match (record.bits_per_component, record.color_space) {
        // Legacy layout: one byte more than ceil(width/8) when width % 8 == 0.
        (1, _) => (width / 8 + 1, PixelFormat::Mono1),
        (8, ColorSpace::DeviceRgb) => (width * 3, PixelFormat::Rgb24),
        (8, _) => (width, PixelFormat::Indexed8),
        (bits, _) => {
            return Err(Error::CodecIo {
                filters: record.filter_description(),
                width: record.width,
                height: record.height,
                reason: format!("unsupported bits per component: {}", bits),
            });
        },
    };

    let expected = src_row_bytes * record.height as usize;
    if expected > decoded.len() {
        return Err(Error::DecodeTruncated {
            filters: record.filter_description(),
            width: record.width,
            height: record.height,
            expected,
            actual: decoded.len(),
        });
    }

    // Mono1 keeps the source's over-allocated row size as its stride; the
    // other formats already sit at the minimum stride.
    let mut buffer = CanonicalPixelBuffer::new(
        record.width,
        record.height,
        format,
        src_row_bytes,
        options.default_resolution,
    )?;

    for y in 0..record.height {
        let src = &decoded[y as usize * src_row_bytes..(y as usize + 1) * src_row_bytes];
        let dst = buffer.row_mut(y);
        match format {
            PixelFormat::Rgb24 => {
                // Source is R,G,B per pixel; the canonical order is B,G,R.
                for x in 0..width {
                    dst[x * 3] = src[x * 3 + 2];
                    dst[x * 3 + 1] = src[x * 3 + 1];
                    dst[x * 3 + 2] = src[x * 3];
                }
            },
            PixelFormat::Mono1 | PixelFormat::Indexed8 => {
                dst.copy_from_slice(src);
            },
        }
    }

    log::debug!(
        "flate raster decoded: {}x{} {:?}, {} -> {} bytes",
        record.width,
        record.height,
        format,
        record.data.len(),
        buffer.pixels().len()
    );

    Ok(buffer)
}
