//! CCITT Group 4 transcoding for bilevel images.
//!
//! The legacy writer emitted G4 bitstreams that only survive a full
//! decode/re-encode cycle, so this module decodes them to raw scanlines
//! with the fax crate, which accepts an in-memory byte buffer and is
//! lenient with malformed EOFB markers.
//!
//! The decoder's convention is 1 = black; the canonical buffer stores
//! 0 = black. Every decoded scanline is therefore bit-inverted before it
//! enters the buffer. The inversion is mandatory, not cosmetic: skipping it
//! produces photographic negatives of every page.
//!
//! PDF Spec: ISO 32000-1:2008, Section 7.4.6 - CCITTFaxDecode Filter
//! CCITT Spec: ITU-T Recommendation T.6 - Facsimile coding schemes

use fax::decoder;

use crate::buffer::{CanonicalPixelBuffer, PixelFormat};
use crate::config::RepairOptions;
use crate::decoders::flate::inflate;
use crate::error::{Error, Result};
use crate::record::ImageRecord;

/// Decode a CCITT G4 image into a canonical pixel buffer.
///
/// With `inflate_first` the stream is DEFLATE-decompressed before the fax
/// decode (the composite `/FlateDecode/CCITTFaxDecode` case). Scanlines are
/// bit-inverted into the canonical 0 = black convention as they are copied.
pub fn decode_fax(
    record: &ImageRecord,
    options: &RepairOptions,
    inflate_first: bool,
) -> Result<CanonicalPixelBuffer> {
    let data;
    let stream: &[u8] = if inflate_first {
        data = inflate(&record.data, options).map_err(|e| Error::CodecIo {
            filters: record.filter_description(),
            width: record.width,
            height: record.height,
            reason: e.to_string(),
        })?;
        &data
    } else {
        &record.data
    };

    let width = record.width as usize;
    let stride = width.div_ceil(8);
    let mut rows: Vec<Vec<u8>> = Vec::with_capacity(record.height as usize);

    let success = decoder::decode_g4(
        stream.iter().copied(),
        record.width as u16,
        Some(record.height as u16),
        |transitions: &[u16]| {
            rows.push(transitions_to_bytes(transitions, width));
        },
    );

    if success.is_none() {
        return Err(Error::CodecIo {
            filters: record.filter_description(),
            width: record.width,
            height: record.height,
            reason: "fax decoder failed".to_string(),
        });
    }

    if rows.len() < record.height as usize {
        return Err(Error::TruncatedStrip {
            filters: record.filter_description(),
            width: record.width,
            height: record.height,
            rows: rows.len() as u32,
        });
    }

    let mut buffer = CanonicalPixelBuffer::new(
        record.width,
        record.height,
        PixelFormat::Mono1,
        stride,
        options.default_resolution,
    )?;

    for (y, row) in rows.iter().take(record.height as usize).enumerate() {
        let dst = buffer.row_mut(y as u32);
        dst.copy_from_slice(row);
        invert_scanlines(dst);
    }

    log::debug!(
        "fax decoded: {}x{}, {} input bytes, {} rows",
        record.width,
        record.height,
        stream.len(),
        record.height
    );

    Ok(buffer)
}

/// Invert every byte of packed bilevel data (`byte ^ 0xFF`).
///
/// Converts between the decoder's 1 = black convention and the canonical
/// 0 = black convention. Applying it twice is the identity.
pub fn invert_scanlines(data: &mut [u8]) {
    for byte in data.iter_mut() {
        *byte = !*byte;
    }
}

/// Convert run-length transition positions to byte-packed pixels.
///
/// The transitions array holds the positions where the color changes,
/// starting from white. For example, [3, 5, 8] over width 8 means pixels
/// 0-2 white, 3-4 black, 5-7 white. Output bits are MSB-first, 1 = black.
fn transitions_to_bytes(transitions: &[u16], width: usize) -> Vec<u8> {
    let mut row = vec![0u8; width.div_ceil(8)];

    let mut is_black = false;
    let mut start = 0usize;

    for &pos in transitions {
        let pos = pos as usize;
        if is_black {
            for pixel in start..pos.min(width) {
                row[pixel / 8] |= 1 << (7 - pixel % 8);
            }
        }
        is_black = !is_black;
        start = pos;
    }

    if is_black {
        for pixel in start..width {
            row[pixel / 8] |= 1 << (7 - pixel % 8);
        }
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ColorSpace, Filter};
    use fax::encoder::Encoder;
    use fax::{Color, VecWriter};

    /// Encode packed rows (1 = black) into a G4 bitstream.
    fn encode_g4(rows: &[Vec<u8>], width: u16) -> Vec<u8> {
        let mut encoder = Encoder::new(VecWriter::new());
        for row in rows {
            let line = (0..width as usize).map(|pixel| {
                if row[pixel / 8] >> (7 - pixel % 8) & 1 == 1 {
                    Color::Black
                } else {
                    Color::White
                }
            });
            encoder.encode_line(line, width);
        }
        let data = encoder.finish().unwrap().finish();
        data
    }

    fn fax_record(width: u32, height: u32, data: Vec<u8>) -> ImageRecord {
        ImageRecord {
            width,
            height,
            bits_per_component: 1,
            color_space: ColorSpace::DeviceGray,
            filters: vec![Filter::CCITTFaxDecode],
            data,
        }
    }

    #[test]
    fn test_invert_scanlines_identity_when_applied_twice() {
        let original = vec![0x00, 0xFF, 0xAA, 0x3C];
        let mut data = original.clone();
        invert_scanlines(&mut data);
        assert_eq!(data, vec![0xFF, 0x00, 0x55, 0xC3]);
        invert_scanlines(&mut data);
        assert_eq!(data, original);
    }

    #[test]
    fn test_transitions_to_bytes() {
        // WW BBB WW B over width 8: transitions at [2, 5, 7].
        let row = transitions_to_bytes(&[2, 5, 7], 8);
        assert_eq!(row, vec![0b0011_1001]);
    }

    #[test]
    fn test_transitions_to_bytes_all_white() {
        let row = transitions_to_bytes(&[], 16);
        assert_eq!(row, vec![0x00, 0x00]);
    }

    #[test]
    fn test_transitions_clamped_to_width() {
        // A transition past the row end must not write out of bounds.
        let row = transitions_to_bytes(&[0, 12], 8);
        assert_eq!(row, vec![0xFF]);
    }

    #[test]
    fn test_decode_inverts_to_canonical_polarity() {
        // One all-black row as the encoder sees it (1 = black); the
        // canonical buffer must hold it as 0 = black.
        let stream = encode_g4(&[vec![0xFF]], 8);
        let record = fax_record(8, 1, stream);
        let buffer = decode_fax(&record, &RepairOptions::default(), false).unwrap();

        assert_eq!(buffer.format, PixelFormat::Mono1);
        assert_eq!(buffer.row(0), &[0x00]);
    }

    #[test]
    fn test_truncated_strip_is_fatal() {
        // Two rows encoded, three declared.
        let stream = encode_g4(&[vec![0xF0], vec![0x0F]], 8);
        let record = fax_record(8, 3, stream);
        let result = decode_fax(&record, &RepairOptions::default(), false);
        match result {
            Err(Error::TruncatedStrip { rows, .. }) => assert!(rows < 3),
            other => panic!("expected TruncatedStrip, got {:?}", other),
        }
    }
}
