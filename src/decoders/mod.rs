//! Image decoders for the repair pipeline.
//!
//! This module classifies each source image by its declared filter chain and
//! dispatches to the matching decoder:
//! - DCTDecode (JPEG) - passthrough decode
//! - FlateDecode - deflate-packed raw scanlines
//! - CCITTFaxDecode - CCITT Group 4 fax bitstream
//! - FlateDecode + CCITTFaxDecode - deflate-wrapped G4 bitstream
//!
//! Any other chain is a hard error: a silently skipped image would leave a
//! page missing from the repaired document.

use crate::buffer::CanonicalPixelBuffer;
use crate::config::RepairOptions;
use crate::error::{Error, Result};
use crate::record::{describe_filters, Filter, ImageRecord};

pub mod dct;
pub mod fax;
pub mod flate;

pub use dct::decode_jpeg;
pub use fax::{decode_fax, invert_scanlines};
pub use flate::{decode_flate_raster, inflate};

/// Decode strategy selected from an image's filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// DCTDecode: decode the JPEG stream as-is
    JpegPassthrough,
    /// FlateDecode: decompress and repack raw scanlines
    FlateRaster,
    /// CCITTFaxDecode: G4 transcode
    FaxG4,
    /// FlateDecode then CCITTFaxDecode: decompress, then G4 transcode
    FlateThenFaxG4,
}

/// Select the decode strategy for an ordered filter chain.
///
/// The chain is matched structurally, so a single stage can never be
/// confused with a multi-stage chain whose names happen to concatenate the
/// same way. Unknown chains fail with the literal chain description.
pub fn classify(filters: &[Filter]) -> Result<DecodeStrategy> {
    match filters {
        [Filter::DCTDecode] => Ok(DecodeStrategy::JpegPassthrough),
        [Filter::FlateDecode] => Ok(DecodeStrategy::FlateRaster),
        [Filter::CCITTFaxDecode] => Ok(DecodeStrategy::FaxG4),
        [Filter::FlateDecode, Filter::CCITTFaxDecode] => Ok(DecodeStrategy::FlateThenFaxG4),
        other => Err(Error::UnsupportedFilterCombination {
            filters: describe_filters(other),
        }),
    }
}

/// Decode one source image into a canonical pixel buffer.
pub fn decode_image(record: &ImageRecord, options: &RepairOptions) -> Result<CanonicalPixelBuffer> {
    match classify(&record.filters)? {
        DecodeStrategy::JpegPassthrough => decode_jpeg(record, options),
        DecodeStrategy::FlateRaster => decode_flate_raster(record, options),
        DecodeStrategy::FaxG4 => decode_fax(record, options, false),
        DecodeStrategy::FlateThenFaxG4 => decode_fax(record, options, true),
    }
}
