//! Error types for the image repair pipeline.
//!
//! Every failure here is fatal for the whole document: the repair either
//! produces a complete output container or nothing at all. Each variant
//! carries the originating filter-chain description and the declared image
//! dimensions so a failing image can be identified from the error alone.

/// Result type alias for repair pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while repairing a document's images.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The image declares a filter name or combination the pipeline does not handle.
    #[error("unsupported filter combination: [{filters}]")]
    UnsupportedFilterCombination {
        /// Literal filter-chain description from the source image
        filters: String,
    },

    /// Decompressed data is shorter than the declared dimensions imply.
    #[error(
        "truncated {filters} stream for {width}x{height} image: need {expected} bytes, have {actual}"
    )]
    DecodeTruncated {
        /// Filter-chain description of the failing image
        filters: String,
        /// Declared width in pixels
        width: u32,
        /// Declared height in pixels
        height: u32,
        /// Byte count the declared dimensions require
        expected: usize,
        /// Byte count actually available
        actual: usize,
    },

    /// The underlying compression library rejected the stream.
    #[error("codec failure for {filters} image {width}x{height}: {reason}")]
    CodecIo {
        /// Filter-chain description of the failing image
        filters: String,
        /// Declared width in pixels
        width: u32,
        /// Declared height in pixels
        height: u32,
        /// Message from the underlying codec
        reason: String,
    },

    /// Fax decode produced fewer scanlines than the declared height.
    #[error("truncated strip for {filters} image {width}x{height}: decoded {rows} rows")]
    TruncatedStrip {
        /// Filter-chain description of the failing image
        filters: String,
        /// Declared width in pixels
        width: u32,
        /// Declared height in pixels
        height: u32,
        /// Number of scanlines the decoder produced
        rows: u32,
    },
}
