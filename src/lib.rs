//! # PDF Image Repair
//!
//! Repairs raster images embedded in PDF documents whose bitmap encoding
//! was produced incorrectly by a legacy writer: flawed CCITT Group 4 fax
//! streams and Flate-packed bitmaps with a non-standard row layout.
//!
//! The pipeline locates image objects through a [`container::ContainerReader`],
//! classifies each by its declared filter chain, decodes the raw bitstream
//! into a [`buffer::CanonicalPixelBuffer`] with format-specific unpacking
//! rules, and hands the corrected buffers page by page to a
//! [`container::ContainerWriter`] that assembles the output document.
//!
//! Supported filter chains:
//! - `DCTDecode` - JPEG, decoded as-is (the writer bug never affected JPEG)
//! - `FlateDecode` - deflate-packed raw scanlines in the legacy row layout
//! - `CCITTFaxDecode` - CCITT G4 bitstream
//! - `FlateDecode` + `CCITTFaxDecode` - deflate-wrapped G4 bitstream
//!
//! Anything else fails loudly and aborts the whole repair; a best-effort
//! output with missing pages is never produced.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf_image_repair::{repair_document, RepairOptions};
//!
//! let repaired = repair_document(&reader, &writer, &RepairOptions::default())?;
//! std::fs::write("fixed.pdf", repaired)?;
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Source image model and canonical raster buffer
pub mod buffer;
pub mod record;

// Stream decoders
pub mod decoders;

// Page assembly and container seams
pub mod container;
pub mod pages;

// Pipeline
pub mod config;
pub mod repair;

pub use buffer::{CanonicalPixelBuffer, PixelFormat, DEFAULT_RESOLUTION};
pub use config::RepairOptions;
pub use container::{ContainerReader, ContainerWriter};
pub use decoders::{classify, decode_image, DecodeStrategy};
pub use error::{Error, Result};
pub use pages::{assemble_pages, OutputPage};
pub use record::{ColorSpace, Filter, ImageRecord};
pub use repair::repair_document;
