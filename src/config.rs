//! Repair pipeline configuration.

use crate::buffer::DEFAULT_RESOLUTION;

/// Options controlling the repair pipeline.
///
/// # Example
///
/// ```
/// use pdf_image_repair::config::RepairOptions;
///
/// let options = RepairOptions {
///     default_resolution: 300,
///     ..RepairOptions::default()
/// };
/// assert_eq!(options.default_resolution, 300);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RepairOptions {
    /// Resolution in dots per inch assumed for images whose source declares
    /// none. The legacy writer never recorded resolution, so this applies
    /// to every image it produced.
    pub default_resolution: u32,

    /// Maximum decompression ratio (compressed:decompressed)
    ///
    /// Prevents decompression bomb attacks where small compressed data
    /// expands to enormous uncompressed data, causing memory exhaustion.
    ///
    /// Default: 100 (100:1 ratio). Set to 0 to disable check.
    pub max_decompression_ratio: u32,

    /// Maximum decompressed stream size in bytes
    ///
    /// Default: 100 MB. Set to 0 to disable check.
    pub max_decompressed_size: usize,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            default_resolution: DEFAULT_RESOLUTION,
            max_decompression_ratio: 100,
            max_decompressed_size: 100 * 1024 * 1024, // 100 MB
        }
    }
}
