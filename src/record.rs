//! Source image records read from the document container.
//!
//! An [`ImageRecord`] captures everything the pipeline needs to know about
//! one embedded image: declared dimensions, pixel layout, the ordered filter
//! chain its stream was put through, and the raw stream bytes. Records are
//! immutable once read.

/// PDF stream filter types handled by the repair pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// FlateDecode (deflate/zlib compression)
    FlateDecode,
    /// DCTDecode (JPEG compression)
    DCTDecode,
    /// CCITTFaxDecode (CCITT Group 4 fax compression)
    CCITTFaxDecode,
}

impl Filter {
    /// Get the PDF name for this filter.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Filter::FlateDecode => "FlateDecode",
            Filter::DCTDecode => "DCTDecode",
            Filter::CCITTFaxDecode => "CCITTFaxDecode",
        }
    }
}

/// Color space declared by an image stream dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Grayscale (1 component per pixel)
    DeviceGray,
    /// RGB color (3 components per pixel)
    DeviceRgb,
    /// Palette-indexed (1 component per pixel)
    Indexed,
}

impl ColorSpace {
    /// Get the number of color components.
    pub fn components(&self) -> u8 {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRgb => 3,
            ColorSpace::Indexed => 1,
        }
    }

    /// Get the PDF name for this color space.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRgb => "DeviceRGB",
            ColorSpace::Indexed => "Indexed",
        }
    }
}

/// A source image's identity within the container.
///
/// The filter chain is kept as an ordered list and matched structurally by
/// the classifier. With `bits_per_component` of 1 or 8 and the three color
/// spaces this spans the four raster layouts the legacy writer produced:
/// 1-bit gray, 8-bit gray, 8-bit indexed, and 24-bit RGB.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bits per color component (1 or 8)
    pub bits_per_component: u8,
    /// Declared color space
    pub color_space: ColorSpace,
    /// Ordered filter chain the stream was encoded through
    pub filters: Vec<Filter>,
    /// Raw stream bytes as stored in the container
    pub data: Vec<u8>,
}

impl ImageRecord {
    /// Render the filter chain in the PDF name style for diagnostics,
    /// e.g. `/FlateDecode/CCITTFaxDecode`.
    pub fn filter_description(&self) -> String {
        describe_filters(&self.filters)
    }
}

/// Render a filter chain in the PDF name style, e.g. `/CCITTFaxDecode`.
pub fn describe_filters(filters: &[Filter]) -> String {
    let mut desc = String::new();
    for filter in filters {
        desc.push('/');
        desc.push_str(filter.pdf_name());
    }
    desc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_filters(filters: Vec<Filter>) -> ImageRecord {
        ImageRecord {
            width: 8,
            height: 8,
            bits_per_component: 1,
            color_space: ColorSpace::DeviceGray,
            filters,
            data: Vec::new(),
        }
    }

    #[test]
    fn test_filter_pdf_names() {
        assert_eq!(Filter::FlateDecode.pdf_name(), "FlateDecode");
        assert_eq!(Filter::DCTDecode.pdf_name(), "DCTDecode");
        assert_eq!(Filter::CCITTFaxDecode.pdf_name(), "CCITTFaxDecode");
    }

    #[test]
    fn test_color_space_components() {
        assert_eq!(ColorSpace::DeviceGray.components(), 1);
        assert_eq!(ColorSpace::DeviceRgb.components(), 3);
        assert_eq!(ColorSpace::Indexed.components(), 1);
    }

    #[test]
    fn test_filter_description_single() {
        let record = record_with_filters(vec![Filter::CCITTFaxDecode]);
        assert_eq!(record.filter_description(), "/CCITTFaxDecode");
    }

    #[test]
    fn test_filter_description_composite() {
        let record = record_with_filters(vec![Filter::FlateDecode, Filter::CCITTFaxDecode]);
        assert_eq!(record.filter_description(), "/FlateDecode/CCITTFaxDecode");
    }

    #[test]
    fn test_filter_description_empty() {
        let record = record_with_filters(Vec::new());
        assert_eq!(record.filter_description(), "");
    }
}
