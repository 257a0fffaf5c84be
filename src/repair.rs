//! The whole-document repair pipeline.

use crate::config::RepairOptions;
use crate::container::{ContainerReader, ContainerWriter};
use crate::decoders::decode_image;
use crate::error::Result;
use crate::pages::assemble_pages;

/// Repair every image in a document and build the corrected container.
///
/// Images are decoded in source order; the loop index doubles as the stable
/// per-image ordinal in diagnostics. The first decode failure aborts the
/// entire repair - a partially repaired document would silently drop pages,
/// which is worse than failing.
pub fn repair_document<R, W>(reader: &R, writer: &W, options: &RepairOptions) -> Result<Vec<u8>>
where
    R: ContainerReader,
    W: ContainerWriter,
{
    let records = reader.list_images()?;
    log::debug!(
        "repairing {} images across {} pages",
        records.len(),
        reader.page_count()
    );

    let mut buffers = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        log::debug!(
            "image {}: {} {}x{} {}bpc {}",
            index,
            record.filter_description(),
            record.width,
            record.height,
            record.bits_per_component,
            record.color_space.pdf_name()
        );
        let buffer = decode_image(record, options).map_err(|e| {
            log::warn!("image {} failed, aborting repair: {}", index, e);
            e
        })?;
        buffers.push(buffer);
    }

    let pages = assemble_pages(buffers);
    writer.build(&pages, reader.subject(), reader.title())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pages::OutputPage;
    use crate::record::{ColorSpace, Filter, ImageRecord};

    struct FakeReader {
        records: Vec<ImageRecord>,
    }

    impl ContainerReader for FakeReader {
        fn list_images(&self) -> Result<Vec<ImageRecord>> {
            Ok(self.records.clone())
        }

        fn page_count(&self) -> usize {
            self.records.len()
        }

        fn subject(&self) -> &str {
            "subject"
        }

        fn title(&self) -> &str {
            "title"
        }
    }

    struct CountingWriter;

    impl ContainerWriter for CountingWriter {
        fn build(&self, pages: &[OutputPage], _subject: &str, _title: &str) -> Result<Vec<u8>> {
            Ok(vec![pages.len() as u8])
        }
    }

    #[test]
    fn test_empty_document_builds_empty_container() {
        let reader = FakeReader { records: vec![] };
        let out = repair_document(&reader, &CountingWriter, &RepairOptions::default()).unwrap();
        assert_eq!(out, vec![0]);
    }

    #[test]
    fn test_unknown_filter_aborts_whole_document() {
        let reader = FakeReader {
            records: vec![ImageRecord {
                width: 8,
                height: 8,
                bits_per_component: 1,
                color_space: ColorSpace::DeviceGray,
                filters: vec![Filter::DCTDecode, Filter::FlateDecode],
                data: vec![],
            }],
        };
        let result = repair_document(&reader, &CountingWriter, &RepairOptions::default());
        assert!(matches!(
            result,
            Err(Error::UnsupportedFilterCombination { .. })
        ));
    }
}
