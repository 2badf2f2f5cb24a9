//! PDF document assembly.
//!
//! Builds the object graph for a parsed document, serializes each object
//! sequentially while recording byte offsets, and appends a classic
//! cross-reference table and trailer. Given the same page model and options
//! the produced bytes are identical between runs.

use std::collections::HashMap;
use std::fs;

use crate::config::ConvertOptions;
use crate::elements::{Page, PageModel};
use crate::error::{code, Error, ErrorSink, Result};
use crate::object::Object;

use super::content_stream::render_page;
use super::object_serializer::ObjectSerializer;

/// Binary comment recommended for PDF files carrying non-ASCII stream data.
const BINARY_MARKER: &[u8] = b"%\xE2\xE3\xCF\xD3\n";

/// Assembles complete PDF documents from parsed page models.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    options: ConvertOptions,
}

impl PdfWriter {
    /// Create a writer with the given conversion options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Create a writer with default options (PDF 1.7, A4 page).
    pub fn with_defaults() -> Self {
        Self::new(ConvertOptions::default())
    }

    /// Generate the complete PDF byte stream for a page model.
    pub fn generate(&self, model: &PageModel, sink: &mut ErrorSink) -> Result<Vec<u8>> {
        let objects = self.build_objects(model);
        let serializer = ObjectSerializer::new();

        let mut output = Vec::new();
        output.extend_from_slice(format!("%PDF-{:.1}\n", self.options.compatibility_level).as_bytes());
        output.extend_from_slice(BINARY_MARKER);

        // Offset of each object, indexed by object number.
        let mut offsets: Vec<(u32, usize)> = Vec::with_capacity(objects.len());
        for (id, obj) in &objects {
            offsets.push((*id, output.len()));
            output.extend_from_slice(&serializer.serialize_indirect(*id, obj));
        }

        let xref_offset = output.len();
        self.write_xref(&mut output, &offsets);
        self.write_trailer(&mut output, &objects, xref_offset);

        sink.info(format!(
            "generated PDF: {} page(s), {} objects, {} bytes",
            model.page_count(),
            objects.len(),
            output.len()
        ));
        Ok(output)
    }

    /// Generate the PDF and write it to `path`.
    pub fn save(&self, model: &PageModel, path: &str, sink: &mut ErrorSink) -> Result<()> {
        let bytes = self.generate(model, sink)?;
        fs::write(path, &bytes).map_err(|source| {
            let err = Error::OutputUnwritable {
                path: path.to_string(),
                source,
            };
            sink.set_error(code::OUTPUT_OPEN_FAILED, err.to_string());
            err
        })
    }

    /// Build the object graph in its fixed serialization order:
    /// catalog, page tree, page/content pairs, the shared font, then the
    /// document information dictionary.
    fn build_objects(&self, model: &PageModel) -> Vec<(u32, Object)> {
        let catalog_id = 1;
        let pages_id = 2;

        // Page and content objects interleave after the page tree node.
        let page_ids: Vec<(u32, u32)> = (0..model.pages.len() as u32)
            .map(|i| (3 + i * 2, 4 + i * 2))
            .collect();
        let font_id = 3 + model.pages.len() as u32 * 2;
        let info_id = font_id + 1;

        let mut objects = Vec::new();

        objects.push((
            catalog_id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(pages_id)),
            ]),
        ));

        let kids: Vec<Object> = page_ids
            .iter()
            .map(|(page_id, _)| ObjectSerializer::reference(*page_id))
            .collect();
        objects.push((
            pages_id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                ("Count", ObjectSerializer::integer(model.pages.len() as i64)),
                ("Kids", ObjectSerializer::array(kids)),
            ]),
        ));

        for (page, (page_id, content_id)) in model.pages.iter().zip(&page_ids) {
            objects.push((*page_id, self.page_object(page, pages_id, *content_id, font_id)));
            objects.push((*content_id, content_object(page)));
        }

        objects.push((
            font_id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Font")),
                ("Subtype", ObjectSerializer::name("Type1")),
                ("BaseFont", ObjectSerializer::name("Helvetica")),
            ]),
        ));

        objects.push((info_id, info_object(model)));
        objects
    }

    fn page_object(&self, page: &Page, pages_id: u32, content_id: u32, font_id: u32) -> Object {
        let resources = ObjectSerializer::dict(vec![(
            "Font",
            ObjectSerializer::dict(vec![("F1", ObjectSerializer::reference(font_id))]),
        )]);

        ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Page")),
            ("Parent", ObjectSerializer::reference(pages_id)),
            (
                "MediaBox",
                ObjectSerializer::rect(0.0, 0.0, page.width, page.height),
            ),
            ("Contents", ObjectSerializer::reference(content_id)),
            ("Resources", resources),
        ])
    }

    /// Write the classic cross-reference table. Each entry is exactly
    /// twenty bytes including the trailing space and newline.
    fn write_xref(&self, output: &mut Vec<u8>, offsets: &[(u32, usize)]) {
        output.extend_from_slice(b"xref\n");
        output.extend_from_slice(format!("0 {}\n", offsets.len() + 1).as_bytes());
        output.extend_from_slice(b"0000000000 65535 f \n");
        for (_, offset) in offsets {
            output.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
    }

    fn write_trailer(&self, output: &mut Vec<u8>, objects: &[(u32, Object)], xref_offset: usize) {
        let info_id = objects.last().map(|(id, _)| *id).unwrap_or(1);
        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(objects.len() as i64 + 1)),
            ("Root", ObjectSerializer::reference(1)),
            ("Info", ObjectSerializer::reference(info_id)),
        ]);

        output.extend_from_slice(b"trailer\n");
        output.extend_from_slice(&ObjectSerializer::new().serialize(&trailer));
        output.extend_from_slice(format!("\nstartxref\n{}\n%%EOF\n", xref_offset).as_bytes());
    }
}

fn content_object(page: &Page) -> Object {
    Object::Stream {
        dict: HashMap::new(),
        data: bytes::Bytes::from(render_page(page)),
    }
}

fn info_object(model: &PageModel) -> Object {
    let mut entries = vec![("Producer", ObjectSerializer::string("ps2pdf_oxide"))];
    if let Some(title) = &model.title {
        entries.push(("Title", ObjectSerializer::string(title)));
    }
    if let Some(creator) = &model.creator {
        entries.push(("Creator", ObjectSerializer::string(creator)));
    }
    ObjectSerializer::dict(entries)
}
