//! High-level conversion driver tying the parser and the writer together.

use std::path::Path;

use crate::config::ConvertOptions;
use crate::error::{ErrorSink, Result};
use crate::parser::PostScriptParser;
use crate::writer::PdfWriter;

/// Progress callback: `(current_index, total, input_path)`, fired once per
/// file before it is converted.
pub type ProgressFn<'a> = &'a dyn Fn(usize, usize, &str);

/// Converts PostScript inputs to PDF outputs with a shared set of options.
#[derive(Debug, Clone)]
pub struct Processor {
    options: ConvertOptions,
}

impl Processor {
    /// Create a processor with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Create a processor with default options (PDF 1.7, A4 page).
    pub fn with_defaults() -> Self {
        Self::new(ConvertOptions::default())
    }

    /// The options this processor converts with.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert in-memory PostScript text to PDF bytes.
    pub fn convert(&self, content: &str, sink: &mut ErrorSink) -> Result<Vec<u8>> {
        let mut parser = PostScriptParser::new(&self.options);
        let model = parser.parse(content, sink);
        PdfWriter::new(self.options.clone()).generate(&model, sink)
    }

    /// Convert a PostScript file to a PDF file.
    pub fn convert_file(
        &self,
        input: impl AsRef<Path>,
        output: &str,
        sink: &mut ErrorSink,
    ) -> Result<()> {
        let mut parser = PostScriptParser::new(&self.options);
        let model = parser.parse_file(input, sink)?;
        PdfWriter::new(self.options.clone()).save(&model, output, sink)
    }

    /// Convert a batch of `(input, output)` jobs.
    ///
    /// Stops at the first fatal error and returns it. The optional progress
    /// callback fires once per file before its conversion starts.
    pub fn process_files(
        &self,
        jobs: &[(String, String)],
        progress: Option<ProgressFn<'_>>,
        sink: &mut ErrorSink,
    ) -> Result<()> {
        let total = jobs.len();
        for (i, (input, output)) in jobs.iter().enumerate() {
            if let Some(callback) = progress {
                callback(i, total, input);
            }
            self.convert_file(input, output, sink)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::code;

    #[test]
    fn test_convert_produces_pdf_bytes() {
        let processor = Processor::with_defaults();
        let mut sink = ErrorSink::new();
        let pdf = processor
            .convert("%!PS\n10 10 moveto\n100 100 lineto\nstroke\nshowpage\n", &mut sink)
            .unwrap();

        assert!(pdf.starts_with(b"%PDF-1.7\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        assert!(!sink.has_error());
    }

    #[test]
    fn test_convert_file_missing_input_sets_code() {
        let processor = Processor::with_defaults();
        let mut sink = ErrorSink::new();
        let result = processor.convert_file("/nonexistent/input.ps", "/tmp/out.pdf", &mut sink);

        assert!(result.is_err());
        assert_eq!(sink.error().map(|(c, _)| c), Some(code::INPUT_OPEN_FAILED));
    }

    #[test]
    fn test_process_files_fires_progress() {
        use std::cell::RefCell;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.ps");
        let output = dir.path().join("a.pdf");
        std::fs::write(&input, "%!PS\nshowpage\n").unwrap();

        let jobs = vec![(
            input.to_string_lossy().to_string(),
            output.to_string_lossy().to_string(),
        )];
        let seen: RefCell<Vec<(usize, usize)>> = RefCell::new(Vec::new());
        let progress = |i: usize, total: usize, _path: &str| {
            seen.borrow_mut().push((i, total));
        };

        let processor = Processor::with_defaults();
        let mut sink = ErrorSink::new();
        processor
            .process_files(&jobs, Some(&progress), &mut sink)
            .unwrap();

        assert_eq!(*seen.borrow(), vec![(0, 1)]);
        assert!(output.exists());
    }
}
