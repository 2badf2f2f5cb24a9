//! Convert a constrained PostScript subset into minimal, valid PDF documents.
//!
//! The crate is a two-stage pipeline:
//!
//! 1. [`parser::PostScriptParser`] reads a PostScript program limited to path
//!    construction, text showing and a small set of graphics-state operators
//!    (both the long spellings and the Ghostscript abbreviations), and builds
//!    a [`PageModel`] whose coordinates are already mapped into the target
//!    page space.
//! 2. [`writer::PdfWriter`] turns the page model into a complete PDF file:
//!    one content stream per page, a shared Helvetica font resource, a
//!    classic cross-reference table and a trailer.
//!
//! [`Processor`] ties the two stages together for the common file-to-file
//! and string-to-bytes cases:
//!
//! ```
//! use ps2pdf_oxide::{ErrorSink, Processor};
//!
//! let processor = Processor::with_defaults();
//! let mut sink = ErrorSink::new();
//! let pdf = processor
//!     .convert("%!PS\n10 10 moveto\n100 100 lineto\nstroke\nshowpage\n", &mut sink)
//!     .unwrap();
//! assert!(pdf.starts_with(b"%PDF-1.7"));
//! ```
//!
//! Parsing is lenient: malformed operators are logged through the
//! [`ErrorSink`] and skipped, and the parser always yields at least one page.
//! Output is deterministic for a given input and options.

#![warn(missing_docs)]

pub mod config;
pub mod elements;
pub mod error;
pub mod object;
pub mod parser;
pub mod processor;
pub mod writer;

pub use config::{ConvertOptions, PaperSize};
pub use elements::{BoundingBox, Page, PageModel, PathElement, TextElement};
pub use error::{Error, ErrorSink, Result, Severity};
pub use parser::PostScriptParser;
pub use processor::Processor;
pub use writer::PdfWriter;
