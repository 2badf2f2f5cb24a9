//! The page model produced by the parser and consumed by the generator.
//!
//! All coordinates stored here are already in target (PDF) page space; the
//! parser applies the coordinate transform before creating an element.

use crate::config::{A4_HEIGHT, A4_WIDTH};

/// A single path construction step, in target page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PathElement {
    /// Begin a new subpath at (x, y).
    MoveTo(f64, f64),
    /// Straight line segment to (x, y).
    LineTo(f64, f64),
    /// Cubic Bezier segment with control points (x1, y1), (x2, y2) and
    /// end point (x3, y3).
    CurveTo(f64, f64, f64, f64, f64, f64),
    /// Close the current subpath.
    ClosePath,
}

/// A text run positioned in target page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    /// The text to show.
    pub text: String,
    /// X position of the text origin.
    pub x: f64,
    /// Y position of the text origin.
    pub y: f64,
    /// Font name in effect when the text was shown.
    pub font_name: String,
    /// Font size in points.
    pub font_size: f64,
    /// Fill color as RGB components in 0..=1.
    pub color: [f64; 3],
}

/// One output page: dimensions plus ordered path and text elements.
#[derive(Debug, Clone)]
pub struct Page {
    /// Page width in points.
    pub width: f64,
    /// Page height in points.
    pub height: f64,
    /// Path elements in drawing order.
    pub paths: Vec<PathElement>,
    /// Text elements in drawing order.
    pub texts: Vec<TextElement>,
}

impl Page {
    /// Create an empty page with the given dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            paths: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Whether the page carries no drawable content.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.texts.is_empty()
    }
}

/// PostScript bounding box from the `%%BoundingBox` header comment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Lower-left x
    pub x1: f64,
    /// Lower-left y
    pub y1: f64,
    /// Upper-right x
    pub x2: f64,
    /// Upper-right y
    pub y2: f64,
}

impl Default for BoundingBox {
    /// A4 dimensions, used when the header is absent.
    fn default() -> Self {
        Self {
            x1: 0.0,
            y1: 0.0,
            x2: A4_WIDTH,
            y2: A4_HEIGHT,
        }
    }
}

impl BoundingBox {
    /// Width of the box in points.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Height of the box in points.
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// The parsed document: ordered pages plus header metadata.
#[derive(Debug, Clone)]
pub struct PageModel {
    /// Pages in document order. Never empty.
    pub pages: Vec<Page>,
    /// `%%Title:` header value, if present.
    pub title: Option<String>,
    /// `%%Creator:` header value, if present.
    pub creator: Option<String>,
    /// Bounding box from the header, or the A4 default.
    pub bounding_box: BoundingBox,
    /// Whether any `%%` header comment was seen.
    pub dsc_compliant: bool,
}

impl PageModel {
    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
