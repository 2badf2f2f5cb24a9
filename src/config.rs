//! Conversion options.

/// A4 page width in points.
pub const A4_WIDTH: f64 = 595.276;
/// A4 page height in points.
pub const A4_HEIGHT: f64 = 841.890;

/// Standard paper sizes selectable for the output page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    /// A4 (210 x 297 mm)
    A4,
    /// US Letter (8.5 x 11 inches)
    Letter,
    /// US Legal (8.5 x 14 inches)
    Legal,
    /// A3 (297 x 420 mm)
    A3,
    /// A5 (148 x 210 mm)
    A5,
    /// Executive (7.25 x 10.5 inches)
    Executive,
}

impl PaperSize {
    /// Page dimensions in points (width, height).
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (A4_WIDTH, A4_HEIGHT),
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
            PaperSize::A3 => (841.890, 1190.551),
            PaperSize::A5 => (419.528, 595.276),
            PaperSize::Executive => (522.0, 756.0),
        }
    }

    /// Parse a paper size name as used on the command line (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a4" => Some(PaperSize::A4),
            "letter" => Some(PaperSize::Letter),
            "legal" => Some(PaperSize::Legal),
            "a3" => Some(PaperSize::A3),
            "a5" => Some(PaperSize::A5),
            "executive" => Some(PaperSize::Executive),
            _ => None,
        }
    }
}

/// Options shared by the parser and the PDF generator.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// PDF compatibility level written in the header (one decimal, e.g. 1.7).
    pub compatibility_level: f64,
    /// Target page width in points.
    pub page_width: f64,
    /// Target page height in points.
    pub page_height: f64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            compatibility_level: 1.7,
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
        }
    }
}

impl ConvertOptions {
    /// Create options with defaults (PDF 1.7, A4 page).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PDF compatibility level.
    pub fn with_compatibility_level(mut self, level: f64) -> Self {
        self.compatibility_level = level;
        self
    }

    /// Set the target page size in points.
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the target page size from a standard paper size.
    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        let (width, height) = paper.dimensions();
        self.page_width = width;
        self.page_height = height;
        self
    }
}
