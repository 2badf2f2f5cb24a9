//! Content-stream rendering.
//!
//! Translates a page's path and text elements into the operator sequence of a
//! PDF content stream. Coordinates in the page model are already in target
//! page space, so the stream runs under an identity CTM.

use std::io::Write;

use crate::elements::{Page, PathElement, TextElement};

use super::format_number;

/// Operators emitted into a content stream.
#[derive(Debug, Clone)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f64, f64, f64, f64, f64, f64),
    /// Set stroke color RGB (RG)
    SetStrokeColorRgb(f64, f64, f64),
    /// Set fill color RGB (rg)
    SetFillColorRgb(f64, f64, f64),
    /// Set line width (w)
    SetLineWidth(f64),
    /// Set line cap style (J)
    SetLineCap(u8),
    /// Set line join style (j)
    SetLineJoin(u8),
    /// Move to (m)
    MoveTo(f64, f64),
    /// Line to (l)
    LineTo(f64, f64),
    /// Curve to (c)
    CurveTo(f64, f64, f64, f64, f64, f64),
    /// Close path (h)
    ClosePath,
    /// Stroke (S)
    Stroke,
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font /F1 and size (Tf)
    SetFont(f64),
    /// Set text matrix (Tm)
    SetTextMatrix(f64, f64),
    /// Show text (Tj)
    ShowText(String),
}

/// Accumulates operators and writes them out one per line.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentStreamOp>,
}

impl ContentStreamBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Render the accumulated operators to bytes, one operator per line.
    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for op in &self.operations {
            // Writing to a Vec cannot fail.
            write_op(&mut buf, op).expect("write to Vec");
            buf.push(b'\n');
        }
        buf
    }
}

fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    let n = format_number;
    match op {
        ContentStreamOp::SaveState => write!(w, "q"),
        ContentStreamOp::RestoreState => write!(w, "Q"),
        ContentStreamOp::Transform(a, b, c, d, e, f) => {
            write!(w, "{} {} {} {} {} {} cm", n(*a), n(*b), n(*c), n(*d), n(*e), n(*f))
        }
        ContentStreamOp::SetStrokeColorRgb(r, g, b) => {
            write!(w, "{} {} {} RG", n(*r), n(*g), n(*b))
        }
        ContentStreamOp::SetFillColorRgb(r, g, b) => {
            write!(w, "{} {} {} rg", n(*r), n(*g), n(*b))
        }
        ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", n(*width)),
        ContentStreamOp::SetLineCap(cap) => write!(w, "{} J", cap),
        ContentStreamOp::SetLineJoin(join) => write!(w, "{} j", join),
        ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", n(*x), n(*y)),
        ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", n(*x), n(*y)),
        ContentStreamOp::CurveTo(x1, y1, x2, y2, x3, y3) => {
            write!(w, "{} {} {} {} {} {} c", n(*x1), n(*y1), n(*x2), n(*y2), n(*x3), n(*y3))
        }
        ContentStreamOp::ClosePath => write!(w, "h"),
        ContentStreamOp::Stroke => write!(w, "S"),
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(size) => write!(w, "/F1 {} Tf", n(*size)),
        ContentStreamOp::SetTextMatrix(x, y) => write!(w, "1 0 0 1 {} {} Tm", n(*x), n(*y)),
        ContentStreamOp::ShowText(text) => {
            write!(w, "(")?;
            write_escaped(w, text)?;
            write!(w, ") Tj")
        }
    }
}

/// Escape `(`, `)` and `\` inside a literal string operand.
fn write_escaped<W: Write>(w: &mut W, text: &str) -> std::io::Result<()> {
    for byte in text.bytes() {
        if byte == b'(' || byte == b')' || byte == b'\\' {
            w.write_all(b"\\")?;
        }
        w.write_all(&[byte])?;
    }
    Ok(())
}

/// Render one page's elements into content-stream bytes.
///
/// The stream opens with a saved state, an identity CTM and default black
/// stroke/fill at one-point round-capped lines, replays the path elements
/// stroking each terminated path, then shows the text runs inside a single
/// `BT`/`ET` block, and closes with a state restore.
pub fn render_page(page: &Page) -> Vec<u8> {
    let mut builder = ContentStreamBuilder::new();
    builder
        .op(ContentStreamOp::SaveState)
        .op(ContentStreamOp::Transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0))
        .op(ContentStreamOp::SetStrokeColorRgb(0.0, 0.0, 0.0))
        .op(ContentStreamOp::SetFillColorRgb(0.0, 0.0, 0.0))
        .op(ContentStreamOp::SetLineWidth(1.0))
        .op(ContentStreamOp::SetLineCap(1))
        .op(ContentStreamOp::SetLineJoin(1));

    render_paths(&mut builder, &page.paths);
    render_texts(&mut builder, &page.texts);

    builder.op(ContentStreamOp::RestoreState);
    builder.build()
}

fn render_paths(builder: &mut ContentStreamBuilder, paths: &[PathElement]) {
    let mut path_open = false;
    for element in paths {
        match *element {
            PathElement::MoveTo(x, y) => {
                // A new subpath terminates the pending one.
                if path_open {
                    builder.op(ContentStreamOp::Stroke);
                }
                builder.op(ContentStreamOp::MoveTo(x, y));
                path_open = true;
            }
            PathElement::LineTo(x, y) => {
                builder.op(ContentStreamOp::LineTo(x, y));
            }
            PathElement::CurveTo(x1, y1, x2, y2, x3, y3) => {
                builder.op(ContentStreamOp::CurveTo(x1, y1, x2, y2, x3, y3));
            }
            PathElement::ClosePath => {
                builder.op(ContentStreamOp::ClosePath);
            }
        }
    }
    if path_open {
        builder.op(ContentStreamOp::Stroke);
    }
}

fn render_texts(builder: &mut ContentStreamBuilder, texts: &[TextElement]) {
    let Some(first) = texts.first() else {
        return;
    };

    builder
        .op(ContentStreamOp::BeginText)
        .op(ContentStreamOp::SetFont(first.font_size));

    for text in texts {
        builder
            .op(ContentStreamOp::SetFillColorRgb(
                text.color[0],
                text.color[1],
                text.color[2],
            ))
            .op(ContentStreamOp::SetTextMatrix(text.x, text.y))
            .op(ContentStreamOp::ShowText(text.text.clone()));
    }

    builder.op(ContentStreamOp::EndText);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(page: &Page) -> String {
        String::from_utf8_lossy(&render_page(page)).to_string()
    }

    fn page_with_paths(paths: Vec<PathElement>) -> Page {
        let mut page = Page::new(595.276, 841.890);
        page.paths = paths;
        page
    }

    fn text_at(text: &str, x: f64, y: f64) -> TextElement {
        TextElement {
            text: text.to_string(),
            x,
            y,
            font_name: "Helvetica".to_string(),
            font_size: 12.0,
            color: [0.0, 0.0, 0.0],
        }
    }

    #[test]
    fn test_stream_prolog_and_epilog() {
        let content = render_to_string(&Page::new(595.276, 841.890));
        assert!(content.starts_with("q\n1 0 0 1 0 0 cm\n"));
        assert!(content.contains("0 0 0 RG\n"));
        assert!(content.contains("0 0 0 rg\n"));
        assert!(content.contains("1 w\n1 J\n1 j\n"));
        assert!(content.ends_with("Q\n"));
    }

    #[test]
    fn test_path_replay_with_final_stroke() {
        let page = page_with_paths(vec![
            PathElement::MoveTo(10.0, 20.0),
            PathElement::LineTo(30.0, 40.0),
        ]);
        let content = render_to_string(&page);
        assert!(content.contains("10 20 m\n30 40 l\nS\n"));
    }

    #[test]
    fn test_new_subpath_strokes_pending_path() {
        let page = page_with_paths(vec![
            PathElement::MoveTo(0.0, 0.0),
            PathElement::LineTo(1.0, 1.0),
            PathElement::MoveTo(5.0, 5.0),
            PathElement::LineTo(6.0, 6.0),
        ]);
        let content = render_to_string(&page);
        assert!(content.contains("0 0 m\n1 1 l\nS\n5 5 m\n6 6 l\nS\n"));
    }

    #[test]
    fn test_curve_and_close() {
        let page = page_with_paths(vec![
            PathElement::MoveTo(0.0, 0.0),
            PathElement::CurveTo(1.0, 2.0, 3.0, 4.0, 5.0, 6.0),
            PathElement::ClosePath,
        ]);
        let content = render_to_string(&page);
        assert!(content.contains("1 2 3 4 5 6 c\nh\nS\n"));
    }

    #[test]
    fn test_text_block() {
        let mut page = Page::new(595.276, 841.890);
        page.texts = vec![text_at("Hello", 72.0, 120.5)];
        let content = render_to_string(&page);

        assert!(content.contains("BT\n/F1 12 Tf\n"));
        assert!(content.contains("1 0 0 1 72 120.5 Tm\n(Hello) Tj\n"));
        assert!(content.contains("ET\n"));
    }

    #[test]
    fn test_no_text_block_without_text() {
        let content = render_to_string(&Page::new(595.276, 841.890));
        assert!(!content.contains("BT"));
        assert!(!content.contains("ET"));
    }

    #[test]
    fn test_tj_operand_escaping() {
        let mut page = Page::new(595.276, 841.890);
        page.texts = vec![text_at("(a(b)c)", 0.0, 0.0)];
        let content = render_to_string(&page);
        assert!(content.contains(r"(\(a\(b\)c\)) Tj"));
    }

    #[test]
    fn test_per_text_color() {
        let mut page = Page::new(595.276, 841.890);
        let mut red = text_at("warning", 10.0, 10.0);
        red.color = [1.0, 0.0, 0.0];
        page.texts = vec![text_at("plain", 0.0, 0.0), red];

        let content = render_to_string(&page);
        assert!(content.contains("1 0 0 rg\n1 0 0 1 10 10 Tm\n(warning) Tj"));
    }
}
