//! PostScript-subset parser.
//!
//! Interprets a constrained, non-Turing-complete command subset: path
//! construction, graphics state save/restore, color and line width, `show`
//! text and `showpage`. There is no operand stack and no procedures; each
//! operator looks backward at the numeric tokens immediately preceding it.
//!
//! Internal failures never escape [`PostScriptParser::parse`]: malformed
//! lines are downgraded to sink warnings and skipped. Only an unreadable
//! input file is fatal.

pub mod dsc;
pub mod graphics_state;
pub mod tokenizer;
pub mod transform;

use std::path::Path;

use crate::config::ConvertOptions;
use crate::elements::{BoundingBox, Page, PageModel, PathElement, TextElement};
use crate::error::{code, Error, ErrorSink, Result};

use graphics_state::GraphicsState;
use tokenizer::Tokenizer;
use transform::CoordinateTransform;

/// Graphics-state machine and path builder for the PostScript subset.
///
/// Holds mutable interpretation state; use one instance per conversion.
#[derive(Debug)]
pub struct PostScriptParser {
    page_width: f64,
    page_height: f64,
    state: GraphicsState,
    state_stack: Vec<GraphicsState>,
    pending_path: Vec<PathElement>,
    pages: Vec<Page>,
    transform: CoordinateTransform,
}

impl PostScriptParser {
    /// Create a parser targeting the page size from `options`.
    pub fn new(options: &ConvertOptions) -> Self {
        let bbox = BoundingBox::default();
        Self {
            page_width: options.page_width,
            page_height: options.page_height,
            state: GraphicsState::default(),
            state_stack: Vec::new(),
            pending_path: Vec::new(),
            pages: Vec::new(),
            transform: CoordinateTransform::new(&bbox, options.page_width, options.page_height),
        }
    }

    /// Parse a file. Fatal only when the file cannot be read.
    pub fn parse_file(
        &mut self,
        path: impl AsRef<Path>,
        sink: &mut ErrorSink,
    ) -> Result<PageModel> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            let err = Error::InputUnreadable {
                path: path.display().to_string(),
                source,
            };
            sink.set_error(code::INPUT_OPEN_FAILED, err.to_string());
            err
        })?;
        Ok(self.parse(&content, sink))
    }

    /// Parse in-memory PostScript text into a page model.
    ///
    /// Never fails: malformed lines are logged to `sink` as warnings and
    /// skipped, and at least one page always exists in the result.
    pub fn parse(&mut self, content: &str, sink: &mut ErrorSink) -> PageModel {
        self.reset();

        let lines: Vec<&str> = content
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        let info = dsc::scan(lines.iter().copied());
        let bounding_box = info.bounding_box.unwrap_or_default();
        self.transform = CoordinateTransform::new(&bounding_box, self.page_width, self.page_height);

        self.pages.push(Page::new(self.page_width, self.page_height));

        for line in &lines {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }
            let tokens: Vec<String> = Tokenizer::new(trimmed).collect();
            self.interpret(&tokens, sink);
        }

        // A showpage at end of input opens a page that never receives
        // content; drop it rather than emitting a blank trailing page.
        if self.pages.len() > 1 && self.pages.last().is_some_and(Page::is_empty) {
            self.pages.pop();
        }

        sink.info(format!(
            "PostScript parsing completed: {} page(s)",
            self.pages.len()
        ));

        PageModel {
            pages: std::mem::take(&mut self.pages),
            title: info.title,
            creator: info.creator,
            bounding_box,
            dsc_compliant: info.dsc_compliant,
        }
    }

    fn reset(&mut self) {
        self.state = GraphicsState::default();
        self.state_stack.clear();
        self.pending_path.clear();
        self.pages.clear();
    }

    fn interpret(&mut self, tokens: &[String], sink: &mut ErrorSink) {
        for i in 0..tokens.len() {
            match tokens[i].as_str() {
                "gsave" | "q" => self.state_stack.push(self.state.clone()),
                "grestore" | "Q" => {
                    if let Some(saved) = self.state_stack.pop() {
                        self.state = saved;
                    } else {
                        log::debug!("grestore with empty state stack ignored");
                    }
                }
                op @ ("setlinewidth" | "w") => {
                    if let Some([width]) = self.operands::<1>(tokens, i, op, sink) {
                        self.state.line_width = width;
                    }
                }
                op @ ("setrgbcolor" | "rg") => {
                    if let Some(rgb) = self.operands::<3>(tokens, i, op, sink) {
                        self.state.color = rgb;
                    }
                }
                op @ ("moveto" | "m") => {
                    if let Some([x, y]) = self.operands::<2>(tokens, i, op, sink) {
                        let (x, y) = self.transform.apply(x, y);
                        self.state.current_x = x;
                        self.state.current_y = y;
                        self.pending_path.push(PathElement::MoveTo(x, y));
                    }
                }
                op @ ("lineto" | "l") => {
                    if let Some([x, y]) = self.operands::<2>(tokens, i, op, sink) {
                        let (x, y) = self.transform.apply(x, y);
                        self.state.current_x = x;
                        self.state.current_y = y;
                        self.pending_path.push(PathElement::LineTo(x, y));
                    }
                }
                op @ ("curveto" | "c") => {
                    if let Some([x1, y1, x2, y2, x3, y3]) = self.operands::<6>(tokens, i, op, sink)
                    {
                        let (x1, y1) = self.transform.apply(x1, y1);
                        let (x2, y2) = self.transform.apply(x2, y2);
                        let (x3, y3) = self.transform.apply(x3, y3);
                        self.state.current_x = x3;
                        self.state.current_y = y3;
                        self.pending_path
                            .push(PathElement::CurveTo(x1, y1, x2, y2, x3, y3));
                    }
                }
                "closepath" | "h" => self.pending_path.push(PathElement::ClosePath),
                "stroke" | "s" | "S" | "fill" | "f" | "F" => self.flush_path(),
                op @ ("show" | "Tj") => self.show_text(tokens, i, op, sink),
                "showpage" => {
                    // The current page is already in the list; just open the
                    // next one.
                    self.pages.push(Page::new(self.page_width, self.page_height));
                }
                op @ "findfont" => {
                    match i.checked_sub(1).map(|p| tokens[p].as_str()) {
                        Some(name) if name.starts_with('/') && name.len() > 1 => {
                            self.state.font_name = name[1..].to_string();
                        }
                        _ => self.warn_operator(op, "expects a /Name operand", sink),
                    }
                }
                op @ "scalefont" => {
                    if let Some([size]) = self.operands::<1>(tokens, i, op, sink) {
                        self.state.font_size = size;
                    }
                }
                // setfont applies the state already captured by
                // findfont/scalefont; everything else is outside the subset.
                _ => {}
            }
        }
    }

    /// Collect the N numeric operands immediately preceding the operator at
    /// index `i`, warning and returning None when they are missing.
    fn operands<const N: usize>(
        &mut self,
        tokens: &[String],
        i: usize,
        op: &str,
        sink: &mut ErrorSink,
    ) -> Option<[f64; N]> {
        if i < N {
            self.warn_operator(op, &format!("expects {N} numeric operand(s)"), sink);
            return None;
        }
        let mut values = [0.0; N];
        for (slot, token) in values.iter_mut().zip(&tokens[i - N..i]) {
            match token.parse::<f64>() {
                Ok(value) => *slot = value,
                Err(_) => {
                    self.warn_operator(op, &format!("non-numeric operand '{token}'"), sink);
                    return None;
                }
            }
        }
        Some(values)
    }

    fn warn_operator(&self, op: &str, reason: &str, sink: &mut ErrorSink) {
        let err = Error::MalformedOperator {
            op: op.to_string(),
            reason: reason.to_string(),
        };
        sink.warn(err.to_string());
    }

    /// Commit the pending path to the current page and clear the buffer.
    fn flush_path(&mut self) {
        if self.pending_path.is_empty() {
            return;
        }
        if let Some(page) = self.pages.last_mut() {
            page.paths.append(&mut self.pending_path);
        }
    }

    fn show_text(&mut self, tokens: &[String], i: usize, op: &str, sink: &mut ErrorSink) {
        let operand = match i.checked_sub(1).map(|p| tokens[p].as_str()) {
            Some(t) if t.len() >= 2 && t.starts_with('(') && t.ends_with(')') => t,
            _ => {
                self.warn_operator(op, "expects a parenthesized string operand", sink);
                return;
            }
        };

        let element = TextElement {
            text: operand[1..operand.len() - 1].to_string(),
            // The current point was transformed when it was set.
            x: self.state.current_x,
            y: self.state.current_y,
            font_name: self.state.font_name.clone(),
            font_size: self.state.font_size,
            color: self.state.color,
        };
        if let Some(page) = self.pages.last_mut() {
            page.texts.push(element);
        }
    }
}
