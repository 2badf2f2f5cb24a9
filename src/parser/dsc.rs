//! Document Structuring Convention (`%%`) header extraction.

use lazy_static::lazy_static;
use regex::Regex;

use crate::elements::BoundingBox;

lazy_static! {
    static ref BBOX_RE: Regex = Regex::new(
        r"%%BoundingBox:\s*(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)"
    )
    .expect("bounding box pattern is valid");
}

/// Metadata pulled from the DSC header comments.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    /// `%%Title:` value.
    pub title: Option<String>,
    /// `%%Creator:` value.
    pub creator: Option<String>,
    /// `%%BoundingBox:` value, if a well-formed one was present.
    pub bounding_box: Option<BoundingBox>,
    /// Whether any `%%` comment line was seen.
    pub dsc_compliant: bool,
}

/// Scan all lines for DSC header comments.
///
/// Later occurrences override earlier ones, matching how a trailing
/// `%%BoundingBox` in the document body wins over the header hint.
pub fn scan<'a, I>(lines: I) -> DocumentInfo
where
    I: IntoIterator<Item = &'a str>,
{
    let mut info = DocumentInfo::default();

    for line in lines {
        if !line.starts_with("%%") {
            continue;
        }
        info.dsc_compliant = true;

        if let Some(value) = line.strip_prefix("%%Title:") {
            info.title = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("%%Creator:") {
            info.creator = Some(value.trim().to_string());
        } else if line.starts_with("%%BoundingBox:") {
            if let Some(bbox) = parse_bounding_box(line) {
                info.bounding_box = Some(bbox);
            }
        }
    }

    info
}

fn parse_bounding_box(line: &str) -> Option<BoundingBox> {
    let captures = BBOX_RE.captures(line)?;
    // The pattern only matches valid numbers, so the parses cannot fail.
    let field = |i: usize| captures[i].parse::<f64>().ok();
    Some(BoundingBox {
        x1: field(1)?,
        y1: field(2)?,
        x2: field(3)?,
        y2: field(4)?,
    })
}
