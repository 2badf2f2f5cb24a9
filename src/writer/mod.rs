//! PDF generation: object graph construction, content-stream rendering and
//! sequential serialization with a classic cross-reference table.

pub mod content_stream;
pub mod object_serializer;
pub mod pdf_writer;

pub use content_stream::render_page;
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::PdfWriter;

/// Format a number the way PDF syntax expects: integers without a decimal
/// point, reals with up to five decimals and trailing zeros trimmed.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.5}", value);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(595.276), "595.276");
        assert_eq!(format_number(841.890), "841.89");
        assert_eq!(format_number(1.23456789), "1.23457");
    }
}
