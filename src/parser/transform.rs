//! PostScript user space to PDF page space mapping.

use crate::elements::BoundingBox;

/// Maps bottom-left-origin PostScript coordinates onto the top-left-origin
/// target page, scaled to fit and centered.
///
/// Derived once per document from the bounding box and the target page size;
/// applied to every coordinate before it enters the page model.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    page_height: f64,
}

impl CoordinateTransform {
    /// Build the transform for a source bounding box and target page size.
    pub fn new(bbox: &BoundingBox, page_width: f64, page_height: f64) -> Self {
        let ps_width = bbox.width();
        let ps_height = bbox.height();

        // A degenerate box cannot be fitted; fall back to a 1:1 mapping.
        let scale = if ps_width > 0.0 && ps_height > 0.0 {
            (page_width / ps_width).min(page_height / ps_height)
        } else {
            1.0
        };

        let offset_x = (page_width - ps_width * scale) / 2.0;
        let offset_y = (page_height - ps_height * scale) / 2.0;

        Self {
            scale,
            offset_x,
            offset_y,
            page_height,
        }
    }

    /// Transform a point from PostScript space to target page space.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale + self.offset_x,
            self.page_height - (y * self.scale + self.offset_y),
        )
    }

    /// The uniform scale factor applied to both axes.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{A4_HEIGHT, A4_WIDTH};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_identity_scale_for_matching_box() {
        let bbox = BoundingBox::default();
        let t = CoordinateTransform::new(&bbox, A4_WIDTH, A4_HEIGHT);
        assert_close(t.scale(), 1.0);

        let (x, y) = t.apply(100.0, 100.0);
        assert_close(x, 100.0);
        assert_close(y, A4_HEIGHT - 100.0);
    }

    #[test]
    fn test_small_box_is_scaled_and_centered() {
        let bbox = BoundingBox {
            x1: 0.0,
            y1: 0.0,
            x2: 200.0,
            y2: 200.0,
        };
        let t = CoordinateTransform::new(&bbox, A4_WIDTH, A4_HEIGHT);

        // Width is the limiting dimension: scale = 595.276 / 200.
        let scale = A4_WIDTH / 200.0;
        assert_close(t.scale(), scale);

        let (x, y) = t.apply(10.0, 10.0);
        assert_close(x, 10.0 * scale);
        let offset_y = (A4_HEIGHT - 200.0 * scale) / 2.0;
        assert_close(y, A4_HEIGHT - (10.0 * scale + offset_y));
    }

    #[test]
    fn test_y_axis_flips_to_top_left_origin() {
        let bbox = BoundingBox::default();
        let t = CoordinateTransform::new(&bbox, A4_WIDTH, A4_HEIGHT);

        let (_, y_bottom) = t.apply(0.0, 0.0);
        let (_, y_top) = t.apply(0.0, A4_HEIGHT);
        assert_close(y_bottom, A4_HEIGHT);
        assert_close(y_top, 0.0);
    }

    #[test]
    fn test_degenerate_box_falls_back_to_unit_scale() {
        let bbox = BoundingBox {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 0.0,
        };
        let t = CoordinateTransform::new(&bbox, A4_WIDTH, A4_HEIGHT);
        assert_close(t.scale(), 1.0);
    }
}
