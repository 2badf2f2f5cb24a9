//! Parser-side graphics state.

/// The graphics state tracked while interpreting PostScript commands.
///
/// The state is copied wholesale on `gsave` and restored wholesale on
/// `grestore`. The current point is stored in target (PDF) coordinates; the
/// transform matrix rides along for save/restore even though no operator in
/// the supported subset concatenates onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    /// Current point x, in target coordinates.
    pub current_x: f64,
    /// Current point y, in target coordinates.
    pub current_y: f64,
    /// Stroke line width in points.
    pub line_width: f64,
    /// RGB color components in 0..=1.
    pub color: [f64; 3],
    /// Current font name.
    pub font_name: String,
    /// Current font size in points.
    pub font_size: f64,
    /// Transform matrix [a b c d e f].
    pub matrix: [f64; 6],
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            current_x: 0.0,
            current_y: 0.0,
            line_width: 1.0,
            color: [0.0, 0.0, 0.0],
            font_name: "Helvetica".to_string(),
            font_size: 12.0,
            matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = GraphicsState::default();
        assert_eq!(state.line_width, 1.0);
        assert_eq!(state.color, [0.0, 0.0, 0.0]);
        assert_eq!(state.font_name, "Helvetica");
        assert_eq!(state.font_size, 12.0);
        assert_eq!(state.matrix, [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_save_restore_is_wholesale_copy() {
        let mut state = GraphicsState::default();
        let saved = state.clone();

        state.color = [1.0, 0.0, 0.0];
        state.current_x = 42.0;
        state.font_size = 24.0;

        state = saved;
        assert_eq!(state, GraphicsState::default());
    }
}
