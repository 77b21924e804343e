//! Glyph projection for confetti cells.

use saekjongi_core::Shape;

/// Width ramp for rect confetti, thinnest to widest.
const WIDTH_RAMP: &[char] = &['▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Ramp used while the tumble faces the other way. The terminal block
/// set has no fine-grained right-anchored eighths, so the narrow steps
/// collapse onto the nearest available glyph.
const MIRROR_RAMP: &[char] = &['▕', '▕', '▐', '▐', '▐', '▐', '▉', '█'];

/// Scale magnitudes below this render nothing (particle edge-on).
const EDGE_ON: f32 = 0.05;

/// Map a particle's signed horizontal scale factor to a cell glyph.
///
/// The magnitude selects the glyph width; the sign selects which
/// half-block family the tumble currently presents. Circle confetti
/// have no draw path and always project to `None`.
pub fn cell_glyph(shape: Shape, scale_x: f32) -> Option<char> {
    if shape == Shape::Circle {
        return None;
    }

    let magnitude = scale_x.abs().min(1.0);
    if magnitude < EDGE_ON {
        return None;
    }

    let ramp = if scale_x >= 0.0 { WIDTH_RAMP } else { MIRROR_RAMP };
    let idx = ((magnitude * ramp.len() as f32).ceil() as usize - 1).min(ramp.len() - 1);
    Some(ramp[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_has_no_glyph() {
        assert_eq!(cell_glyph(Shape::Circle, 1.0), None);
        assert_eq!(cell_glyph(Shape::Circle, -0.5), None);
    }

    #[test]
    fn test_edge_on_has_no_glyph() {
        assert_eq!(cell_glyph(Shape::Rect, 0.0), None);
        assert_eq!(cell_glyph(Shape::Rect, 0.04), None);
        assert_eq!(cell_glyph(Shape::Rect, -0.04), None);
    }

    #[test]
    fn test_full_scale_is_full_block() {
        assert_eq!(cell_glyph(Shape::Rect, 1.0), Some('█'));
        assert_eq!(cell_glyph(Shape::Rect, -1.0), Some('█'));
    }

    #[test]
    fn test_width_grows_with_magnitude() {
        let widths: Vec<usize> = [0.1, 0.3, 0.5, 0.8, 1.0]
            .iter()
            .map(|&scale| {
                let glyph = cell_glyph(Shape::Rect, scale).unwrap();
                WIDTH_RAMP.iter().position(|&c| c == glyph).unwrap()
            })
            .collect();
        assert!(widths.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_sign_selects_family() {
        assert_eq!(cell_glyph(Shape::Rect, 0.5), Some('▌'));
        assert_eq!(cell_glyph(Shape::Rect, -0.5), Some('▐'));
    }

    #[test]
    fn test_ramps_share_length() {
        assert_eq!(WIDTH_RAMP.len(), MIRROR_RAMP.len());
    }
}
