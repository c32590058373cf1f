//! Approximate text metrics.
//!
//! Figures are plain SVG with a generic sans-serif font stack, so exact glyph
//! advances are not available at render time. Margins and legend boxes only
//! need a close estimate; this table-based measure stays within a few percent
//! of typical sans-serif metrics.

use crate::primitives::TextStyle;

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

/// Advance width of one character in em units.
fn char_advance(ch: char) -> f64 {
    match ch {
        'i' | 'j' | 'l' | '!' | '|' | '\'' | '.' | ',' | ':' | ';' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '{' | '}' | '/' | '\\' => 0.36,
        ' ' => 0.30,
        'm' | 'w' | 'M' | 'W' | '@' => 0.86,
        'A'..='Z' | '0'..='9' | '#' | '_' => 0.64,
        _ => 0.52,
    }
}

/// Measure text width and height in points for the given font size.
pub fn measure_text(text: &str, size_pt: f64) -> TextMetrics {
    let em: f64 = text.chars().map(char_advance).sum();
    TextMetrics { width: em * size_pt, height: size_pt * 1.2, ascent: size_pt * 0.8 }
}

/// Measure text with a TextStyle (bold runs slightly wider).
pub fn measure_styled(text: &str, style: &TextStyle) -> TextMetrics {
    let mut m = measure_text(text, style.size);
    if style.weight == crate::primitives::FontWeight::Bold {
        m.width *= 1.05;
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_scales_with_size() {
        let small = measure_text("Hello", 10.0);
        let big = measure_text("Hello", 20.0);
        assert!((big.width - 2.0 * small.width).abs() < 1e-9);
        assert!(small.width > 20.0);
        assert!(small.ascent > 0.0);
    }

    #[test]
    fn narrow_text_is_narrower() {
        let narrow = measure_text("iiiii", 12.0);
        let wide = measure_text("mmmmm", 12.0);
        assert!(wide.width > 2.0 * narrow.width);
    }

    #[test]
    fn bold_is_wider() {
        use crate::primitives::{FontWeight, TextStyle};
        let style = TextStyle::default();
        let bold = TextStyle { weight: FontWeight::Bold, ..style.clone() };
        assert!(measure_styled("Test", &bold).width > measure_styled("Test", &style).width);
    }
}
