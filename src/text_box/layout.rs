//! Character boundary layout and caret hit-testing
//!
//! Font metrics are never cached: the painter supplies a [`TextMeasure`] and
//! boundaries are recomputed whenever they are asked for.

/// Glyph advance widths for a single line of text
pub trait TextMeasure {
    fn char_width(&self, ch: char) -> i32;
}

/// Every glyph has the same advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMeasure {
    pub width: i32,
}

impl MonospaceMeasure {
    pub const fn new(width: i32) -> Self {
        Self { width }
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(10)
    }
}

impl TextMeasure for MonospaceMeasure {
    #[inline]
    fn char_width(&self, _ch: char) -> i32 {
        self.width
    }
}

impl<F> TextMeasure for F
where
    F: Fn(char) -> i32,
{
    #[inline]
    fn char_width(&self, ch: char) -> i32 {
        self(ch)
    }
}

/// Pixel x of every caret boundary: `len + 1` entries, the first at `left`,
/// each next one advanced by the width of the char in between.
pub fn char_positions<M: TextMeasure + ?Sized>(text: &str, left: i32, measure: &M) -> Vec<i32> {
    let mut positions = Vec::with_capacity(text.len() + 1);
    let mut x = left;
    positions.push(x);
    for ch in text.chars() {
        x += measure.char_width(ch);
        positions.push(x);
    }
    positions
}

/// Caret index nearest to `x`.
///
/// Walks the boundaries left to right and stops at the first one whose
/// distance to `x` grows, returning the boundary before it. Equal distances
/// keep walking, so zero-width glyphs don't stop the scan early. This
/// assumes the distances form a single valley, which holds for
/// left-to-right single-line text only.
pub fn caret_index_at(positions: &[i32], x: i32) -> usize {
    let Some((&first, rest)) = positions.split_first() else {
        return 0;
    };
    let mut last_distance = (first - x).abs();
    for (i, &boundary) in rest.iter().enumerate() {
        let distance = (boundary - x).abs();
        if distance > last_distance {
            return i;
        }
        last_distance = distance;
    }
    positions.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_start_at_left_padding() {
        let positions = char_positions("abc", 10, &MonospaceMeasure::new(8));
        assert_eq!(positions, vec![10, 18, 26, 34]);
    }

    #[test]
    fn test_positions_use_measure_closure() {
        let narrow_i = |ch: char| if ch == 'i' { 3 } else { 9 };
        let positions = char_positions("hi!", 0, &narrow_i);
        assert_eq!(positions, vec![0, 9, 12, 21]);
    }

    #[test]
    fn test_positions_empty_text() {
        assert_eq!(char_positions("", 10, &MonospaceMeasure::default()), vec![10]);
    }

    #[test]
    fn test_caret_index_nearest_boundary() {
        let positions = [10, 20, 30, 40];
        assert_eq!(caret_index_at(&positions, 0), 0);
        assert_eq!(caret_index_at(&positions, 14), 0);
        assert_eq!(caret_index_at(&positions, 17), 1);
        assert_eq!(caret_index_at(&positions, 31), 2);
    }

    #[test]
    fn test_caret_index_reaches_last_boundary() {
        let positions = [10, 20, 30, 40];
        assert_eq!(caret_index_at(&positions, 39), 3);
        assert_eq!(caret_index_at(&positions, 500), 3);
    }

    #[test]
    fn test_caret_index_midpoint_takes_later_boundary() {
        assert_eq!(caret_index_at(&[10, 20, 30], 15), 1);
        assert_eq!(caret_index_at(&[10, 20, 30], 25), 2);
    }

    #[test]
    fn test_caret_index_skips_zero_width_glyph() {
        let positions = [10, 10, 20];
        assert_eq!(caret_index_at(&positions, 19), 2);
    }

    #[test]
    fn test_caret_index_without_boundaries() {
        assert_eq!(caret_index_at(&[], 5), 0);
    }
}
