use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to at most `max_cells` cells, ending with `…` when cut.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1; // room for '…'
    let mut width = 0;
    let mut result = String::new();
    for g in s.graphemes(true) {
        let gw = display_width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(g);
    }
    result.push('\u{2026}');
    result
}

/// Truncate, then right-pad with spaces to exactly `cells` cells.
pub fn fit_to_width(s: &str, cells: usize) -> String {
    let mut out = truncate_to_width(s, cells);
    let w = display_width(&out);
    if w < cells {
        out.push_str(&" ".repeat(cells - w));
    }
    out
}

/// The longest suffix of `s` that fits in `max_cells` cells.
pub fn tail_to_width(s: &str, max_cells: usize) -> &str {
    let mut width = 0;
    let mut start = s.len();
    for (i, g) in s.grapheme_indices(true).rev() {
        let gw = display_width(g);
        if width + gw > max_cells {
            break;
        }
        width += gw;
        start = i;
    }
    &s[start..]
}

/// Next grapheme boundary after `byte_offset`. None at end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    s[byte_offset..]
        .grapheme_indices(true)
        .nth(1)
        .map(|(i, _)| byte_offset + i)
        .or(Some(s.len()))
}

/// Previous grapheme boundary before `byte_offset`. None at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset].grapheme_indices(true).last().map(|(i, _)| i)
}

/// Largest char boundary not after `byte_offset`
pub fn clamp_to_boundary(s: &str, byte_offset: usize) -> usize {
    let mut i = byte_offset.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_mixed() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_no_truncation_needed() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_to_width("hello world", 8), "hello w\u{2026}");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn truncate_cjk_boundary() {
        // "日本語" is 6 cells; 4 cells leaves room for one wide char + '…'
        assert_eq!(truncate_to_width("日本語", 4), "日\u{2026}");
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit_to_width("ab", 4), "ab  ");
        assert_eq!(fit_to_width("abcdef", 4), "abc\u{2026}");
        assert_eq!(fit_to_width("日", 3), "日 ");
    }

    #[test]
    fn tail_keeps_suffix() {
        assert_eq!(tail_to_width("hello", 3), "llo");
        assert_eq!(tail_to_width("hello", 9), "hello");
        assert_eq!(tail_to_width("日本語", 3), "語");
        assert_eq!(tail_to_width("abc", 0), "");
    }

    #[test]
    fn grapheme_boundaries() {
        let s = "ae\u{301}b"; // 'é' as e + combining acute
        assert_eq!(next_grapheme_boundary(s, 0), Some(1));
        assert_eq!(next_grapheme_boundary(s, 1), Some(4));
        assert_eq!(next_grapheme_boundary(s, 4), Some(5));
        assert_eq!(next_grapheme_boundary(s, 5), None);
        assert_eq!(prev_grapheme_boundary(s, 5), Some(4));
        assert_eq!(prev_grapheme_boundary(s, 4), Some(1));
        assert_eq!(prev_grapheme_boundary(s, 0), None);
    }

    #[test]
    fn clamp_boundary() {
        let s = "aé";
        assert_eq!(clamp_to_boundary(s, 2), 1);
        assert_eq!(clamp_to_boundary(s, 99), 3);
    }
}
