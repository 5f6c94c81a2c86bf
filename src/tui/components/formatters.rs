// Shared text helpers for fixed-width terminal columns
//
// Widths are display widths (unicode-width), so `₹` and Devanagari names line
// up the same as ASCII.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` to at most `width` columns, marking the cut with `…`
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Left-align `s` in exactly `width` columns
pub fn pad_right(s: &str, width: usize) -> String {
    let s = truncate(s, width);
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

/// Right-align `s` in exactly `width` columns
pub fn pad_left(s: &str, width: usize) -> String {
    let s = truncate(s, width);
    let fill = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(fill), s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Tuition Fee", 20), "Tuition Fee");
        assert_eq!(truncate("Tuition Fee", 5), "Tuit…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn padding_uses_display_width() {
        assert_eq!(pad_right("₹1500", 7), "₹1500  ");
        assert_eq!(pad_left("₹1500", 7), "  ₹1500");
        assert_eq!(pad_right("toolong", 4).width(), 4);
    }
}
