use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Left-aligns `s` in a column of `width` display cells.
pub fn pad_right(s: &str, width: usize) -> String {
    let mut out = s.to_string();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(s.width())));
    out
}

pub fn format_mb(kb: u64) -> String {
    format!("{:.2} MB", kb as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_untouched() {
        assert_eq!(truncate_unicode("bash", 23), "bash");
    }

    #[test]
    fn long_names_get_ellipsis() {
        let out = truncate_unicode("a-very-long-process-name-indeed", 10);
        assert_eq!(out, "a-very-lo\u{2026}");
        assert_eq!(out.width(), 10);
    }

    #[test]
    fn wide_chars_are_measured_by_cells() {
        let out = truncate_unicode("日本語のプロセス", 7);
        assert!(out.width() <= 7);
        assert!(out.ends_with('\u{2026}'));
    }

    #[test]
    fn pads_to_display_width() {
        assert_eq!(pad_right("ab", 5), "ab   ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }

    #[test]
    fn megabytes_two_decimals() {
        assert_eq!(format_mb(1_000_000), "976.56 MB");
    }
}
