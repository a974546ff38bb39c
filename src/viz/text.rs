//! Text measurement, truncation, and wrapping for axis labels and the tooltip.

/// Heuristic: estimate pixel width of text (neither backend measures for us up front).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Truncate to fit `max_px`, ending with a single ellipsis if anything was cut.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) + estimate_text_width_px("…", font_px) > max_px {
            out.pop();
            break;
        }
    }
    out.push('…');
    out
}

/// Fit a label into `max_px` by stepping the font down from `font_px` to `min_font_px`;
/// only when even the smallest size is too wide is the text truncated.
pub fn fit_to_width(text: &str, font_px: u32, min_font_px: u32, max_px: u32) -> (String, u32) {
    let min_font_px = min_font_px.min(font_px);
    (min_font_px..=font_px)
        .rev()
        .find(|&px| estimate_text_width_px(text, px) <= max_px)
        .map(|px| (text.to_string(), px))
        .unwrap_or_else(|| (truncate_to_width(text, min_font_px, max_px), min_font_px))
}

/// Greedy word wrap to `max_px`; single words that are too long are truncated.
pub fn wrap_text_to_width(text: &str, font_px: u32, max_px: u32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let candidate = if cur.is_empty() {
            word.to_string()
        } else {
            format!("{cur} {word}")
        };
        if estimate_text_width_px(&candidate, font_px) <= max_px {
            cur = candidate;
        } else {
            if !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
            }
            cur = truncate_to_width(word, font_px, max_px);
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Bihar", 12, 200), "Bihar");
    }

    #[test]
    fn long_text_gets_ellipsis_and_fits() {
        let t = truncate_to_width("Andaman and Nicobar Islands", 12, 70);
        assert!(t.ends_with('…'));
        assert!(estimate_text_width_px(&t, 12) <= 70);
    }

    #[test]
    fn fitting_shrinks_before_cutting() {
        assert_eq!(fit_to_width("Bihar", 12, 9, 72), ("Bihar".to_string(), 12));
        assert_eq!(fit_to_width("West Bengal", 12, 9, 72), ("West Bengal".to_string(), 10));
        assert_eq!(fit_to_width("Uttar Pradesh", 12, 9, 72), ("Uttar Pradesh".to_string(), 9));

        let (text, px) = fit_to_width("Dadra and Nagar Haveli", 12, 9, 72);
        assert_eq!(px, 9);
        assert!(text.ends_with('…'));
        assert!(estimate_text_width_px(&text, 9) <= 72);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_text_to_width("TempMean: 25.43", 12, 90);
        assert_eq!(lines, vec!["TempMean:".to_string(), "25.43".to_string()]);
    }
}
