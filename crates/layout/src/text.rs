//! Fixed-metric text measurement and greedy line breaking.

/// Advance width of every glyph, in ems.
pub const CHAR_WIDTH_EM: f32 = 0.5;
/// Distance between baselines, in ems.
pub const LINE_HEIGHT_EM: f32 = 1.2;

pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * CHAR_WIDTH_EM
}

pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_EM
}

/// Breaks `text` into lines no wider than `width`.
///
/// Whitespace runs collapse to single spaces. Words wider than a whole line
/// are cut at the line width.
pub fn wrap_lines(text: &str, width: f32, font_size: f32) -> Vec<String> {
    let max_chars = ((width / (font_size * CHAR_WIDTH_EM)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}
