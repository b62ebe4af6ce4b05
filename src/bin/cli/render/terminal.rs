use mllt_lib::resources::Entry;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Wrap `text` in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str, use_color: bool) -> String {
    paint(text, Color::BOLD, use_color)
}

pub fn dim(text: &str, use_color: bool) -> String {
    paint(text, Color::DIM, use_color)
}

/// One resource line: primary text, translation dimmed
pub fn render_entry(entry: &Entry, use_color: bool) -> String {
    if entry.has_translation() {
        format!("{}  {}", entry.primary, dim(&entry.translation, use_color))
    } else {
        entry.primary.clone()
    }
}

/// Words of a wrong answer, green where they match the expected word and
/// red where they do not. Without colors, mismatches are bracketed.
pub fn render_word_diff(words: &[(String, bool)], use_color: bool) -> String {
    words
        .iter()
        .map(|(word, ok)| match (ok, use_color) {
            (true, _) => paint(word, Color::GREEN, use_color),
            (false, true) => paint(word, Color::RED, true),
            (false, false) => format!("[{}]", word),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `[#####-----] 5/10`
pub fn progress_bar(done: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 { 0 } else { (done * width / total).min(width) };
    format!("[{}{}] {}/{}", "#".repeat(filled), "-".repeat(width - filled), done, total)
}

/// Truncate to `width` characters, marking the cut with `...`
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
