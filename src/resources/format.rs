//! Resource file line formats
//!
//! Inline: one entry per line, primary text and translation joined by the
//! first delimiter found, tried in priority order (` ->> `, tab, space,
//! `/`, `:`, `：`).
//!
//! Paired: blank-line separated records, first line primary text, second line
//! translation.
//!
//! A leading `#format: inline` / `#format: paired` line pins the format.
//! Without it, non-word resources try paired first and fall back to inline.

use super::models::{Entry, ResourceType};

/// Delimiter emitted on write
pub const SEPARATOR: &str = " ->> ";

const FORMAT_MARKER: &str = "#format:";

const FALLBACK_SEPARATORS: [&str; 3] = ["/", ":", "："];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    Inline,
    Paired,
}

impl LineFormat {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Paired => "paired",
        }
    }
}

/// Split one inline line into `(primary, translation)`
pub fn parse_line(line: &str) -> (String, String) {
    if let Some((primary, translation)) = line.split_once(SEPARATOR) {
        return (primary.trim().to_string(), translation.trim().to_string());
    }

    // A delimiter at position 0 does not count
    for delimiter in ['\t', ' '] {
        if let Some(idx) = line.find(delimiter).filter(|&idx| idx > 0) {
            let (primary, rest) = line.split_at(idx);
            return (
                primary.trim().to_string(),
                rest[delimiter.len_utf8()..].trim().to_string(),
            );
        }
    }

    for separator in FALLBACK_SEPARATORS {
        if let Some((primary, translation)) = line.split_once(separator) {
            return (primary.trim().to_string(), translation.trim().to_string());
        }
    }

    (line.trim().to_string(), String::new())
}

impl Entry {
    /// Parse a single inline-format line
    pub fn parse(line: &str) -> Self {
        let (primary, translation) = parse_line(line);
        Self { primary, translation }
    }

    /// Parse an item typed by the user: only ` ->> ` separates the
    /// translation, so `take off` stays one primary
    pub fn from_item(text: &str) -> Self {
        let (primary, translation) = text.split_once(SEPARATOR).unwrap_or((text, ""));
        Self::new(primary.trim(), translation.trim())
    }

    /// Inline form written back to disk.
    ///
    /// A lone primary that itself contains a delimiter gets a trailing
    /// separator so it reads back unsplit.
    pub fn to_line(&self) -> String {
        if self.has_translation() {
            return format!("{}{}{}", self.primary, SEPARATOR, self.translation);
        }
        if contains_delimiter(&self.primary) {
            format!("{}{}", self.primary, SEPARATOR)
        } else {
            self.primary.clone()
        }
    }
}

fn contains_delimiter(text: &str) -> bool {
    text.contains(['\t', ' ']) || FALLBACK_SEPARATORS.iter().any(|sep| text.contains(sep))
}

/// Strip a leading format marker, if any
fn split_marker(content: &str) -> (Option<LineFormat>, &str) {
    let trimmed = content.trim_start();
    let (first, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));

    match first.trim().strip_prefix(FORMAT_MARKER).map(str::trim) {
        Some("inline") => (Some(LineFormat::Inline), rest),
        Some("paired") => (Some(LineFormat::Paired), rest),
        _ => (None, content),
    }
}

/// Parse every non-blank line as an inline entry
pub fn parse_inline(content: &str) -> Vec<Entry> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Entry::parse(line.trim_end_matches('\r')))
        .collect()
}

/// Parse blank-line separated records. Returns `None` when the content does
/// not look like paired records: a record with more than two lines, a
/// primary line that already carries the inline separator, or no records.
pub fn parse_paired(content: &str) -> Option<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut primary: Option<&str> = None;
    let mut translation: Option<&str> = None;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() {
            if let Some(p) = primary.take() {
                entries.push(Entry::new(p, translation.take().unwrap_or("")));
            }
            continue;
        }

        if primary.is_none() {
            if line.contains(SEPARATOR) {
                return None;
            }
            primary = Some(line);
        } else if translation.is_none() {
            translation = Some(line);
        } else {
            return None;
        }
    }

    if let Some(p) = primary {
        entries.push(Entry::new(p, translation.unwrap_or("")));
    }

    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}

/// Parse resource file content for the given type
pub fn parse_resource(content: &str, resource_type: ResourceType) -> Vec<Entry> {
    match split_marker(content) {
        (Some(LineFormat::Inline), body) => parse_inline(body),
        (Some(LineFormat::Paired), body) => parse_paired(body).unwrap_or_else(|| {
            if !body.trim().is_empty() {
                log::warn!("Content marked as paired is not paired records, reading it inline");
            }
            parse_inline(body)
        }),
        (None, body) => {
            if resource_type != ResourceType::Words {
                if let Some(entries) = parse_paired(body) {
                    return entries;
                }
            }
            parse_inline(body)
        }
    }
}

/// Render entries as an inline-format file. Non-word types carry an explicit
/// marker so the paired heuristic never misreads them.
pub fn render_resource(entries: &[Entry], resource_type: ResourceType) -> String {
    let mut out = String::new();
    if resource_type != ResourceType::Words {
        out.push_str(FORMAT_MARKER);
        out.push(' ');
        out.push_str(LineFormat::Inline.as_str());
        out.push('\n');
    }
    for entry in entries {
        out.push_str(&entry.to_line());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(primary: &str, translation: &str) -> (String, String) {
        (primary.to_string(), translation.to_string())
    }

    #[test]
    fn test_parse_line_delimiter_priority() {
        assert_eq!(parse_line("take off ->> 起飞"), pair("take off", "起飞"));
        assert_eq!(parse_line("apple\t苹果 水果"), pair("apple", "苹果 水果"));
        assert_eq!(parse_line("apple 苹果/水果"), pair("apple", "苹果/水果"));
        assert_eq!(parse_line("apple/苹果:水果"), pair("apple", "苹果:水果"));
        assert_eq!(parse_line("apple:苹果"), pair("apple", "苹果"));
        assert_eq!(parse_line("apple：苹果"), pair("apple", "苹果"));
        assert_eq!(parse_line("apple"), pair("apple", ""));
    }

    #[test]
    fn test_parse_line_leading_delimiter_is_skipped() {
        assert_eq!(parse_line("\tapple"), pair("apple", ""));
        assert_eq!(parse_line(" apple:苹果"), pair("apple", "苹果"));
    }

    #[test]
    fn test_parse_paired_records() {
        let content = "How are you?\n你好吗？\n\nGood morning.\n早上好。\n\nThanks.\n";
        let entries = parse_paired(content).unwrap();
        assert_eq!(
            entries,
            vec![
                Entry::new("How are you?", "你好吗？"),
                Entry::new("Good morning.", "早上好。"),
                Entry::new("Thanks.", ""),
            ]
        );
    }

    #[test]
    fn test_parse_paired_rejects_inline_content() {
        assert!(parse_paired("a ->> b\nc ->> d\n").is_none());
        assert!(parse_paired("one\ntwo\nthree\n").is_none());
        assert!(parse_paired("\n\n").is_none());
    }

    #[test]
    fn test_parse_resource_heuristic() {
        let paired = "Good night.\n晚安。\n\nSee you.\n再见。\n";
        let entries = parse_resource(paired, ResourceType::Sentences);
        assert_eq!(entries[0], Entry::new("Good night.", "晚安。"));
        assert_eq!(entries.len(), 2);

        // Word lists never use the paired layout
        let entries = parse_resource(paired, ResourceType::Words);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0], Entry::new("Good", "night."));

        let inline = "look up ->> 查找\nset off ->> 出发\n";
        let entries = parse_resource(inline, ResourceType::Phrases);
        assert_eq!(entries[1], Entry::new("set off", "出发"));
    }

    #[test]
    fn test_format_marker_overrides_heuristic() {
        let content = "#format: inline\nrun\nwalk\n";
        let entries = parse_resource(content, ResourceType::Phrases);
        assert_eq!(entries, vec![Entry::new("run", ""), Entry::new("walk", "")]);

        let content = "#format: paired\nrun\n跑\n";
        assert_eq!(parse_resource(content, ResourceType::Words), vec![Entry::new("run", "跑")]);
    }

    #[test]
    fn test_malformed_paired_body_reads_inline() {
        let content = "#format: paired\nrun ->> x\n跑\n";
        assert_eq!(
            parse_resource(content, ResourceType::Words),
            vec![Entry::new("run", "x"), Entry::new("跑", "")]
        );

        let content = "#format: paired\none\ntwo\nthree\n";
        assert_eq!(parse_resource(content, ResourceType::Sentences).len(), 3);
        assert!(parse_resource("#format: paired\n", ResourceType::Sentences).is_empty());
    }

    #[test]
    fn test_item_splits_only_on_separator() {
        assert_eq!(Entry::from_item(" take off "), Entry::new("take off", ""));
        assert_eq!(Entry::from_item("take off ->> 起飞"), Entry::new("take off", "起飞"));
        assert_eq!(Entry::from_item("ratio:1"), Entry::new("ratio:1", ""));
        assert_eq!(Entry::parse("take off"), Entry::new("take", "off"));
    }

    #[test]
    fn test_render_then_parse_roundtrip() {
        let entries = vec![
            Entry::new("take off", "起飞"),
            Entry::new("I am here", ""),
            Entry::new("apple", ""),
            Entry::new("ratio", "1:2"),
        ];
        for resource_type in ResourceType::ALL {
            let rendered = render_resource(&entries, resource_type);
            assert_eq!(parse_resource(&rendered, resource_type), entries);
        }
    }

    #[test]
    fn test_render_marker_only_for_non_words() {
        let entries = vec![Entry::new("a", "b")];
        assert_eq!(render_resource(&entries, ResourceType::Words), "a ->> b\n");
        assert_eq!(
            render_resource(&entries, ResourceType::Sentences),
            "#format: inline\na ->> b\n"
        );
    }
}
