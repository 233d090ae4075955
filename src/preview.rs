use crate::extract::ExtractedElement;

pub const DEFAULT_LIMIT: usize = 5;
pub const DEFAULT_MAX_CHARS: usize = 200;

/// `[type] content`, with content cut to `max_chars` characters.
pub fn preview_line(elem: &ExtractedElement, max_chars: usize) -> String {
    format!("[{}] {}", elem.kind(), truncate_chars(elem.content(), max_chars))
}

pub fn preview(elements: &[ExtractedElement], limit: usize, max_chars: usize) -> Vec<String> {
    elements
        .iter()
        .take(limit)
        .map(|e| preview_line(e, max_chars))
        .collect()
}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::{preview, preview_line, truncate_chars};
    use crate::extract::ExtractedElement;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("短い文章", 3), "短い文");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn formats_type_tag() {
        let t = ExtractedElement::Table {
            content: "a | b\nc | d".to_string(),
        };
        assert_eq!(preview_line(&t, 200), "[table] a | b\nc | d");
        assert_eq!(preview_line(&t, 3), "[table] a |");
    }

    #[test]
    fn limits_element_count() {
        let elements: Vec<ExtractedElement> = (0..8)
            .map(|i| ExtractedElement::Text {
                content: format!("p{i}"),
            })
            .collect();
        let lines = preview(&elements, 5, 200);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "[text] p0");
        assert_eq!(lines[4], "[text] p4");
        assert!(preview(&elements[..2], 5, 200).len() == 2);
    }
}
