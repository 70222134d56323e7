use std::collections::BTreeMap;

/// Splits a leading `---` block off the document.
///
/// Returns the parsed `key: value` pairs (keys lowercased) and the remaining body.
/// Documents without a closing fence are treated as having no frontmatter.
pub(crate) fn split(content: &str) -> (BTreeMap<String, String>, &str) {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();
    let Some(rest) = trimmed.strip_prefix("---") else {
        return (BTreeMap::new(), content);
    };
    let Some(end) = rest.find("\n---") else {
        return (BTreeMap::new(), content);
    };

    let block = &rest[..end];
    let after = &rest[end + 4..];
    let body = after
        .split_once('\n')
        .map(|(_, body)| body)
        .unwrap_or_default();

    (parse_block(block), body.trim_start_matches('\n'))
}

fn parse_block(block: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            fields.insert(key.trim().to_lowercase(), unquote(value.trim()).to_string());
        }
    }
    fields
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields_and_body() {
        let source = "---\ntitle: \"IELTS 7.0\"\ndate: 2026-02-13\ntag: Exam\n---\n\n# Body\ntext";
        let (fields, body) = split(source);
        assert_eq!(fields.get("title").map(String::as_str), Some("IELTS 7.0"));
        assert_eq!(fields.get("date").map(String::as_str), Some("2026-02-13"));
        assert_eq!(body, "# Body\ntext");
    }

    #[test]
    fn keeps_colons_inside_values() {
        let (fields, _) = split("---\ntitle: APS: the waiting game\n---\nbody");
        assert_eq!(
            fields.get("title").map(String::as_str),
            Some("APS: the waiting game")
        );
    }

    #[test]
    fn unterminated_block_is_plain_body() {
        let source = "---\ntitle: nope\nno closing fence";
        let (fields, body) = split(source);
        assert!(fields.is_empty());
        assert_eq!(body, source);
    }

    #[test]
    fn missing_block_returns_whole_document() {
        let (fields, body) = split("# Just content");
        assert!(fields.is_empty());
        assert_eq!(body, "# Just content");
    }
}
