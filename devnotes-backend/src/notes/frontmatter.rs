//! Split a note file into its frontmatter block and body.
//!
//! Hand-rolled `key: value` header parsing (no serde_yaml). Only the minimal
//! subset used by dev notes is understood; anything else in the header is
//! ignored rather than rejected.

use std::collections::HashMap;

const OPEN_DELIMITER: &str = "---\n";
const CLOSE_DELIMITER: &str = "\n---\n";

/// Raw header block of a note, keyed by trimmed field name.
pub type Header = HashMap<String, String>;

/// A document with a well-formed delimiter pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    pub header: Header,
    /// Everything after the closing `---\n`, byte-for-byte.
    pub body: String,
}

/// Split `text` into header and body.
///
/// Returns `None` when the text does not open with `---\n` or when no
/// `\n---\n` closes the block. Malformed input is absence, not an error.
pub fn split_frontmatter(text: &str) -> Option<Frontmatter> {
    if !text.starts_with(OPEN_DELIMITER) {
        return None;
    }

    let start = OPEN_DELIMITER.len();
    let end = start + text[start..].find(CLOSE_DELIMITER)?;

    let block = &text[start..end];
    let body = &text[end + CLOSE_DELIMITER.len()..];

    Some(Frontmatter {
        header: parse_header(block),
        body: body.to_string(),
    })
}

/// Parse header lines into a key/value map. Later keys win.
fn parse_header(block: &str) -> Header {
    let mut header = Header::new();

    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            header.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic_frontmatter() {
        let text = "---\ntitle: First Race\ndate: 2024-01-05\n---\nBody text here.\n";
        let fm = split_frontmatter(text).unwrap();
        assert_eq!(fm.header.get("title").map(String::as_str), Some("First Race"));
        assert_eq!(fm.header.get("date").map(String::as_str), Some("2024-01-05"));
        assert_eq!(fm.body, "Body text here.\n");
    }

    #[test]
    fn test_no_opening_delimiter() {
        assert!(split_frontmatter("title: x\n---\nbody").is_none());
        // Leading whitespace is not tolerated
        assert!(split_frontmatter("\n---\ntitle: x\n---\nbody").is_none());
        assert!(split_frontmatter("").is_none());
    }

    #[test]
    fn test_unterminated_block() {
        assert!(split_frontmatter("---\ntitle: x\nbody without close").is_none());
        // Closing delimiter must be followed by a newline
        assert!(split_frontmatter("---\ntitle: x\n---").is_none());
    }

    #[test]
    fn test_empty_block_needs_its_own_line() {
        // The closing `\n` cannot be shared with the opening delimiter
        assert!(split_frontmatter("---\n---\nbody").is_none());
        let fm = split_frontmatter("---\n\n---\nbody").unwrap();
        assert!(fm.header.is_empty());
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_header_line_rules() {
        let text = "---\n# a comment\n\nno colon here\n  summary :  a: b  \ntitle: one\ntitle: two\n---\n";
        let fm = split_frontmatter(text).unwrap();
        assert_eq!(fm.header.len(), 2);
        // Split on the first colon only
        assert_eq!(fm.header.get("summary").map(String::as_str), Some("a: b"));
        // Later duplicates overwrite
        assert_eq!(fm.header.get("title").map(String::as_str), Some("two"));
        assert_eq!(fm.body, "");
    }

    #[test]
    fn test_body_preserved_exactly() {
        let body = "\n# Heading\n\n---\nnot a header: value\n\ttabbed  \n\n";
        let text = format!("---\ntitle: t\n---\n{}", body);
        let fm = split_frontmatter(&text).unwrap();
        assert_eq!(fm.body, body);

        // The header block plus delimiters plus body rebuilds the input
        let rebuilt = format!("---\ntitle: t\n---\n{}", fm.body);
        assert_eq!(rebuilt, text);
    }
}
