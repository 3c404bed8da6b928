//! YAML frontmatter handling.
//!
//! Every document relearn touches is markdown with an optional leading
//! `---` fenced YAML block. This module splits documents into metadata and
//! body, parses the metadata into typed structs, and merge-writes partial
//! updates without disturbing keys it does not know about.

use crate::error::{RelearnError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Split a document into its raw YAML frontmatter (without the fences) and
/// the body that follows. Documents without a frontmatter block return
/// `(None, content)`.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content.strip_prefix("---\n") else {
        return (None, content);
    };
    // The closing fence is a `---` on its own line, or at end of input.
    let mut search_from = 0;
    loop {
        let Some(pos) = rest[search_from..].find("\n---") else {
            return (None, content);
        };
        let fence_start = search_from + pos;
        let after = &rest[fence_start + 4..];
        if after.is_empty() {
            return (Some(&rest[..fence_start + 1]), "");
        }
        if let Some(body) = after.strip_prefix('\n') {
            return (Some(&rest[..fence_start + 1]), body);
        }
        search_from = fence_start + 1;
    }
}

/// The document body with any frontmatter block removed and surrounding
/// whitespace trimmed.
pub fn strip(content: &str) -> &str {
    let (_, body) = split(content);
    body.trim()
}

/// Parse the frontmatter block into a typed struct. Returns `Ok(None)`
/// when the document has no block at all; a block that fails to parse is
/// an error the caller decides how to treat.
pub fn parse<T: DeserializeOwned>(content: &str) -> Result<Option<T>> {
    match split(content) {
        (None, _) => Ok(None),
        (Some(yaml), _) => Ok(Some(serde_yaml::from_str(yaml)?)),
    }
}

/// Compose a document from typed metadata and a body.
pub fn compose<T: Serialize>(meta: &T, body: &str) -> Result<String> {
    let yaml = serde_yaml::to_string(meta)?;
    let body = body.trim();
    if body.is_empty() {
        Ok(format!("---\n{}---\n", yaml))
    } else {
        Ok(format!("---\n{}---\n{}\n", yaml, body))
    }
}

/// Shallow-merge `patch` into a document's frontmatter, leaving the body
/// and all untouched keys as they were. A `null` patch value removes the
/// key. Documents without a block get one.
pub fn merge(content: &str, patch: Mapping) -> Result<String> {
    let (block, body) = split(content);
    let mut mapping: Mapping = match block {
        Some(yaml) => serde_yaml::from_str(yaml)?,
        None => Mapping::new(),
    };
    for (key, value) in patch {
        if value.is_null() {
            mapping.remove(&key);
        } else {
            mapping.insert(key, value);
        }
    }
    compose(&mapping, body)
}

/// Convenience for building merge patches from serializable values.
pub fn patch_value<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_yaml::to_value(value)?)
}

/// Map a YAML parse failure to a [`RelearnError::CorruptArtifact`] carrying
/// the offending path. Used wherever unreadable metadata must degrade to a
/// GC-eligible orphan instead of a hard failure.
pub fn corrupt(path: &str, err: impl std::fmt::Display) -> RelearnError {
    RelearnError::CorruptArtifact {
        path: path.to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Meta {
        id: String,
    }

    #[test]
    fn test_split_plain_document() {
        let (block, body) = split("no metadata here\n");
        assert!(block.is_none());
        assert_eq!(body, "no metadata here\n");
    }

    #[test]
    fn test_split_with_block() {
        let (block, body) = split("---\nid: abc\n---\nhello\n");
        assert_eq!(block, Some("id: abc\n"));
        assert_eq!(body, "hello\n");
    }

    #[test]
    fn test_split_block_at_end_of_input() {
        let (block, body) = split("---\nid: abc\n---");
        assert_eq!(block, Some("id: abc\n"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_ignores_dashes_inside_values() {
        let (block, body) = split("---\ntitle: a --- b\nid: x\n---\nbody\n");
        assert_eq!(block, Some("title: a --- b\nid: x\n"));
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_strip_trims_body() {
        assert_eq!(strip("---\nid: x\n---\n\n  content  \n"), "content");
        assert_eq!(strip("just text"), "just text");
    }

    #[test]
    fn test_parse_and_compose_roundtrip() {
        let meta = Meta { id: "abc".into() };
        let doc = compose(&meta, "the body").unwrap();
        let parsed: Option<Meta> = parse(&doc).unwrap();
        assert_eq!(parsed, Some(meta));
        assert_eq!(strip(&doc), "the body");
    }

    #[test]
    fn test_parse_no_block() {
        let parsed: Option<Meta> = parse("plain text").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_merge_preserves_unknown_keys() {
        let doc = "---\nid: abc\ncustom: kept\n---\nbody\n";
        let mut patch = Mapping::new();
        patch.insert("extra".into(), "added".into());
        let merged = merge(doc, patch).unwrap();

        let mapping: Mapping = serde_yaml::from_str(split(&merged).0.unwrap()).unwrap();
        assert_eq!(mapping.get("id").unwrap().as_str(), Some("abc"));
        assert_eq!(mapping.get("custom").unwrap().as_str(), Some("kept"));
        assert_eq!(mapping.get("extra").unwrap().as_str(), Some("added"));
        assert_eq!(strip(&merged), "body");
    }

    #[test]
    fn test_merge_null_removes_key() {
        let doc = "---\nid: abc\nstale: yes\n---\nbody\n";
        let mut patch = Mapping::new();
        patch.insert("stale".into(), Value::Null);
        let merged = merge(doc, patch).unwrap();

        let mapping: Mapping = serde_yaml::from_str(split(&merged).0.unwrap()).unwrap();
        assert!(mapping.get("stale").is_none());
        assert_eq!(mapping.get("id").unwrap().as_str(), Some("abc"));
    }

    #[test]
    fn test_merge_creates_block_when_missing() {
        let mut patch = Mapping::new();
        patch.insert("id".into(), "fresh".into());
        let merged = merge("only a body", patch).unwrap();
        let parsed: Option<Meta> = parse(&merged).unwrap();
        assert_eq!(parsed.unwrap().id, "fresh");
        assert_eq!(strip(&merged), "only a body");
    }
}
