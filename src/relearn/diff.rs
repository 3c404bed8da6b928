//! Line-level text diff.
//!
//! Compares two versions of a note at line granularity and classifies
//! contiguous runs as added, removed, or unchanged, via a standard
//! longest-common-subsequence edit script. The output is a sequence of
//! [`ChangeSpan`]s whose text concatenates back to the inputs:
//! removed + unchanged spans reconstruct the old version, added +
//! unchanged spans the new one.
//!
//! Both inputs are normalized to end with exactly one trailing newline
//! before comparison (an empty input stays empty), so a missing final
//! newline never shows up as a spurious last-line change.

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
    Unchanged,
}

/// One tagged run of text in a diff. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSpan {
    pub kind: ChangeKind,
    pub text: String,
}

/// Normalize a text to end with exactly one trailing newline. Empty input
/// is left empty: it has no lines to diff.
pub fn ensure_trailing_newline(text: &str) -> Cow<'_, str> {
    if text.is_empty() || text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{}\n", text))
    }
}

/// Diff two texts line by line. Never fails; arbitrary (even binary-ish)
/// content is treated as opaque lines.
pub fn diff(old: &str, new: &str) -> Vec<ChangeSpan> {
    let old = ensure_trailing_newline(old);
    let new = ensure_trailing_newline(new);
    let a: Vec<&str> = old.split_inclusive('\n').collect();
    let b: Vec<&str> = new.split_inclusive('\n').collect();

    // LCS length table: lcs[i][j] = longest common subsequence of
    // a[i..] and b[j..].
    let mut lcs = vec![vec![0u32; b.len() + 1]; a.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut spans: Vec<ChangeSpan> = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            push(&mut spans, ChangeKind::Unchanged, a[i]);
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            push(&mut spans, ChangeKind::Removed, a[i]);
            i += 1;
        } else {
            push(&mut spans, ChangeKind::Added, b[j]);
            j += 1;
        }
    }
    while i < a.len() {
        push(&mut spans, ChangeKind::Removed, a[i]);
        i += 1;
    }
    while j < b.len() {
        push(&mut spans, ChangeKind::Added, b[j]);
        j += 1;
    }
    spans
}

// Coalesce consecutive lines of the same kind into one span and drop
// zero-length text.
fn push(spans: &mut Vec<ChangeSpan>, kind: ChangeKind, text: &str) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(text),
        _ => spans.push(ChangeSpan {
            kind,
            text: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(spans: &[ChangeSpan], keep: &[ChangeKind]) -> String {
        spans
            .iter()
            .filter(|s| keep.contains(&s.kind))
            .map(|s| s.text.as_str())
            .collect()
    }

    fn assert_roundtrip(old: &str, new: &str) {
        let spans = diff(old, new);
        assert_eq!(
            reconstruct(&spans, &[ChangeKind::Removed, ChangeKind::Unchanged]),
            ensure_trailing_newline(old),
            "old reconstruction failed for {:?} -> {:?}",
            old,
            new
        );
        assert_eq!(
            reconstruct(&spans, &[ChangeKind::Added, ChangeKind::Unchanged]),
            ensure_trailing_newline(new),
            "new reconstruction failed for {:?} -> {:?}",
            old,
            new
        );
        assert!(spans.iter().all(|s| !s.text.is_empty()));
    }

    #[test]
    fn test_identical_is_one_unchanged_span() {
        let spans = diff("a\nb\n", "a\nb\n");
        assert_eq!(
            spans,
            vec![ChangeSpan {
                kind: ChangeKind::Unchanged,
                text: "a\nb\n".into()
            }]
        );
    }

    #[test]
    fn test_pure_insertion() {
        let spans = diff("a\nc\n", "a\nb\nc\n");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].kind, ChangeKind::Added);
        assert_eq!(spans[1].text, "b\n");
        assert_roundtrip("a\nc\n", "a\nb\nc\n");
    }

    #[test]
    fn test_pure_deletion() {
        let spans = diff("a\nb\nc\n", "a\nc\n");
        assert_eq!(spans[1].kind, ChangeKind::Removed);
        assert_eq!(spans[1].text, "b\n");
        assert_roundtrip("a\nb\nc\n", "a\nc\n");
    }

    #[test]
    fn test_replacement_emits_removed_before_added() {
        let spans = diff("old line\n", "new line\n");
        assert_eq!(
            spans.iter().map(|s| s.kind).collect::<Vec<_>>(),
            vec![ChangeKind::Removed, ChangeKind::Added]
        );
        assert_roundtrip("old line\n", "new line\n");
    }

    #[test]
    fn test_consecutive_changes_coalesce() {
        let spans = diff("keep\n", "keep\none\ntwo\nthree\n");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].text, "one\ntwo\nthree\n");
    }

    #[test]
    fn test_empty_old_is_all_added() {
        let spans = diff("", "a\nb\n");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, ChangeKind::Added);
        assert_roundtrip("", "a\nb\n");
    }

    #[test]
    fn test_empty_new_is_all_removed() {
        let spans = diff("a\nb\n", "");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, ChangeKind::Removed);
        assert_roundtrip("a\nb\n", "");
    }

    #[test]
    fn test_both_empty() {
        assert!(diff("", "").is_empty());
    }

    #[test]
    fn test_missing_trailing_newline_is_not_a_change() {
        let spans = diff("a\nb", "a\nb\n");
        assert_eq!(
            spans,
            vec![ChangeSpan {
                kind: ChangeKind::Unchanged,
                text: "a\nb\n".into()
            }]
        );
    }

    #[test]
    fn test_roundtrip_various_shapes() {
        let cases = [
            ("", ""),
            ("one", "one"),
            ("one", "two"),
            ("a\nb\nc\nd\n", "a\nc\nb\nd\n"),
            ("x\ny\nz", "x\nz"),
            ("shared\nold tail\n", "new head\nshared\n"),
            ("# Title\n\npara one\npara two\n", "# Title\n\npara one changed\npara two\nextra\n"),
        ];
        for (old, new) in cases {
            assert_roundtrip(old, new);
        }
    }
}
