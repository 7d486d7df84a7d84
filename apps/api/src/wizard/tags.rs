//! Ordered tag sequences backing the list-valued profile fields.
//!
//! Every mutation returns a new `TagList`; the receiver is never spliced in
//! place. Removal is bounds-checked so a stale chip index is a typed error
//! rather than a silent no-op.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("index {index} is out of range for a list of length {len}")]
    OutOfRange { index: usize, len: usize },
}

/// Insertion-ordered list of strings. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Appends unconditionally, even when an equal entry already exists.
    pub fn appended(&self, value: impl Into<String>) -> Self {
        let mut next = self.0.clone();
        next.push(value.into());
        Self(next)
    }

    pub fn removed(&self, index: usize) -> Result<Self, TagError> {
        if index >= self.0.len() {
            return Err(TagError::OutOfRange {
                index,
                len: self.0.len(),
            });
        }
        let next = self
            .0
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, v)| v.clone())
            .collect();
        Ok(Self(next))
    }

    /// Checkbox semantics: checking appends unless already present, unchecking
    /// drops every equal entry.
    pub fn toggled(&self, value: &str, checked: bool) -> Self {
        if checked {
            if self.0.iter().any(|v| v == value) {
                self.clone()
            } else {
                self.appended(value)
            }
        } else {
            Self(self.0.iter().filter(|v| *v != value).cloned().collect())
        }
    }

    /// Entries with blank values dropped, as the chip row and review show them.
    pub fn visible(&self) -> Vec<&str> {
        self.iter().filter(|v| !v.trim().is_empty()).collect()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills() -> TagList {
        ["TypeScript", "Python", "Node.js"].into_iter().collect()
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let list = skills().appended("Python");
        assert_eq!(list.len(), 4);
        assert_eq!(list.iter().last(), Some("Python"));
    }

    #[test]
    fn test_append_then_remove_restores_list() {
        let before = skills();
        let after = before.appended("Rust");
        let restored = after.removed(after.len() - 1).unwrap();
        assert_eq!(restored, before);
    }

    #[test]
    fn test_remove_middle_preserves_order() {
        let list = skills().removed(1).unwrap();
        assert_eq!(list.into_vec(), vec!["TypeScript", "Node.js"]);
    }

    #[test]
    fn test_remove_out_of_range_is_error() {
        let list = skills();
        assert_eq!(
            list.removed(3),
            Err(TagError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(list, skills());
    }

    #[test]
    fn test_remove_from_empty_is_error() {
        assert!(TagList::new().removed(0).is_err());
    }

    #[test]
    fn test_toggle_unchecked_drops_all_matches() {
        let list: TagList = ["Remote", "Hybrid", "Remote"].into_iter().collect();
        assert_eq!(list.toggled("Remote", false).into_vec(), vec!["Hybrid"]);
    }

    #[test]
    fn test_toggle_checked_appends() {
        let list: TagList = ["Part-time"].into_iter().collect();
        assert_eq!(
            list.toggled("Contract", true).into_vec(),
            vec!["Part-time", "Contract"]
        );
    }

    #[test]
    fn test_toggle_checked_twice_keeps_one_entry() {
        let list: TagList = ["Part-time"].into_iter().collect();
        let once = list.toggled("Remote", true);
        assert_eq!(once.toggled("Remote", true), once);
        assert_eq!(list.toggled("Part-time", true), list);
    }

    #[test]
    fn test_visible_skips_blank_entries() {
        let list: TagList = ["Education", "", "  ", "Health"].into_iter().collect();
        assert_eq!(list.visible(), vec!["Education", "Health"]);
    }
}
