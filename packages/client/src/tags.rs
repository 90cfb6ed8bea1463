//! Ordered tag list for the composer.

use thiserror::Error;

use crate::models::Tag;

/// Most tags an article may carry.
pub const MAX_TAGS: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("tag is empty")]
    Empty,
    #[error("tag `{0}` is already added")]
    Duplicate(String),
    #[error("an article can have at most {MAX_TAGS} tags")]
    Full,
}

/// Unique (case-insensitively) tags in insertion order, at most [`MAX_TAGS`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<Tag>,
}

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from backend tags, dropping blanks, duplicates and overflow.
    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        let mut list = Self::new();
        for tag in tags {
            if let Err(e) = list.push(tag) {
                tracing::debug!("Dropping tag from backend: {}", e);
            }
        }
        list
    }

    pub fn from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::from_tags(names.into_iter().map(|n| Tag::named(n.as_ref())))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tags.len() >= MAX_TAGS
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let needle = name.trim().to_lowercase();
        self.tags.iter().position(|t| t.name.to_lowercase() == needle)
    }

    /// Add a tag typed by the user.
    pub fn add(&mut self, input: &str) -> Result<(), TagError> {
        self.push(Tag::named(input))
    }

    fn push(&mut self, mut tag: Tag) -> Result<(), TagError> {
        let name = tag.name.trim();
        if name.is_empty() {
            return Err(TagError::Empty);
        }
        if self.is_full() {
            return Err(TagError::Full);
        }
        if self.contains(name) {
            return Err(TagError::Duplicate(name.to_string()));
        }
        tag.name = name.to_string();
        self.tags.push(tag);
        Ok(())
    }

    /// Remove the entry matching `name`. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eleventh_tag_is_rejected() {
        let mut tags = TagList::new();
        for i in 0..MAX_TAGS {
            tags.add(&format!("tag{i}")).unwrap();
        }
        assert_eq!(tags.add("one-more"), Err(TagError::Full));
        assert_eq!(tags.len(), MAX_TAGS);
    }

    #[test]
    fn duplicates_are_case_insensitive() {
        let mut tags = TagList::new();
        tags.add("Rust").unwrap();
        assert_eq!(tags.add("rust"), Err(TagError::Duplicate("rust".into())));
        assert_eq!(tags.add("  RUST "), Err(TagError::Duplicate("RUST".into())));
        assert_eq!(tags.names(), vec!["Rust"]);
    }

    #[test]
    fn blank_input_is_rejected_and_input_is_trimmed() {
        let mut tags = TagList::new();
        assert_eq!(tags.add("   "), Err(TagError::Empty));
        tags.add("  wasm ").unwrap();
        assert_eq!(tags.names(), vec!["wasm"]);
    }

    #[test]
    fn remove_takes_exactly_one_entry() {
        let mut tags = TagList::from_names(["a", "b", "c"]);
        assert!(tags.remove("B"));
        assert_eq!(tags.names(), vec!["a", "c"]);
        assert!(!tags.remove("b"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn from_tags_keeps_ids_and_order() {
        let tags = TagList::from_tags([
            Tag { id: Some(3), name: "db".into() },
            Tag::named("DB"),
            Tag::named("web"),
        ]);
        let collected: Vec<_> = tags.iter().cloned().collect();
        assert_eq!(collected, vec![Tag { id: Some(3), name: "db".into() }, Tag::named("web")]);
    }

    #[test]
    fn from_tags_stops_at_the_limit_and_skips_blanks() {
        let names: Vec<String> = (0..MAX_TAGS + 3).map(|i| format!("t{i}")).collect();
        let tags = TagList::from_tags(
            std::iter::once(Tag::named(" "))
                .chain(names.iter().map(|n| Tag::named(n))),
        );
        assert_eq!(tags.len(), MAX_TAGS);
        assert_eq!(tags.names().first().map(String::as_str), Some("t0"));
        assert_eq!(tags.names().last().map(String::as_str), Some("t9"));
    }
}
