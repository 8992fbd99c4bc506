//! Desired-partner trait tags.
//!
//! The profile stores the tags as a single comma-joined string; this type is
//! the list view recomputed from it on every read.

use std::fmt;
use thiserror::Error;

/// Upper bound on the number of trait tags.
pub const MAX_TAGS: usize = 5;

/// Why a tag could not be added.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("Tag is empty")]
    Empty,

    #[error("Maximum of {} traits reached", MAX_TAGS)]
    LimitReached,

    #[error("Trait '{0}' is already listed")]
    Duplicate(String),
}

/// Bounded, ordered, duplicate-free list of short trait strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraitTags(Vec<String>);

impl TraitTags {
    /// Splits a comma-joined value, trimming pieces and dropping empties.
    pub fn parse(joined: &str) -> Self {
        Self(
            joined
                .split(',')
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Appends a tag.
    ///
    /// The limit is checked before duplicates; comparison is case-sensitive.
    pub fn add(&mut self, raw: &str) -> Result<(), TagError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(TagError::Empty);
        }
        if self.0.len() >= MAX_TAGS {
            return Err(TagError::LimitReached);
        }
        if self.contains(value) {
            return Err(TagError::Duplicate(value.to_string()));
        }
        self.0.push(value.to_string());
        Ok(())
    }

    /// Removes the first tag equal to `tag`. Returns whether one was removed.
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.0.iter().position(|t| t == tag) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_TAGS
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The canonical stored form.
    pub fn to_joined(&self) -> String {
        self.0.join(", ")
    }
}

impl fmt::Display for TraitTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_joined())
    }
}
