use std::fmt::Display;

use itertools::Itertools;

/// Ordered, duplicate free set of the group tags of a registry vessel.
///
/// The api stores tags as a single comma joined string and only ever receives the whole string
/// back, so every edit goes through this type and is serialised again with [`GroupTags::joined`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTags(Vec<String>);

impl GroupTags {
    pub fn parse(value: &str) -> Self {
        Self(
            value
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unique()
                .map(ToString::to_string)
                .collect(),
        )
    }

    /// Appends `tag` unless it is blank or already present.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        let len = self.0.len();
        self.0.retain(|v| v != tag);
        self.0.len() != len
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|v| v == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl Display for GroupTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.joined())
    }
}
