// Property and flavor tag vocabularies.
//
// Keys are the only identifiers used for matching; names are for display.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub name: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Property,
    Flavor,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKind::Property => f.write_str("property"),
            TagKind::Flavor => f.write_str("flavor"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    tags: Vec<Tag>,
}

impl Taxonomy {
    /// Keeps the first tag of every key.
    pub fn new(tags: impl IntoIterator<Item = Tag>) -> Self {
        let mut seen = HashSet::new();
        let tags = tags
            .into_iter()
            .filter(|tag| seen.insert(tag.key.clone()))
            .collect();
        Self { tags }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.tags.iter().any(|tag| tag.key == key)
    }

    pub fn name_of(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.name.as_str())
    }

    pub fn first_unknown<'a>(&self, keys: impl IntoIterator<Item = &'a String>) -> Option<&'a str> {
        keys.into_iter()
            .find(|key| !self.contains_key(key))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod taxonomy_tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::collections::BTreeSet;

    #[fixture]
    fn properties() -> Taxonomy {
        Taxonomy::new([
            Tag::new("organic", "Organic"),
            Tag::new("barista", "Barista"),
            Tag::new("organic", "Duplicate organic"),
        ])
    }

    #[rstest]
    fn it_should_keep_the_first_tag_per_key(properties: Taxonomy) {
        assert_eq!(properties.len(), 2);
        assert_eq!(properties.name_of("organic"), Some("Organic"));
    }

    #[rstest]
    fn it_should_look_up_keys_not_names(properties: Taxonomy) {
        assert!(properties.contains_key("barista"));
        assert!(!properties.contains_key("Barista"));
        assert_eq!(properties.name_of("unknown"), None);
    }

    #[rstest]
    fn it_should_report_the_first_unknown_key(properties: Taxonomy) {
        let keys: BTreeSet<String> = ["barista", "sweet", "organic"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(properties.first_unknown(&keys), Some("sweet"));

        let known: BTreeSet<String> = ["organic".to_string()].into_iter().collect();
        assert_eq!(properties.first_unknown(&known), None);
    }

    #[rstest]
    fn it_should_display_tag_kinds() {
        assert_eq!(TagKind::Property.to_string(), "property");
        assert_eq!(TagKind::Flavor.to_string(), "flavor");
    }
}
