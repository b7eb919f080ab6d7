//! User-group gating rules attached to a feature.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A compiled gating pattern. Two patterns are equal when their sources are equal.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compiles `source`.
    ///
    /// # Errors
    /// Returns the [`regex::Error`] describing why `source` is not a valid pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Unanchored search: `"admin"` matches `"superadmin"`.
    #[must_use]
    pub fn is_match(&self, identifier: &str) -> bool {
        self.0.is_match(identifier)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored shape of [`UserGroups`]: `{"list": [...], "regex": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserGroupsRecord {
    pub list: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

/// Which requester groups may see an enabled feature.
///
/// Holds an ordered set of exact identifiers and an optional compiled pattern. An instance
/// only exists in a valid state: the pattern is compiled when the value is built or
/// deserialized, never when it is evaluated.
///
/// The list keeps its first-seen order; empty entries are dropped and repeats collapse.
/// An empty pattern source means "no pattern".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserGroupsRecord", into = "UserGroupsRecord")]
pub struct UserGroups {
    list: Vec<String>,
    pattern: Option<Pattern>,
}

impl UserGroups {
    /// Builds a gating rule from explicit identifiers and an optional pattern source.
    ///
    /// # Errors
    /// Returns a [`regex::Error`] if `pattern` does not compile.
    pub fn new<I, S>(list: I, pattern: Option<&str>) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pattern = match pattern {
            Some(source) if !source.is_empty() => Some(Pattern::new(source)?),
            _ => None,
        };

        let mut unique: Vec<String> = Vec::new();
        for id in list.into_iter().map(Into::into) {
            if !id.is_empty() && !unique.contains(&id) {
                unique.push(id);
            }
        }

        Ok(Self { list: unique, pattern })
    }

    /// Rule with explicit identifiers only.
    pub fn from_list<I, S>(list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut groups = Self::default();
        for id in list.into_iter().map(Into::into) {
            if !id.is_empty() && !groups.list.contains(&id) {
                groups.list.push(id);
            }
        }
        groups
    }

    /// Rule with a pattern only.
    ///
    /// # Errors
    /// Returns a [`regex::Error`] if `pattern` does not compile.
    pub fn from_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Self::new(std::iter::empty::<String>(), Some(pattern))
    }

    #[must_use]
    pub fn list(&self) -> &[String] {
        &self.list
    }

    #[must_use]
    pub const fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    /// `true` when neither identifiers nor a pattern are configured, i.e. no gating.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.list.is_empty() && self.pattern.is_none()
    }

    /// Exact, case-sensitive membership in the explicit list.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.list.iter().any(|id| id == identifier)
    }
}

impl TryFrom<UserGroupsRecord> for UserGroups {
    type Error = regex::Error;

    fn try_from(record: UserGroupsRecord) -> Result<Self, Self::Error> {
        Self::new(record.list, record.regex.as_deref())
    }
}

impl From<UserGroups> for UserGroupsRecord {
    fn from(groups: UserGroups) -> Self {
        Self { list: groups.list, regex: groups.pattern.map(|p| p.as_str().to_owned()) }
    }
}
