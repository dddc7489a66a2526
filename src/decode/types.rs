//! Envelope description types

use serde::Serialize;

/// Path that addresses the response body itself
pub const ROOT_PATH: &str = "$";

/// Where a list response keeps its items and total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    /// Item array paths, tried in order
    pub items: Vec<String>,
    /// Total count paths, tried in order
    pub total: Vec<String>,
}

impl Envelope {
    /// Envelope with the given item paths and no total
    pub fn items<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: paths.into_iter().map(Into::into).collect(),
            total: Vec::new(),
        }
    }

    /// Add total count paths
    #[must_use]
    pub fn with_total<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.total.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Envelope for endpoints that return a bare JSON array
    pub fn root() -> Self {
        Self::items([ROOT_PATH])
    }
}
