//! Shared filter object that the trend list is queried with.
//!
//! Each filter dimension is owned by exactly one widget. A dimension stays
//! `None` until its widget emits for the first time, which keeps "never
//! touched" distinct from "explicitly emptied".

use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub platforms: Option<Vec<String>>,
    pub category: Option<String>,
}

/// A widget's emission. Always carries the complete value of the dimension it
/// owns, never a delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Platforms(Vec<String>),
    Category(String),
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_none() && self.category.is_none()
    }

    /// Replaces the dimension owned by the emitting widget and nothing else.
    pub fn merge(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Platforms(platforms) => self.platforms = Some(platforms),
            FilterUpdate::Category(category) => self.category = Some(category),
        }
    }

    /// Form-encodes the filter the way the backend parses it: `platforms` is a
    /// single comma-joined value, `category` is sent even when empty.
    /// Returns an empty string for the empty filter.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(platforms) = &self.platforms {
            serializer.append_pair("platforms", &platforms.join(","));
        }
        if let Some(category) = &self.category {
            serializer.append_pair("category", category);
        }
        serializer.finish()
    }
}
