//! Filter widgets. Each widget owns the selection for one filter dimension
//! and reports changes as a [`FilterUpdate`] carrying its full value.

use crate::Message;
use iced::widget::{checkbox, column, radio, text, Column};
use iced::{Element, Theme};
use trendtracker_core::FilterUpdate;

pub struct PlatformOption {
    pub name: &'static str,
    pub label: &'static str,
    pub selected_by_default: bool,
}

pub const PLATFORM_OPTIONS: [PlatformOption; 4] = [
    PlatformOption {
        name: "youtube",
        label: "YouTube",
        selected_by_default: true,
    },
    PlatformOption {
        name: "reddit",
        label: "Reddit",
        selected_by_default: true,
    },
    PlatformOption {
        name: "twitter",
        label: "Twitter",
        selected_by_default: false,
    },
    PlatformOption {
        name: "tiktok",
        label: "TikTok",
        selected_by_default: false,
    },
];

pub const CATEGORIES: [&str; 8] = [
    "funny",
    "sad",
    "emotional",
    "anime",
    "movie clips",
    "viral music",
    "viral dance",
    "technology",
];

pub fn platform_label(name: &str) -> String {
    PLATFORM_OPTIONS
        .iter()
        .find(|option| option.name == name)
        .map(|option| option.label.to_string())
        .unwrap_or_else(|| capitalize(name))
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Multi-select over the known platforms.
#[derive(Debug, Clone)]
pub struct PlatformFilter {
    selected: Vec<String>,
}

impl PlatformFilter {
    pub fn new() -> Self {
        Self {
            selected: PLATFORM_OPTIONS
                .iter()
                .filter(|option| option.selected_by_default)
                .map(|option| option.name.to_string())
                .collect(),
        }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, platform: &str) -> bool {
        self.selected.iter().any(|p| p == platform)
    }

    pub fn toggle(&mut self, platform: &str, checked: bool) -> FilterUpdate {
        if checked {
            if !self.is_selected(platform) {
                self.selected.push(platform.to_string());
            }
        } else {
            self.selected.retain(|p| p != platform);
        }
        FilterUpdate::Platforms(self.selected.clone())
    }

    pub fn view(&self) -> Element<Message, Theme> {
        let mut options = Column::new().spacing(6);
        for option in &PLATFORM_OPTIONS {
            let name = option.name;
            options = options.push(
                checkbox(option.label, self.is_selected(name))
                    .on_toggle(move |checked| Message::PlatformToggled(name.to_string(), checked)),
            );
        }

        column![text("Filter by Platform").size(18), options]
            .spacing(10)
            .into()
    }
}

impl Default for PlatformFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Single choice over [`CATEGORIES`] with an implicit "All" in front.
///
/// Choices are addressed by index: 0 is "All", `i + 1` is `CATEGORIES[i]`.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    selected: usize,
}

impl CategoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_value(&self) -> &'static str {
        Self::value_at(self.selected).unwrap_or("")
    }

    fn value_at(index: usize) -> Option<&'static str> {
        match index {
            0 => Some(""),
            i => CATEGORIES.get(i - 1).copied(),
        }
    }

    /// Returns `None` for an index outside the option list, or when the
    /// option is already selected.
    pub fn select(&mut self, index: usize) -> Option<FilterUpdate> {
        if index == self.selected {
            return None;
        }
        let value = Self::value_at(index)?;
        self.selected = index;
        Some(FilterUpdate::Category(value.to_string()))
    }

    pub fn view(&self) -> Element<Message, Theme> {
        let selected = Some(self.selected);
        let mut options = Column::new()
            .spacing(6)
            .push(radio("All", 0, selected, Message::CategorySelected));
        for (i, category) in CATEGORIES.iter().enumerate() {
            options = options.push(radio(
                capitalize(category),
                i + 1,
                selected,
                Message::CategorySelected,
            ));
        }

        column![text("Filter by Category").size(18), options]
            .spacing(10)
            .into()
    }
}
