//! Trend list state and card rendering.

use crate::Message;
use iced::widget::{button, column, container, image, row, svg, text, Column};
use iced::{Alignment, Color, Element, Length, Theme};
use tracing::debug;
use trendtracker_core::Trend;

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNKNOWN_DATE: &str = "Unknown date";
pub const NO_TRENDS_MESSAGE: &str = "No trends found.";
pub const LOADING_MESSAGE: &str = "Loading trends...";

const PLAY_PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><rect width="100" height="100" fill="#ddd"/><text x="50" y="55" font-size="40" text-anchor="middle" fill="#888">▶️</text></svg>"##;
const BROKEN_PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><rect width="100" height="100" fill="#ddd"/><text x="50" y="55" font-size="40" text-anchor="middle" fill="#888">❌</text></svg>"##;

const THUMBNAIL_SIZE: f32 = 96.0;

/// `Idle → Loading → {Displayed | Errored}`; every load restarts at `Loading`.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Displayed(Vec<TrendCard>),
    Errored(String),
}

impl LoadState {
    pub fn cards(&self) -> &[TrendCard] {
        match self {
            LoadState::Displayed(cards) => cards,
            _ => &[],
        }
    }

    pub fn cards_mut(&mut self) -> &mut [TrendCard] {
        match self {
            LoadState::Displayed(cards) => cards,
            _ => &mut [],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

#[derive(Debug, Clone)]
pub enum ThumbnailSource {
    Placeholder,
    Fetching(String),
    Loaded(image::Handle),
    Broken,
}

/// Card thumbnail. The failure fallback is armed once and disarms itself
/// after firing, so a failing fallback can never loop.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    source: ThumbnailSource,
    fallback_armed: bool,
}

impl Thumbnail {
    pub fn for_url(url: Option<&str>) -> Self {
        let source = match url {
            Some(url) if !url.trim().is_empty() => ThumbnailSource::Fetching(url.to_string()),
            _ => ThumbnailSource::Placeholder,
        };
        Self {
            source,
            fallback_armed: true,
        }
    }

    pub fn source(&self) -> &ThumbnailSource {
        &self.source
    }

    pub fn pending_url(&self) -> Option<&str> {
        match &self.source {
            ThumbnailSource::Fetching(url) => Some(url),
            _ => None,
        }
    }

    /// Bytes that do not decode as an image count as a failed load.
    pub fn loaded(&mut self, bytes: &[u8]) {
        if !matches!(self.source, ThumbnailSource::Fetching(_)) {
            return;
        }
        match ::image::load_from_memory(bytes) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                let (width, height) = rgba.dimensions();
                self.source = ThumbnailSource::Loaded(image::Handle::from_pixels(
                    width,
                    height,
                    rgba.into_raw(),
                ));
            }
            Err(e) => {
                debug!("Thumbnail did not decode ({} bytes): {}", bytes.len(), e);
                self.failed();
            }
        }
    }

    /// Returns `true` when the fallback fired.
    pub fn failed(&mut self) -> bool {
        if !self.fallback_armed {
            return false;
        }
        self.fallback_armed = false;
        self.source = ThumbnailSource::Broken;
        true
    }

    fn view(&self) -> Element<Message, Theme> {
        match &self.source {
            ThumbnailSource::Loaded(handle) => image(handle.clone())
                .width(THUMBNAIL_SIZE)
                .height(THUMBNAIL_SIZE)
                .into(),
            ThumbnailSource::Broken => placeholder(BROKEN_PLACEHOLDER_SVG),
            ThumbnailSource::Placeholder | ThumbnailSource::Fetching(_) => {
                placeholder(PLAY_PLACEHOLDER_SVG)
            }
        }
    }
}

fn placeholder<'a>(markup: &'static str) -> Element<'a, Message, Theme> {
    svg(svg::Handle::from_memory(markup.as_bytes()))
        .width(THUMBNAIL_SIZE)
        .height(THUMBNAIL_SIZE)
        .into()
}

/// Display-ready view of one trend.
#[derive(Debug, Clone)]
pub struct TrendCard {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub author: String,
    pub published: String,
    pub views: String,
    pub likes: String,
    pub comments: String,
    pub platform: String,
    pub category: Option<String>,
    pub thumbnail: Thumbnail,
}

impl From<&Trend> for TrendCard {
    fn from(trend: &Trend) -> Self {
        Self {
            id: trend.id,
            title: trend.title.clone(),
            url: trend.url.clone(),
            author: trend
                .author
                .clone()
                .filter(|author| !author.is_empty())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            published: trend
                .published_at
                .map(|published| published.format("%-m/%-d/%Y").to_string())
                .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            views: format_stat(trend.view_count),
            likes: format_stat(trend.like_count),
            comments: format_stat(trend.comment_count),
            platform: trend.platform.clone(),
            category: trend.category.clone().filter(|c| !c.is_empty()),
            thumbnail: Thumbnail::for_url(trend.thumbnail_url.as_deref()),
        }
    }
}

/// Cards in the order the backend returned them.
pub fn build_cards(trends: &[Trend]) -> Vec<TrendCard> {
    trends.iter().map(TrendCard::from).collect()
}

pub fn format_stat(value: Option<u64>) -> String {
    value
        .map(format_count)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `1234567` → `1,234,567`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}

impl TrendCard {
    fn view(&self) -> Element<Message, Theme> {
        let stats = row![
            text(format!("👁️ {}", self.views)).size(13),
            text(format!("👍 {}", self.likes)).size(13),
            text(format!("💬 {}", self.comments)).size(13),
        ]
        .spacing(16);

        let mut tags = row![text(&self.platform).size(12)].spacing(8);
        if let Some(category) = &self.category {
            tags = tags.push(text(category).size(12));
        }

        let content = column![
            text(&self.title).size(17),
            row![text(&self.author).size(13), text(&self.published).size(13)].spacing(12),
            stats,
            tags,
        ]
        .spacing(6);

        let body = row![self.thumbnail.view(), content]
            .spacing(12)
            .align_items(Alignment::Center);

        button(container(body).padding(10).width(Length::Fill))
            .on_press(Message::TrendClicked(self.url.clone()))
            .style(iced::theme::Button::Secondary)
            .width(Length::Fill)
            .into()
    }
}

/// The line shown instead of the card list, if any.
pub fn status_text(state: &LoadState) -> Option<&str> {
    match state {
        LoadState::Idle | LoadState::Loading => Some(LOADING_MESSAGE),
        LoadState::Errored(message) => Some(message),
        LoadState::Displayed(cards) if cards.is_empty() => Some(NO_TRENDS_MESSAGE),
        LoadState::Displayed(_) => None,
    }
}

pub fn view(state: &LoadState) -> Element<Message, Theme> {
    if let Some(status) = status_text(state) {
        let line = text(status).size(16);
        return match state {
            LoadState::Errored(_) => line.style(Color::from_rgb(0.96, 0.26, 0.21)).into(),
            _ => line.into(),
        };
    }

    let mut list = Column::new().spacing(10);
    for card in state.cards() {
        list = list.push(card.view());
    }
    list.into()
}
