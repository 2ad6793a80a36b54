use crate::Message;
use iced::widget::{button, text};
use iced::{Element, Theme};
use trendtracker_core::{ApiError, ErrorExt};

pub const IDLE_LABEL: &str = "🕷️ Scrape New";
pub const BUSY_LABEL: &str = "🕷️ Scraping...";

/// The "Scrape New" button. While a scrape runs the button has no press
/// handler, so it cannot start an overlapping scrape.
#[derive(Debug, Default)]
pub struct ScrapeTrigger {
    busy: bool,
}

impl ScrapeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        !self.busy
    }

    pub fn label(&self) -> &'static str {
        if self.busy {
            BUSY_LABEL
        } else {
            IDLE_LABEL
        }
    }

    /// Returns `false` when a scrape is already running.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn finish(&mut self) {
        self.busy = false;
    }

    pub fn view(&self) -> Element<Message, Theme> {
        let scrape_button = button(text(self.label())).padding([8, 16]);
        if self.is_enabled() {
            scrape_button.on_press(Message::ScrapePressed).into()
        } else {
            scrape_button.into()
        }
    }
}

/// Text shown after "Error scraping trends: " for a failed scrape.
pub fn failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Http {
            status,
            server_message: None,
        } => format!("Scraping failed with status {}", status),
        other => other.user_friendly_message(),
    }
}
