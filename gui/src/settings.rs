use crate::filters::{capitalize, platform_label};
use crate::notification::NotificationKind;
use crate::Message;
use iced::widget::{button, checkbox, column, row, text, Column};
use iced::{Element, Theme};
use trendtracker_core::{ApiError, ApiMessage, ErrorExt, PlatformConfig};

/// Platforms that have a connection test on the backend.
pub const TESTABLE_PLATFORMS: [&str; 2] = ["youtube", "reddit"];

pub const LOAD_FAILED_MESSAGE: &str = "Error loading configuration.";

#[derive(Debug, Clone, Default)]
pub enum SettingsState {
    #[default]
    Loading,
    Loaded(PlatformConfig),
    Failed,
}

#[derive(Debug, Default)]
pub struct SettingsPage {
    state: SettingsState,
}

impl SettingsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SettingsState {
        &self.state
    }

    pub fn begin_loading(&mut self) {
        self.state = SettingsState::Loading;
    }

    /// Returns the notification to show when loading failed.
    pub fn loaded(&mut self, result: Result<PlatformConfig, ApiError>) -> Option<String> {
        match result {
            Ok(config) => {
                self.state = SettingsState::Loaded(config);
                None
            }
            Err(_) => {
                self.state = SettingsState::Failed;
                Some(LOAD_FAILED_MESSAGE.to_string())
            }
        }
    }

    pub fn view(&self) -> Element<Message, Theme> {
        let platforms: Element<Message, Theme> = match &self.state {
            SettingsState::Loading => text("Loading configuration...").into(),
            SettingsState::Failed => text(LOAD_FAILED_MESSAGE).into(),
            SettingsState::Loaded(config) => {
                let mut list = Column::new().spacing(6);
                for (name, settings) in &config.platforms {
                    // Read-only: enabling platforms is done on the backend.
                    list = list.push(checkbox(capitalize(name), settings.enabled));
                }
                list.into()
            }
        };

        let mut tests = row![].spacing(10);
        for platform in TESTABLE_PLATFORMS {
            tests = tests.push(
                button(text(format!("Test {} API", platform_label(platform))))
                    .on_press(Message::TestPlatform(platform.to_string())),
            );
        }

        column![
            row![
                text("Settings").size(24),
                button("Back").on_press(Message::CloseSettings),
            ]
            .spacing(20),
            text("Platforms").size(18),
            platforms,
            text("Test API Connections").size(18),
            tests,
        ]
        .spacing(16)
        .into()
    }
}

/// Maps a connection test result onto the banner it should produce.
pub fn test_result_notification(
    platform: &str,
    result: &Result<ApiMessage, ApiError>,
) -> (String, NotificationKind) {
    match result {
        Ok(reply) => (reply.message.clone(), NotificationKind::Success),
        Err(error) => {
            let message = match error.server_message() {
                Some(message) => message.to_string(),
                None => format!(
                    "Error testing {} API: {}",
                    platform_label(platform),
                    error.user_friendly_message()
                ),
            };
            (message, NotificationKind::Error)
        }
    }
}
