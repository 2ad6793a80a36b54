use crate::{Action, Message};
use iced::widget::{container, text};
use iced::{Color, Element, Length, Theme};
use std::time::Duration;
use tracing::debug;

/// How long a banner stays fully visible.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(3000);
/// Length of the exit transition before the banner is removed.
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Leaving,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub phase: Phase,
}

/// Holds at most one transient banner.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Replaces whatever banner is showing and schedules the new one's dismissal.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) -> Action {
        self.next_id += 1;
        let id = self.next_id;
        if let Some(previous) = self.current.take() {
            debug!("Replacing notification {}", previous.id);
        }
        self.current = Some(Notification {
            id,
            message: message.into(),
            kind,
            phase: Phase::Visible,
        });
        Action::ExpireNotification {
            id,
            after: DISPLAY_DURATION,
        }
    }

    /// Starts the exit transition. Timers of replaced banners are ignored.
    pub fn expire(&mut self, id: u64) -> Option<Action> {
        match self.current.as_mut() {
            Some(notification) if notification.id == id && notification.phase == Phase::Visible => {
                notification.phase = Phase::Leaving;
                Some(Action::RemoveNotification {
                    id,
                    after: EXIT_DURATION,
                })
            }
            _ => None,
        }
    }

    pub fn remove(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
        }
    }

    pub fn view(&self) -> Option<Element<Message, Theme>> {
        let notification = self.current.as_ref()?;
        let alpha = match notification.phase {
            Phase::Visible => 1.0,
            Phase::Leaving => 0.4,
        };
        let color = match notification.kind {
            NotificationKind::Success => Color::from_rgba(0.30, 0.69, 0.31, alpha),
            NotificationKind::Error => Color::from_rgba(0.96, 0.26, 0.21, alpha),
        };

        Some(
            container(text(&notification.message).size(15).style(color))
                .padding(12)
                .width(Length::Fill)
                .style(iced::theme::Container::Box)
                .into(),
        )
    }
}
