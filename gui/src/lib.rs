pub mod filters;
pub mod notification;
pub mod scrape;
pub mod settings;
pub mod trends;


use filters::{CategoryFilter, PlatformFilter};
use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{Element, Length, Theme};
use notification::{NotificationCenter, NotificationKind};
use scrape::ScrapeTrigger;
use settings::SettingsPage;
use std::time::Duration;
use tracing::{debug, info, warn};
use trends::LoadState;
use trendtracker_core::{
    ApiError, ApiMessage, ErrorExt, FilterState, FilterUpdate, PlatformConfig, ScrapeOutcome,
    Trend,
};

#[derive(Debug, Clone)]
pub enum Message {
    PlatformToggled(String, bool),
    CategorySelected(usize),
    RefreshPressed,
    TrendsLoaded {
        seq: u64,
        result: Result<Vec<Trend>, ApiError>,
    },
    ThumbnailLoaded {
        seq: u64,
        trend_id: i64,
        result: Result<Vec<u8>, ApiError>,
    },
    TrendClicked(String),
    ScrapePressed,
    ScrapeFinished(Result<ScrapeOutcome, ApiError>),
    NotificationExpired(u64),
    NotificationRemoved(u64),
    OpenSettings,
    CloseSettings,
    SettingsLoaded(Result<PlatformConfig, ApiError>),
    TestPlatform(String),
    PlatformTested {
        platform: String,
        result: Result<ApiMessage, ApiError>,
    },
}

/// Side effects requested by [`App::update`]. The application shell turns
/// each one into an async command whose result comes back as a [`Message`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadTrends { seq: u64, filters: FilterState },
    FetchThumbnail { seq: u64, trend_id: i64, url: String },
    Scrape,
    ExpireNotification { id: u64, after: Duration },
    RemoveNotification { id: u64, after: Duration },
    OpenUrl(String),
    LoadSettings,
    TestPlatform(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Settings,
}

pub struct App {
    filters: FilterState,
    platform_filter: PlatformFilter,
    category_filter: CategoryFilter,
    trends: LoadState,
    load_seq: u64,
    /// Load that built the cards on screen.
    displayed_seq: Option<u64>,
    scrape: ScrapeTrigger,
    notifications: NotificationCenter,
    settings: SettingsPage,
    page: Page,
}

impl App {
    /// Creates the dashboard and the initial, unfiltered load.
    pub fn new() -> (Self, Vec<Action>) {
        let mut app = Self {
            filters: FilterState::new(),
            platform_filter: PlatformFilter::new(),
            category_filter: CategoryFilter::new(),
            trends: LoadState::Idle,
            load_seq: 0,
            displayed_seq: None,
            scrape: ScrapeTrigger::new(),
            notifications: NotificationCenter::new(),
            settings: SettingsPage::new(),
            page: Page::Dashboard,
        };
        let actions = app.load_trends(FilterState::new());
        (app, actions)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn trends(&self) -> &LoadState {
        &self.trends
    }

    pub fn scrape_trigger(&self) -> &ScrapeTrigger {
        &self.scrape
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn settings(&self) -> &SettingsPage {
        &self.settings
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Clears the list and requests the trends matching `filters`.
    ///
    /// Responses are applied in arrival order; an older response that lands
    /// after a newer one overwrites it.
    fn load_trends(&mut self, filters: FilterState) -> Vec<Action> {
        self.load_seq += 1;
        self.trends = LoadState::Loading;
        self.displayed_seq = None;
        debug!("Loading trends (request {}) with filters {:?}", self.load_seq, filters);
        vec![Action::LoadTrends {
            seq: self.load_seq,
            filters,
        }]
    }

    fn apply_filter_update(&mut self, update: FilterUpdate) -> Vec<Action> {
        self.filters.merge(update);
        self.load_trends(self.filters.clone())
    }

    fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> Vec<Action> {
        vec![self.notifications.show(message, kind)]
    }

    pub fn update(&mut self, message: Message) -> Vec<Action> {
        match message {
            Message::PlatformToggled(platform, checked) => {
                let update = self.platform_filter.toggle(&platform, checked);
                self.apply_filter_update(update)
            }
            Message::CategorySelected(index) => match self.category_filter.select(index) {
                Some(update) => self.apply_filter_update(update),
                None => {
                    debug!("Category option {} left the filter unchanged", index);
                    Vec::new()
                }
            },
            Message::RefreshPressed => self.load_trends(self.filters.clone()),
            Message::TrendsLoaded { seq, result } => self.trends_loaded(seq, result),
            Message::ThumbnailLoaded {
                seq,
                trend_id,
                result,
            } => {
                if self.displayed_seq != Some(seq) {
                    debug!(
                        "Dropping thumbnail for trend {} from request {} (showing {:?})",
                        trend_id, seq, self.displayed_seq
                    );
                    return Vec::new();
                }
                for card in self
                    .trends
                    .cards_mut()
                    .iter_mut()
                    .filter(|card| card.id == trend_id)
                {
                    match &result {
                        Ok(bytes) => card.thumbnail.loaded(bytes),
                        Err(e) => {
                            if card.thumbnail.failed() {
                                debug!("Thumbnail for trend {} failed: {}", trend_id, e);
                            }
                        }
                    }
                }
                Vec::new()
            }
            Message::TrendClicked(url) => vec![Action::OpenUrl(url)],
            Message::ScrapePressed => {
                if self.scrape.begin() {
                    info!("Scraping new trends");
                    vec![Action::Scrape]
                } else {
                    Vec::new()
                }
            }
            Message::ScrapeFinished(result) => {
                self.scrape.finish();
                match result {
                    Ok(outcome) => {
                        info!("Scrape finished: {}", outcome.message);
                        let mut actions = self.notify(outcome.message, NotificationKind::Success);
                        actions.extend(self.load_trends(self.filters.clone()));
                        actions
                    }
                    Err(e) => {
                        e.log_warn();
                        self.notify(
                            format!("Error scraping trends: {}", scrape::failure_message(&e)),
                            NotificationKind::Error,
                        )
                    }
                }
            }
            Message::NotificationExpired(id) => self.notifications.expire(id).into_iter().collect(),
            Message::NotificationRemoved(id) => {
                self.notifications.remove(id);
                Vec::new()
            }
            Message::OpenSettings => {
                self.page = Page::Settings;
                self.settings.begin_loading();
                vec![Action::LoadSettings]
            }
            Message::CloseSettings => {
                self.page = Page::Dashboard;
                Vec::new()
            }
            Message::SettingsLoaded(result) => {
                if let Err(e) = &result {
                    e.log_warn();
                }
                match self.settings.loaded(result) {
                    Some(message) => self.notify(message, NotificationKind::Error),
                    None => Vec::new(),
                }
            }
            Message::TestPlatform(platform) => {
                info!("Testing {} API connection", platform);
                vec![Action::TestPlatform(platform)]
            }
            Message::PlatformTested { platform, result } => {
                let (message, kind) = settings::test_result_notification(&platform, &result);
                self.notify(message, kind)
            }
        }
    }

    fn trends_loaded(&mut self, seq: u64, result: Result<Vec<Trend>, ApiError>) -> Vec<Action> {
        if seq != self.load_seq {
            warn!(
                "Applying response for request {} while request {} is the latest",
                seq, self.load_seq
            );
        }

        match result {
            Ok(trends) => {
                info!("Displaying {} trends (request {})", trends.len(), seq);
                let cards = trends::build_cards(&trends);
                let actions = cards
                    .iter()
                    .filter_map(|card| {
                        card.thumbnail.pending_url().map(|url| Action::FetchThumbnail {
                            seq,
                            trend_id: card.id,
                            url: url.to_string(),
                        })
                    })
                    .collect();
                self.trends = LoadState::Displayed(cards);
                self.displayed_seq = Some(seq);
                actions
            }
            Err(e) => {
                e.log_warn();
                let message = format!("Error loading trends: {}", e);
                self.trends = LoadState::Errored(message.clone());
                self.notify(message, NotificationKind::Error)
            }
        }
    }

    pub fn view(&self) -> Element<Message, Theme> {
        let page: Element<Message, Theme> = match self.page {
            Page::Dashboard => self.dashboard_view(),
            Page::Settings => self.settings.view(),
        };

        let mut main_content = Column::new().spacing(16);
        if let Some(banner) = self.notifications.view() {
            main_content = main_content.push(banner);
        }
        main_content = main_content.push(page);

        container(main_content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .into()
    }

    fn dashboard_view(&self) -> Element<Message, Theme> {
        let title: Element<Message, Theme> = text("TrendTracker").size(28).into();

        let toolbar = row![
            button("🔄 Refresh").on_press(Message::RefreshPressed),
            self.scrape.view(),
            button("⚙️ Settings").on_press(Message::OpenSettings),
        ]
        .spacing(10);

        let sidebar = column![self.platform_filter.view(), self.category_filter.view()]
            .spacing(24)
            .width(Length::Fixed(240.0));

        let list = scrollable(container(trends::view(&self.trends)).padding([0, 12, 0, 0]))
            .width(Length::Fill)
            .height(Length::Fill);

        column![title, toolbar, row![sidebar, list].spacing(20)]
            .spacing(20)
            .into()
    }
}
