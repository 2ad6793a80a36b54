use gui::{Action, App, Message};
use iced::{Application, Command, Settings};
use trendtracker_core::{
    CoreError, DashboardConfig, ErrorReporter, DEFAULT_CONFIG_FILE, MIN_WINDOW_HEIGHT,
    MIN_WINDOW_WIDTH,
};
use trends_client::{ApiEndpoint, TrendsClient};

fn main() -> Result<(), CoreError> {
    let (config, config_error) = match DashboardConfig::load(DEFAULT_CONFIG_FILE) {
        Ok(config) => (config, None),
        Err(e) => (DashboardConfig::default(), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .init();

    let reporter = ErrorReporter::new("startup");
    if let Some(e) = config_error {
        reporter.report_warning(&e);
        tracing::warn!("Falling back to default configuration");
    }

    tracing::info!("Starting TrendTracker dashboard");

    let endpoint = ApiEndpoint::for_host(&config.host);
    tracing::info!("Using backend at {}", endpoint.base_url());
    let client = TrendsClient::new(endpoint).map_err(|e| {
        reporter.report_error(&e);
        e
    })?;

    let settings = Settings {
        window: iced::window::Settings {
            size: iced::Size::new(config.window.width, config.window.height),
            min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
            ..Default::default()
        },
        ..Settings::with_flags(client)
    };

    TrendTrackerApp::run(settings).map_err(|e| {
        let error = CoreError::Internal {
            message: format!("GUI error: {e}"),
        };
        reporter.report_error(&error);
        error
    })
}

struct TrendTrackerApp {
    app: App,
    client: TrendsClient,
}

impl TrendTrackerApp {
    fn perform(&self, action: Action) -> Command<Message> {
        let client = self.client.clone();
        match action {
            Action::LoadTrends { seq, filters } => Command::perform(
                async move { client.fetch_trends(&filters).await },
                move |result| Message::TrendsLoaded { seq, result },
            ),
            Action::FetchThumbnail { seq, trend_id, url } => Command::perform(
                async move { client.fetch_thumbnail(&url).await },
                move |result| Message::ThumbnailLoaded {
                    seq,
                    trend_id,
                    result,
                },
            ),
            Action::Scrape => Command::perform(
                async move { client.scrape_enabled_platforms().await },
                Message::ScrapeFinished,
            ),
            Action::ExpireNotification { id, after } => {
                Command::perform(tokio::time::sleep(after), move |_| {
                    Message::NotificationExpired(id)
                })
            }
            Action::RemoveNotification { id, after } => {
                Command::perform(tokio::time::sleep(after), move |_| {
                    Message::NotificationRemoved(id)
                })
            }
            Action::OpenUrl(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::error!("Failed to open {}: {}", url, e);
                }
                Command::none()
            }
            Action::LoadSettings => Command::perform(
                async move { client.fetch_config().await },
                Message::SettingsLoaded,
            ),
            Action::TestPlatform(platform) => Command::perform(
                async move {
                    let result = client.test_platform(&platform).await;
                    (platform, result)
                },
                |(platform, result)| Message::PlatformTested { platform, result },
            ),
        }
    }

    fn perform_all(&self, actions: Vec<Action>) -> Command<Message> {
        Command::batch(actions.into_iter().map(|action| self.perform(action)))
    }
}

impl Application for TrendTrackerApp {
    type Message = Message;
    type Theme = iced::Theme;
    type Executor = iced::executor::Default;
    type Flags = TrendsClient;

    fn new(client: Self::Flags) -> (Self, Command<Self::Message>) {
        tracing::info!("Initializing application");
        let (app, actions) = App::new();
        let this = Self { app, client };
        let command = this.perform_all(actions);
        (this, command)
    }

    fn title(&self) -> String {
        "TrendTracker".to_string()
    }

    fn update(&mut self, message: Self::Message) -> Command<Self::Message> {
        let actions = self.app.update(message);
        self.perform_all(actions)
    }

    fn view(&self) -> iced::Element<Self::Message> {
        self.app.view()
    }
}
