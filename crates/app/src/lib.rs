//! Desktop window for `statdash`.
//!
//! Owns the Iced application loop and wires together all background tasks:
//! - Stats poller (one fetch per interval, never overlapping)
//! - Desktop colour-scheme watcher (only while the theme is on `auto`)
//! - Config file watcher (live reload of theme and layout)
//! - 1-second timer (header clock and uptime)

pub mod state;

pub use state::{banner_text, DashboardState};

use chrono::{DateTime, Local};
use futures::{channel::mpsc::Sender, SinkExt};
use iced::{
    widget::{column, container, row, text},
    Element, Length, Size, Subscription, Task,
};
use statdash_client::{spawn_poller, StatsClient};
use statdash_config::{load as load_config, ConfigWatcher, DashConfig, PreferenceStore};
use statdash_core::{ColorScheme, Message, ThemePreference, Timestamp};
use statdash_metrics::MetricId;
use statdash_theme::{load_preference, save_preference, spawn_scheme_watcher, Theme};
use statdash_widgets::{ClientsTable, ErrorBanner, Header, MetricCard, NumberLocale, RequestsTable};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

/// Re-read interval for the desktop colour scheme when the portal cannot
/// push changes.
const SCHEME_FALLBACK_INTERVAL: Duration = Duration::from_secs(5);

// ── Entry point ───────────────────────────────────────────────────────────────

/// Everything needed to start a session.
#[derive(Debug, Clone)]
pub struct Launch {
    pub config:      DashConfig,
    pub config_path: PathBuf,
    pub prefs_path:  PathBuf,
}

/// Open the dashboard window.  Returns when the window is closed.
pub fn run(launch: Launch) -> iced::Result {
    info!(
        endpoint = %launch.config.poll.endpoint,
        interval_ms = launch.config.poll.interval_ms,
        "Starting dashboard"
    );

    iced::application(move || Dashboard::new(launch.clone()), Dashboard::update, Dashboard::view)
        .title("Proxy statistics")
        .subscription(Dashboard::subscription)
        .style(Dashboard::style)
        .theme(Dashboard::iced_theme)
        .window_size(Size::new(1100.0, 760.0))
        .run()
}

// ── State ─────────────────────────────────────────────────────────────────────

/// What the poll subscription is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PollTarget {
    endpoint: String,
    interval: Duration,
    timeout:  Duration,
}

/// What the config watcher subscription is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WatchTarget(PathBuf);

impl PollTarget {
    fn from_config(config: &DashConfig) -> Self {
        Self {
            endpoint: config.poll.endpoint.clone(),
            interval: Duration::from_millis(config.poll.interval_ms),
            timeout:  Duration::from_millis(config.poll.effective_timeout_ms()),
        }
    }
}

struct Dashboard {
    state:         DashboardState,
    config:        DashConfig,
    config_path:   PathBuf,
    poll:          PollTarget,
    prefs:         PreferenceStore,
    preference:    ThemePreference,
    system_scheme: ColorScheme,
    theme:         Theme,
    locale:        NumberLocale,
    now:           DateTime<Local>,
    // Widgets
    header:        Header,
    banner:        ErrorBanner,
    cards:         Vec<MetricCard>,
    requests:      RequestsTable,
    clients:       ClientsTable,
}

impl Dashboard {
    fn new(launch: Launch) -> (Self, Task<Message>) {
        let Launch { config, config_path, prefs_path } = launch;

        let prefs = PreferenceStore::open(prefs_path);
        let preference = load_preference(&prefs);
        let system_scheme = ColorScheme::default();
        let theme = Theme::from_config(&config.theme, preference.resolve(system_scheme));
        let locale = NumberLocale::from_env();
        info!(%preference, ?locale, "Appearance initialised");

        let dashboard = Self {
            state: DashboardState::new(config.history.capacity, config.poll.interval_secs()),
            poll: PollTarget::from_config(&config),
            config,
            config_path,
            prefs,
            preference,
            system_scheme,
            theme,
            locale,
            now: Local::now(),
            header: Header::new(),
            banner: ErrorBanner::new(),
            cards: MetricId::ALL.into_iter().map(MetricCard::new).collect(),
            requests: RequestsTable::new(),
            clients: ClientsTable::new(),
        };

        (dashboard, Task::none())
    }

    fn apply_theme(&mut self) {
        let scheme = self.preference.resolve(self.system_scheme);
        self.theme = Theme::from_config(&self.config.theme, scheme);
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::StatsReceived(snapshot) => {
                self.now = Local::now();
                let received_at = Timestamp::from_millis(self.now.timestamp_millis());
                self.state.apply_stats(*snapshot, received_at);
            }
            Message::FetchFailed(text) => {
                self.state.apply_failure(text);
            }
            Message::ConfigReloaded => self.reload_config(),
            Message::ThemeSelected(preference) => {
                self.preference = preference;
                if let Err(e) = save_preference(&mut self.prefs, preference) {
                    warn!("Could not save theme preference: {e}");
                }
                self.apply_theme();
            }
            Message::ColorSchemeDetected(scheme) => {
                self.system_scheme = scheme;
                self.apply_theme();
            }
            Message::Tick => {
                self.now = Local::now();
            }
        }
        Task::none()
    }

    fn reload_config(&mut self) {
        match load_config(&self.config_path) {
            Ok(cfg) => {
                if cfg.poll != self.config.poll || cfg.history != self.config.history {
                    info!("Poll and history settings take effect on restart");
                }
                self.config.layout = cfg.layout;
                self.config.theme = cfg.theme;
                self.apply_theme();
                info!("Config reloaded");
            }
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let gap = f32::from(self.theme.gap);
        let layout = &self.config.layout;
        let snapshot = self.state.snapshot();

        let header = self.header.view(
            snapshot,
            self.state.last_update(),
            self.now,
            self.preference,
            &self.theme,
        );

        let summary: Element<'_, Message> = match (self.state.error(), snapshot) {
            (Some(message), _) => self.banner.view(message, &self.theme),
            (None, Some(snapshot)) => {
                let engine = self.state.engine();
                let cards = self.cards.iter().zip(MetricId::ALL).filter_map(|(card, id)| {
                    let metric = engine.state(id)?;
                    Some(card.view(
                        snapshot,
                        metric,
                        engine.capacity(),
                        layout.graph_height,
                        &self.locale,
                        &self.theme,
                    ))
                });
                row(cards).spacing(gap).into()
            }
            (None, None) => text("Waiting for data…")
                .size(self.theme.font_size)
                .color(self.theme.muted.to_iced())
                .into(),
        };

        let mut tables = row![].spacing(gap).height(Length::Fill);
        if let Some(snapshot) = snapshot {
            if layout.show_recent_requests {
                tables = tables.push(
                    container(self.requests.view(
                        &snapshot.recent_requests,
                        layout.max_recent_rows,
                        &self.locale,
                        &self.theme,
                    ))
                    .width(Length::FillPortion(3)),
                );
            }
            if layout.show_client_stats {
                tables = tables.push(
                    container(self.clients.view(&snapshot.client_stats, &self.locale, &self.theme))
                        .width(Length::FillPortion(2)),
                );
            }
        }

        container(column![header, summary, tables].spacing(gap))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(self.theme.padding)
            .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            iced::time::every(Duration::from_secs(1)).map(|_| Message::Tick),
            Subscription::run_with(self.poll.clone(), poll_stream),
            Subscription::run_with(WatchTarget(self.config_path.clone()), config_stream),
        ];
        if self.preference == ThemePreference::Auto {
            subscriptions.push(Subscription::run(scheme_stream));
        }
        Subscription::batch(subscriptions)
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.theme.background.to_iced(),
            text_color: self.theme.foreground.to_iced(),
        }
    }

    /// Built-in Iced theme for widgets we don't style ourselves (pick list,
    /// scrollbars).
    fn iced_theme(&self) -> iced::Theme {
        match self.theme.scheme {
            ColorScheme::Light => iced::Theme::Light,
            ColorScheme::Dark => iced::Theme::Dark,
        }
    }
}

// ── Subscription streams ──────────────────────────────────────────────────────

/// Runs the stats poller and forwards every outcome as a message.
fn poll_stream(target: &PollTarget) -> impl iced::futures::Stream<Item = Message> {
    let target = target.clone();

    iced::stream::channel(4, move |mut sender: Sender<Message>| async move {
        let client = build_with_retry(
            target.interval,
            || StatsClient::new(target.endpoint.clone(), target.timeout),
            |e| {
                error!("Cannot build HTTP client, retrying: {e}");
                let mut sender = sender.clone();
                async move { sender.send(Message::FetchFailed(banner_text(&e))).await.is_ok() }
            },
        )
        .await;
        let Some(client) = client else {
            return;
        };

        let mut rx = spawn_poller(client, target.interval);
        while let Some(outcome) = rx.recv().await {
            let message = match outcome {
                Ok(snapshot) => Message::StatsReceived(Box::new(snapshot)),
                Err(e) => Message::FetchFailed(banner_text(&e)),
            };
            if sender.send(message).await.is_err() {
                break;
            }
        }
    })
}

/// Call `build` until it succeeds, sleeping `interval` between attempts.
/// Each failure goes to `report`; a `false` from it gives up.
async fn build_with_retry<T, E, B, R, F>(interval: Duration, mut build: B, mut report: R) -> Option<T>
where
    B: FnMut() -> Result<T, E>,
    R: FnMut(E) -> F,
    F: Future<Output = bool>,
{
    loop {
        match build() {
            Ok(value) => return Some(value),
            Err(e) => {
                if !report(e).await {
                    return None;
                }
                tokio::time::sleep(interval).await;
            }
        }
    }
}

/// Reports the desktop colour scheme whenever it changes.
fn scheme_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let mut rx = spawn_scheme_watcher(SCHEME_FALLBACK_INTERVAL);

        while let Some(scheme) = rx.recv().await {
            if sender.send(Message::ColorSchemeDetected(scheme)).await.is_err() {
                break;
            }
        }
    })
}

/// Watches the config file for writes and sends `ConfigReloaded`.
fn config_stream(target: &WatchTarget) -> impl iced::futures::Stream<Item = Message> {
    let WatchTarget(path) = target.clone();

    iced::stream::channel(1, move |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(&path);

        while rx.recv().await.is_some() {
            // A full channel already holds a pending reload.
            if let Err(e) = sender.try_send(Message::ConfigReloaded) {
                if e.is_disconnected() {
                    return;
                }
            }
        }

        // Watcher could not start; keep the subscription alive without it.
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn client_build_retries_until_it_succeeds() {
        let attempts = Cell::new(0);
        let reported = Cell::new(0);

        let built = build_with_retry(
            Duration::from_millis(1),
            || {
                attempts.set(attempts.get() + 1);
                if attempts.get() < 3 { Err("tls backend unavailable") } else { Ok(attempts.get()) }
            },
            |_| {
                reported.set(reported.get() + 1);
                async { true }
            },
        )
        .await;

        assert_eq!(built, Some(3));
        assert_eq!(reported.get(), 2);
    }

    #[tokio::test]
    async fn client_build_stops_when_nobody_listens() {
        let attempts = Cell::new(0);

        let built: Option<()> = build_with_retry(
            Duration::from_millis(1),
            || {
                attempts.set(attempts.get() + 1);
                Err("tls backend unavailable")
            },
            |_| async { false },
        )
        .await;

        assert_eq!(built, None);
        assert_eq!(attempts.get(), 1);
    }
}
