use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use rand::thread_rng;
use tokio::task::JoinHandle;

use crate::auth::UserAuth;
use crate::chat::{ChatClient, ChatError, ChatSession};
use crate::config::Config;
use crate::market::{
    self, IndexQuote, Mover, NewsItem, Period, PriceSeries, Signal, StockStats,
};
use crate::theme::Theme;

/// Top-level views. One-to-one with the routes of the original web UI:
/// `/`, `/dashboard`, `/stock/:ticker`, `/login`, `/signup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Dashboard,
    StockDetail,
    Login,
    Signup,
}

/// In-page tabs on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Assistant,
    Market,
    Watchlist,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 3] =
        [DashboardTab::Assistant, DashboardTab::Market, DashboardTab::Watchlist];

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Assistant => "AI Assistant",
            DashboardTab::Market => "Market Overview",
            DashboardTab::Watchlist => "Watchlist",
        }
    }

    pub fn next(&self) -> DashboardTab {
        match self {
            DashboardTab::Assistant => DashboardTab::Market,
            DashboardTab::Market => DashboardTab::Watchlist,
            DashboardTab::Watchlist => DashboardTab::Assistant,
        }
    }

    pub fn prev(&self) -> DashboardTab {
        match self {
            DashboardTab::Assistant => DashboardTab::Watchlist,
            DashboardTab::Market => DashboardTab::Assistant,
            DashboardTab::Watchlist => DashboardTab::Market,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Name,
    Email,
    Password,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub auth: UserAuth,

    // Chat state (lives and dies with the dashboard view)
    pub chat: ChatSession,
    pub chat_client: ChatClient,
    pub chat_input: String,
    pub chat_cursor: usize, // cursor position in chat_input, in chars
    pub chat_scroll: u16,
    pub chat_area_height: u16,
    pub chat_area_width: u16,
    pub chat_task: Option<JoinHandle<Result<String, ChatError>>>,
    pub animation_frame: u8, // 0-2 for the thinking ellipsis

    // Dashboard state
    pub tab: DashboardTab,
    pub quick_selected: usize, // index into POPULAR_TICKERS
    pub snapshot: Vec<IndexQuote>,
    pub gainers: Vec<Mover>,
    pub losers: Vec<Mover>,
    pub overview_series: PriceSeries,

    // Detail state
    pub detail_ticker: String,
    pub detail_period: Period,
    pub detail_stats: StockStats,
    pub detail_series: PriceSeries,
    pub detail_signal: Signal,
    pub detail_news: Vec<NewsItem>,

    // Watchlist (in-memory only)
    pub watchlist: Vec<String>,
    pub watchlist_state: ListState,

    // Home menu
    pub home_selected: usize,

    // Login form
    pub login_email: String,
    pub login_password: String,
    pub login_field: LoginField,
    pub login_error: Option<String>,

    // Signup form
    pub signup_name: String,
    pub signup_email: String,
    pub signup_password: String,
    pub signup_field: SignupField,
    pub signup_error: Option<String>,

    // Panel areas for mouse hit-testing (updated during render)
    pub chat_area: Option<Rect>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let timeout = config.request_timeout_secs.map(std::time::Duration::from_secs);
        let chat_client = ChatClient::new(&config.endpoint, timeout);

        let mut rng = thread_rng();
        let ticker = config.default_ticker.clone();
        let snapshot = market::market_snapshot(&mut rng);
        let (gainers, losers) = market::top_movers(&mut rng);
        let overview_series = PriceSeries::generate(&ticker, Period::OneMonth, &mut rng);
        let detail_stats = StockStats::generate(&ticker, &mut rng);
        let detail_series = PriceSeries::generate(&ticker, Period::OneMonth, &mut rng);
        let detail_signal = market::analysis_signal(&mut rng);
        let detail_news = market::news_items(&detail_stats.name, &ticker);

        Self {
            should_quit: false,
            screen: Screen::Home,
            input_mode: InputMode::Normal,
            theme: config.theme,
            auth: UserAuth::default(),

            chat: ChatSession::new(),
            chat_client,
            chat_input: String::new(),
            chat_cursor: 0,
            chat_scroll: 0,
            chat_area_height: 0,
            chat_area_width: 0,
            chat_task: None,
            animation_frame: 0,

            tab: DashboardTab::Assistant,
            quick_selected: 0,
            snapshot,
            gainers,
            losers,
            overview_series,

            detail_ticker: ticker,
            detail_period: Period::OneMonth,
            detail_stats,
            detail_series,
            detail_signal,
            detail_news,

            watchlist: Vec::new(),
            watchlist_state: ListState::default(),

            home_selected: 0,

            login_email: String::new(),
            login_password: String::new(),
            login_field: LoginField::Email,
            login_error: None,

            signup_name: String::new(),
            signup_email: String::new(),
            signup_password: String::new(),
            signup_field: SignupField::Name,
            signup_error: None,

            chat_area: None,
        }
    }

    // Screen navigation

    /// Switch screens. Leaving the dashboard tears down the chat view:
    /// the transcript is discarded and any in-flight request is detached
    /// (never cancelled), so a late settlement has nowhere to land.
    pub fn navigate(&mut self, screen: Screen) {
        if self.screen == Screen::Dashboard && screen != Screen::Dashboard {
            self.chat.reset();
            self.chat_input.clear();
            self.chat_cursor = 0;
            self.chat_scroll = 0;
            self.chat_task = None;
        }
        self.input_mode = InputMode::Normal;
        self.screen = screen;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        // Best-effort persistence; a read-only config dir shouldn't break the UI
        let _ = Config::save_theme(self.theme);
    }

    // Chat

    pub fn selected_quick_ticker(&self) -> &'static str {
        market::POPULAR_TICKERS[self.quick_selected.min(market::POPULAR_TICKERS.len() - 1)]
    }

    /// Submit whatever is in the input box. The session enforces both the
    /// non-empty precondition and the single-flight gate; a rejected
    /// submission leaves the input untouched.
    pub fn submit_chat(&mut self) {
        let Some(query) = self.chat.begin(&self.chat_input) else {
            return;
        };
        self.chat_input.clear();
        self.chat_cursor = 0;
        self.scroll_chat_to_bottom();

        tracing::info!(query = %query, "dispatching chat query");
        let client = self.chat_client.clone();
        self.chat_task = Some(tokio::spawn(async move { client.query(&query).await }));
    }

    /// Fire one of the canned dashboard prompts as if the user typed it.
    pub fn submit_quick_question(&mut self, question: &str) {
        if self.chat.is_awaiting() {
            return;
        }
        self.chat_input = question.to_string();
        self.chat_cursor = self.chat_input.chars().count();
        self.submit_chat();
    }

    /// Join the chat task once it has finished. Called from the event loop
    /// on every tick; does nothing while the request is still running.
    pub async fn poll_chat(&mut self) {
        if !self.chat_task.as_ref().is_some_and(|task| task.is_finished()) {
            return;
        }
        if let Some(task) = self.chat_task.take() {
            let result = match task.await {
                Ok(result) => result,
                Err(join_err) => Err(ChatError::Unknown(join_err.to_string())),
            };
            self.chat.settle(result);
            self.scroll_chat_to_bottom();
        }
    }

    pub fn tick_animation(&mut self) {
        if self.chat.is_awaiting() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Scroll the transcript so the newest entry (or the thinking indicator)
    /// is visible.
    pub fn scroll_chat_to_bottom(&mut self) {
        let wrap_width = if self.chat_area_width > 0 {
            self.chat_area_width as usize
        } else {
            60
        };

        let mut total_lines: u16 = 0;
        for msg in self.chat.messages() {
            total_lines += 1; // role line
            for line in msg.content.lines() {
                // Character count, not byte length: answers can contain UTF-8
                let chars = line.chars().count();
                total_lines += (chars / wrap_width + 1) as u16;
            }
            total_lines += 1; // blank separator
        }
        if self.chat.is_awaiting() {
            total_lines += 2; // role line + "Thinking..."
        }

        let visible = if self.chat_area_height > 0 { self.chat_area_height } else { 20 };
        self.chat_scroll = total_lines.saturating_sub(visible);
    }

    // Dashboard

    pub fn quick_next(&mut self) {
        self.quick_selected = (self.quick_selected + 1) % market::POPULAR_TICKERS.len();
    }

    pub fn quick_prev(&mut self) {
        self.quick_selected =
            (self.quick_selected + market::POPULAR_TICKERS.len() - 1) % market::POPULAR_TICKERS.len();
    }

    /// Regenerate the fabricated overview data, as a page reload would.
    pub fn refresh_market(&mut self) {
        let mut rng = thread_rng();
        self.snapshot = market::market_snapshot(&mut rng);
        let (gainers, losers) = market::top_movers(&mut rng);
        self.gainers = gainers;
        self.losers = losers;
        self.overview_series =
            PriceSeries::generate(self.selected_quick_ticker(), Period::OneMonth, &mut rng);
    }

    // Stock detail

    pub fn open_detail(&mut self, ticker: &str) {
        let mut rng = thread_rng();
        self.detail_ticker = ticker.to_string();
        self.detail_stats = StockStats::generate(ticker, &mut rng);
        self.detail_series = PriceSeries::generate(ticker, self.detail_period, &mut rng);
        self.detail_signal = market::analysis_signal(&mut rng);
        self.detail_news = market::news_items(&self.detail_stats.name, ticker);
        self.navigate(Screen::StockDetail);
    }

    pub fn set_detail_period(&mut self, period: Period) {
        if self.detail_period == period {
            return;
        }
        self.detail_period = period;
        let mut rng = thread_rng();
        self.detail_series = PriceSeries::generate(&self.detail_ticker, period, &mut rng);
    }

    pub fn cycle_detail_period(&mut self) {
        self.set_detail_period(self.detail_period.next());
    }

    // Watchlist

    pub fn toggle_watchlist(&mut self, ticker: &str) {
        if let Some(pos) = self.watchlist.iter().position(|t| t == ticker) {
            self.watchlist.remove(pos);
        } else {
            self.watchlist.push(ticker.to_string());
        }
        if self.watchlist.is_empty() {
            self.watchlist_state.select(None);
        }
    }

    pub fn is_watched(&self, ticker: &str) -> bool {
        self.watchlist.iter().any(|t| t == ticker)
    }

    pub fn watchlist_nav_down(&mut self) {
        let len = self.watchlist.len();
        if len > 0 {
            let i = self.watchlist_state.selected().unwrap_or(0);
            self.watchlist_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn watchlist_nav_up(&mut self) {
        let i = self.watchlist_state.selected().unwrap_or(0);
        self.watchlist_state.select(Some(i.saturating_sub(1)));
    }

    // Forms

    pub fn reset_login_form(&mut self) {
        self.login_email.clear();
        self.login_password.clear();
        self.login_field = LoginField::Email;
        self.login_error = None;
    }

    pub fn reset_signup_form(&mut self) {
        self.signup_name.clear();
        self.signup_email.clear();
        self.signup_password.clear();
        self.signup_field = SignupField::Name;
        self.signup_error = None;
    }

    pub fn submit_login(&mut self) {
        match self.auth.login(&self.login_email, &self.login_password) {
            Ok(()) => {
                self.reset_login_form();
                self.navigate(Screen::Dashboard);
            }
            Err(message) => self.login_error = Some(message),
        }
    }

    pub fn submit_signup(&mut self) {
        match self.auth.signup(&self.signup_name, &self.signup_email, &self.signup_password) {
            Ok(()) => {
                self.reset_signup_form();
                self.navigate(Screen::Dashboard);
            }
            Err(message) => self.signup_error = Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatRole;

    fn test_app() -> App {
        // Endpoint nothing listens on; tests never await the spawned task.
        let config = Config {
            endpoint: "http://127.0.0.1:9/api/v1/query".to_string(),
            ..Config::default()
        };
        App::new(&config)
    }

    #[tokio::test]
    async fn navigation_away_discards_transcript() {
        let mut app = test_app();
        app.navigate(Screen::Dashboard);
        app.chat_input = "What about NVDA?".to_string();
        app.submit_chat();
        assert!(app.chat.is_awaiting());
        assert!(app.chat_task.is_some());

        app.navigate(Screen::Home);
        assert_eq!(app.chat.messages().len(), 1); // greeting only
        assert_eq!(app.chat.messages()[0].role, ChatRole::Assistant);
        assert!(app.chat_task.is_none());
        assert!(!app.chat.is_awaiting());
    }

    #[tokio::test]
    async fn tab_switch_keeps_transcript() {
        let mut app = test_app();
        app.navigate(Screen::Dashboard);
        app.chat_input = "hello".to_string();
        app.submit_chat();
        let len = app.chat.messages().len();
        app.tab = app.tab.next();
        app.navigate(Screen::Dashboard);
        assert_eq!(app.chat.messages().len(), len);
    }

    #[tokio::test]
    async fn submit_clears_input_only_when_accepted() {
        let mut app = test_app();
        app.chat_input = "   ".to_string();
        app.submit_chat();
        assert_eq!(app.chat_input, "   ");
        assert!(app.chat_task.is_none());

        app.chat_input = "price of AAPL?".to_string();
        app.submit_chat();
        assert!(app.chat_input.is_empty());
        assert!(app.chat_task.is_some());

        // Gate closed: second submit is ignored, input stays put
        app.chat_input = "second".to_string();
        app.submit_chat();
        assert_eq!(app.chat_input, "second");
    }

    #[test]
    fn period_change_regenerates_series() {
        let mut app = test_app();
        app.open_detail("MSFT");
        assert_eq!(app.detail_series.points.len(), Period::OneMonth.days());
        app.set_detail_period(Period::OneYear);
        assert_eq!(app.detail_series.points.len(), Period::OneYear.days());
    }

    #[test]
    fn watchlist_toggles() {
        let mut app = test_app();
        app.toggle_watchlist("AAPL");
        assert!(app.is_watched("AAPL"));
        app.toggle_watchlist("AAPL");
        assert!(!app.is_watched("AAPL"));
    }

    #[test]
    fn failed_login_sets_inline_error() {
        let mut app = test_app();
        app.login_email = "nope@example.com".to_string();
        app.login_password = "wrong".to_string();
        app.submit_login();
        assert!(app.login_error.is_some());
        assert_eq!(app.screen, Screen::Home);
    }
}
