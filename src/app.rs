use crate::config::Config;
use crate::feeds::avatar::AvatarFetcher;
use crate::feeds::github::{build_client, ProfileFetcher, ProjectsFetcher};
use crate::feeds::{
    FeedData, FeedFetcher, FeedMessage, FetchFailure, UnknownCause, AVATAR_FEED, PROFILE_FEED,
    PROJECTS_FEED,
};
use crate::state::{complete_profile_fetch, ProfileView, Store};
use crate::theme::{initial_theme, ThemeSet};
use crate::ui::{self, widgets::build_widgets, widgets::DashboardWidget};
use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use reqwest::Client;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Holds the terminal in raw mode on the alternate screen until dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        install_panic_hook();
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)
            .context("Failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

/// Leaves raw mode and the alternate screen and shows the cursor. Every
/// step runs; the first error is returned.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, Show);
    raw.and(screen)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            previous(info);
        }));
    });
}

pub struct App {
    config: Config,
    config_path: PathBuf,
    store: Store,
    profile_view: ProfileView,
    themes: ThemeSet,
    widgets: Vec<Box<dyn DashboardWidget>>,
    focused: usize,
    should_quit: bool,
    client: Client,
    tx: UnboundedSender<FeedMessage>,
    rx: UnboundedReceiver<FeedMessage>,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf, theme_override: Option<String>) -> Result<Self> {
        let client = build_client(config.github.token.as_deref())?;
        let themes = ThemeSet::new(&config.theme);
        let colorfgbg = std::env::var("COLORFGBG").ok();
        let theme = initial_theme(&config.theme, theme_override.as_deref(), colorfgbg.as_deref());
        let widgets = build_widgets(&config);
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            config_path,
            store: Store::new(theme),
            profile_view: ProfileView::default(),
            themes,
            widgets,
            focused: 0,
            should_quit: false,
            client,
            tx,
            rx,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn profile_view(&self) -> &ProfileView {
        &self.profile_view
    }

    pub fn themes(&self) -> &ThemeSet {
        &self.themes
    }

    pub fn widgets(&self) -> &[Box<dyn DashboardWidget>] {
        &self.widgets
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        let _guard = TerminalGuard::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

        self.start_fetches();
        self.event_loop(&mut terminal)
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            while let Ok(message) = self.rx.try_recv() {
                self.handle_message(message);
            }

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit {
                info!("quitting");
                return Ok(());
            }
        }
    }

    /// Kicks off the single profile fetch and the repository search.
    pub fn start_fetches(&mut self) {
        let github = &self.config.github;
        info!(username = %github.username, "starting fetches");

        self.store.set_loading(true);
        self.profile_view.reset();

        let profile = ProfileFetcher::new(
            github.api_base.clone(),
            github.username.clone(),
            self.client.clone(),
        );
        let projects = ProjectsFetcher::new(
            github.api_base.clone(),
            github.username.clone(),
            github.sort_by,
            github.limit,
            github.exclude.clone(),
            self.client.clone(),
        );

        self.spawn_fetcher(PROFILE_FEED, Box::new(profile));
        self.spawn_fetcher(PROJECTS_FEED, Box::new(projects));
    }

    fn spawn_fetcher(&self, widget_id: &str, fetcher: Box<dyn FeedFetcher>) {
        let tx = self.tx.clone();
        let widget_id = widget_id.to_string();

        tokio::spawn(async move {
            let data = match fetcher.fetch().await {
                Ok(data) => data,
                Err(e) => {
                    warn!(feed = %widget_id, error = %format!("{:#}", e), "fetch failed");
                    FeedData::Error(format!("{:#}", e))
                }
            };
            let _ = tx.send(FeedMessage { widget_id, data });
        });
    }

    pub fn handle_message(&mut self, message: FeedMessage) {
        debug!(feed = %message.widget_id, "feed message");

        if message.widget_id == PROFILE_FEED {
            let outcome = match message.data {
                FeedData::Profile(profile) => Ok(profile),
                FeedData::ProfileFailed(failure) => Err(failure),
                FeedData::Error(e) => Err(FetchFailure::unknown(UnknownCause::Transport(e))),
                _ => return,
            };

            if let Ok(ref profile) = outcome {
                let avatar = AvatarFetcher::new(
                    profile.avatar.clone(),
                    self.config.dashboard.avatar_size,
                    self.client.clone(),
                );
                self.spawn_fetcher(AVATAR_FEED, Box::new(avatar));
            }

            complete_profile_fetch(&mut self.store, &mut self.profile_view, outcome);
            return;
        }

        if let Some(widget) = self
            .widgets
            .iter_mut()
            .find(|w| w.id() == message.widget_id)
        {
            widget.update_data(message.data);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                if !self.widgets.is_empty() {
                    self.focused = (self.focused + 1) % self.widgets.len();
                }
            }
            KeyCode::BackTab => {
                if !self.widgets.is_empty() {
                    self.focused = (self.focused + self.widgets.len() - 1) % self.widgets.len();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(widget) = self.widgets.get_mut(self.focused) {
                    widget.scroll_up();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(widget) = self.widgets.get_mut(self.focused) {
                    widget.scroll_down();
                }
            }
            KeyCode::Char('t') if !self.config.theme.disable_switch => {
                let next = self.themes.next(self.store.theme());
                self.store.set_theme(next);
            }
            KeyCode::Char('T') if !self.config.theme.disable_switch => {
                let previous = self.themes.previous(self.store.theme());
                self.store.set_theme(previous);
            }
            KeyCode::Enter => {
                if let Some(url) = self
                    .widgets
                    .get(self.focused)
                    .and_then(|w| w.selected_link())
                {
                    info!(%url, "opening link");
                    if let Err(e) = open::that(&url) {
                        warn!(%url, error = %e, "failed to open link");
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::{Profile, ProfileError, Project};
    use crossterm::event::KeyModifiers;

    fn app(config: Config) -> App {
        App::new(config, PathBuf::from("config.toml"), Some("dark".to_string())).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_restore_without_raw_mode_is_harmless() {
        assert!(restore_terminal().is_ok());
        drop(TerminalGuard);
        assert!(restore_terminal().is_ok());
    }

    #[tokio::test]
    async fn test_profile_message_clears_loading() {
        let mut app = app(Config::default());
        assert!(app.store().is_loading());

        app.handle_message(FeedMessage {
            widget_id: PROFILE_FEED.to_string(),
            data: FeedData::Profile(Profile {
                avatar: "http://127.0.0.1:9/a.png".to_string(),
                name: "Ada".to_string(),
                bio: "dev".to_string(),
            }),
        });

        assert!(!app.store().is_loading());
        assert_eq!(app.store().profile().map(|p| p.name.as_str()), Some("Ada"));
    }

    #[tokio::test]
    async fn test_profile_error_string_becomes_unknown() {
        let mut app = app(Config::default());
        app.handle_message(FeedMessage {
            widget_id: PROFILE_FEED.to_string(),
            data: FeedData::Error("boom".to_string()),
        });

        assert!(!app.store().is_loading());
        assert_eq!(
            app.profile_view().error.as_ref().map(ProfileError::status_code),
            Some(500)
        );
    }

    #[test]
    fn test_projects_routed_to_widget() {
        let mut app = app(Config::default());
        app.handle_message(FeedMessage {
            widget_id: PROJECTS_FEED.to_string(),
            data: FeedData::Projects(vec![Project {
                name: "engine".to_string(),
                description: None,
                language: None,
                stars: 0,
                forks: 0,
                url: "https://github.com/ada/engine".to_string(),
            }]),
        });

        let projects = app
            .widgets()
            .iter()
            .find(|w| w.id() == PROJECTS_FEED)
            .unwrap();
        assert_eq!(
            projects.selected_link().as_deref(),
            Some("https://github.com/ada/engine")
        );
        assert!(app.store().is_loading());
    }

    #[test]
    fn test_theme_keys() {
        let mut config = Config::default();
        config.theme.themes = vec!["light".to_string(), "dark".to_string()];
        let mut app = app(config);

        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.store().theme(), "light");
        app.handle_key(key(KeyCode::Char('T')));
        assert_eq!(app.store().theme(), "dark");
    }

    #[test]
    fn test_disabled_switch_ignores_theme_keys() {
        let mut config = Config::default();
        config.theme.disable_switch = true;
        let mut app = app(config);

        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.store().theme(), "dark");
    }

    #[test]
    fn test_focus_wraps_and_quit() {
        let mut app = app(Config::default());
        let count = app.widgets().len();

        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.focused(), count - 1);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focused(), 0);

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }
}
