pub mod dashboard;
pub mod error_page;
pub mod widgets;

use crate::app::App;
use crate::state::ProfileView;
use chrono::{DateTime, Utc};
use error_page::ErrorPage;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use std::path::Path;
use widgets::RenderContext;

/// The two mutually exclusive things the screen can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Error(ErrorPage),
    Dashboard,
}

pub fn select_view(view: &ProfileView, config_path: &Path, now: DateTime<Utc>) -> View {
    match view.error {
        Some(ref error) => View::Error(ErrorPage::new(
            error,
            view.rate_limit.as_ref(),
            config_path,
            now,
        )),
        None => View::Dashboard,
    }
}

pub fn draw(frame: &mut Frame, app: &App) {
    let palette = app.themes().palette(app.store().theme());

    let background = Block::default().style(Style::default().bg(palette.base).fg(palette.content));
    frame.render_widget(background, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let view = select_view(app.profile_view(), app.config_path(), Utc::now());
    let hints = match view {
        View::Error(page) => {
            page.render(frame, chunks[0], &palette);
            "q: quit"
        }
        View::Dashboard => {
            let ctx = RenderContext {
                palette: &palette,
                store: app.store(),
                hide_avatar_ring: app.config().theme.hide_avatar_ring,
            };
            dashboard::render(frame, chunks[0], app.widgets(), app.focused(), &ctx);
            if app.config().theme.disable_switch {
                "q: quit | Tab: focus | ↑↓: scroll | Enter: open"
            } else {
                "q: quit | Tab: focus | ↑↓: scroll | Enter: open | t/T: theme"
            }
        }
    };

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" gitfolio ", Style::default().fg(palette.base).bg(palette.primary)),
        Span::styled(format!("  {}", hints), Style::default().fg(palette.neutral)),
    ]));
    frame.render_widget(footer, chunks[1]);
}
