use crate::feeds::{ProfileError, RateLimit};
use crate::theme::Palette;
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use std::path::Path;

pub const RATE_LIMIT_DOCS: &str = "https://developer.github.com/v3/rate_limit/";

/// Full-screen replacement for the dashboard when the profile could not be
/// loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    pub status: u16,
    pub title: String,
    pub subtitle: String,
    pub link: Option<&'static str>,
}

impl ErrorPage {
    pub fn new(
        error: &ProfileError,
        rate_limit: Option<&RateLimit>,
        config_path: &Path,
        now: DateTime<Utc>,
    ) -> Self {
        let status = error.status_code();
        match error {
            ProfileError::NotFound(_) => Self {
                status,
                title: "The Github Username is Incorrect".to_string(),
                subtitle: format!(
                    "Please provide correct github username in {}",
                    config_path.display()
                ),
                link: None,
            },
            ProfileError::RateLimited => {
                let reset = rate_limit
                    .map(|limit| format!(" {}", limit.reset_relative_to(now)))
                    .unwrap_or_default();
                Self {
                    status,
                    title: "Too Many Requests.".to_string(),
                    subtitle: format!("Oh no, you hit the rate limit! Try again later{}.", reset),
                    link: Some(RATE_LIMIT_DOCS),
                }
            }
            ProfileError::Unknown(_) => Self {
                status,
                title: status.to_string(),
                subtitle: "Something went wrong".to_string(),
                link: None,
            },
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.neutral));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let height = 9u16.min(inner.height);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(height),
                Constraint::Fill(1),
            ])
            .split(inner);

        let mut lines = vec![
            Line::from(Span::styled(
                self.status.to_string(),
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.title.as_str(),
                Style::default()
                    .fg(palette.content)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.subtitle.as_str(),
                Style::default().fg(palette.content),
            )),
        ];

        if let Some(link) = self.link {
            lines.push(Line::from(Span::styled(
                link,
                Style::default()
                    .fg(palette.secondary)
                    .add_modifier(Modifier::UNDERLINED),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "q: quit",
            Style::default().fg(palette.neutral),
        )));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, chunks[1]);
    }
}
