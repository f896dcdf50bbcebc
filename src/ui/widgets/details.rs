use super::{card_block, DashboardWidget, RenderContext};
use crate::config::{ResumeConfig, SocialConfig};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct LinkRow {
    label: String,
    value: String,
    url: String,
}

/// GitHub, social and resume links.
pub struct DetailsWidget {
    position: (usize, usize),
    links: Vec<LinkRow>,
    scroll_state: ListState,
}

impl DetailsWidget {
    pub fn new(
        username: &str,
        social: &SocialConfig,
        resume: &ResumeConfig,
        position: (usize, usize),
    ) -> Self {
        let mut links = vec![LinkRow {
            label: "GitHub".to_string(),
            value: username.to_string(),
            url: format!("https://github.com/{}", username),
        }];

        links.extend(social.links().into_iter().map(|link| LinkRow {
            label: link.label.to_string(),
            value: link.value,
            url: link.url,
        }));

        let resume_url = resume.file_url.trim();
        if !resume_url.is_empty() {
            links.push(LinkRow {
                label: "Resume".to_string(),
                value: "Download Resume".to_string(),
                url: resume_url.to_string(),
            });
        }

        let mut scroll_state = ListState::default();
        scroll_state.select(Some(0));

        Self {
            position,
            links,
            scroll_state,
        }
    }
}

impl DashboardWidget for DetailsWidget {
    fn id(&self) -> String {
        "details".to_string()
    }

    fn title(&self) -> &str {
        "Details"
    }

    fn position(&self) -> (usize, usize) {
        self.position
    }

    fn height(&self) -> Constraint {
        Constraint::Length(self.links.len().min(10) as u16 + 2)
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, selected: bool) {
        let block = card_block(self.title(), ctx, selected);

        let items: Vec<ListItem> = self
            .links
            .iter()
            .map(|link| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<15}", link.label),
                        Style::default().fg(ctx.palette.secondary),
                    ),
                    Span::styled(link.value.as_str(), Style::default().fg(ctx.palette.content)),
                ]))
            })
            .collect();

        let mut list = List::new(items).block(block);
        if selected {
            list = list.highlight_style(
                Style::default()
                    .bg(ctx.palette.neutral)
                    .add_modifier(Modifier::BOLD),
            );
        }

        let mut state = self.scroll_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn scroll_up(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected > 0 {
                self.scroll_state.select(Some(selected - 1));
            }
        }
    }

    fn scroll_down(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected < self.links.len().saturating_sub(1) {
                self.scroll_state.select(Some(selected + 1));
            }
        }
    }

    fn selected_link(&self) -> Option<String> {
        self.scroll_state
            .selected()
            .and_then(|i| self.links.get(i))
            .map(|link| link.url.clone())
    }
}
