use super::{card_block, DashboardWidget, RenderContext};
use crate::config::SortBy;
use crate::feeds::{FeedData, Project, PROJECTS_FEED};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

pub struct ProjectsWidget {
    title: String,
    position: (usize, usize),
    projects: Vec<Project>,
    loading: bool,
    error: Option<String>,
    scroll_state: ListState,
}

impl ProjectsWidget {
    pub fn new(sort_by: SortBy, position: (usize, usize)) -> Self {
        let mut scroll_state = ListState::default();
        scroll_state.select(Some(0));

        let title = match sort_by {
            SortBy::Stars => "Projects (by stars)",
            SortBy::Updated => "Projects (recently updated)",
        };

        Self {
            title: title.to_string(),
            position,
            projects: Vec::new(),
            loading: true,
            error: None,
            scroll_state,
        }
    }
}

impl DashboardWidget for ProjectsWidget {
    fn id(&self) -> String {
        PROJECTS_FEED.to_string()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn position(&self) -> (usize, usize) {
        self.position
    }

    fn height(&self) -> Constraint {
        Constraint::Min(8)
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, selected: bool) {
        let block = card_block(&self.title, ctx, selected);
        let muted = Style::default().fg(ctx.palette.neutral);

        if self.loading && self.projects.is_empty() {
            let loading_text = List::new(vec![ListItem::new("Loading...")])
                .style(muted)
                .block(block);
            frame.render_widget(loading_text, area);
            return;
        }

        if let Some(ref error) = self.error {
            let error_text =
                List::new(vec![ListItem::new(format!("Error: {}", error))]).block(block);
            frame.render_widget(error_text, area);
            return;
        }

        if self.projects.is_empty() {
            let empty_text = List::new(vec![ListItem::new("No public repositories")])
                .style(muted)
                .block(block);
            frame.render_widget(empty_text, area);
            return;
        }

        let items: Vec<ListItem> = self
            .projects
            .iter()
            .map(|project| {
                let title_line = Line::from(vec![
                    Span::styled(
                        project.name.as_str(),
                        Style::default()
                            .fg(ctx.palette.primary)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  ★ {}  ⑂ {}", project.stars, project.forks),
                        Style::default().fg(ctx.palette.accent),
                    ),
                ]);

                let mut meta = Vec::new();
                if let Some(ref language) = project.language {
                    meta.push(Span::styled(
                        format!("  {} | ", language),
                        Style::default().fg(ctx.palette.secondary),
                    ));
                } else {
                    meta.push(Span::raw("  "));
                }
                meta.push(Span::styled(
                    project.description.as_deref().unwrap_or("No description"),
                    Style::default().fg(ctx.palette.content),
                ));

                ListItem::new(vec![title_line, Line::from(meta)])
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(ctx.palette.neutral)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = self.scroll_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn update_data(&mut self, data: FeedData) {
        self.loading = false;
        match data {
            FeedData::Projects(projects) => {
                self.projects = projects;
                self.error = None;
                self.scroll_state.select(Some(0));
            }
            FeedData::Error(e) => {
                self.error = Some(e);
            }
            _ => {}
        }
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
            if selected < self.projects.len().saturating_sub(1) {
                self.scroll_state.select(Some(selected + 1));
            }
        }
    }

    fn selected_link(&self) -> Option<String> {
        self.scroll_state
            .selected()
            .and_then(|i| self.projects.get(i))
            .map(|project| project.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str) -> Project {
        Project {
            name: name.to_string(),
            description: None,
            language: Some("Rust".to_string()),
            stars: 1,
            forks: 0,
            url: format!("https://github.com/ada/{}", name),
        }
    }

    #[test]
    fn test_update_and_select() {
        let mut widget = ProjectsWidget::new(SortBy::Stars, (1, 1));
        assert!(widget.loading);
        assert_eq!(widget.selected_link(), None);

        widget.update_data(FeedData::Projects(vec![project("a"), project("b")]));
        assert!(!widget.loading);
        widget.scroll_down();
        widget.scroll_down();
        assert_eq!(
            widget.selected_link().as_deref(),
            Some("https://github.com/ada/b")
        );
    }

    #[test]
    fn test_error_stops_loading() {
        let mut widget = ProjectsWidget::new(SortBy::Updated, (1, 1));
        widget.update_data(FeedData::Error("GitHub search error: 422".to_string()));
        assert!(!widget.loading);
        assert_eq!(widget.error.as_deref(), Some("GitHub search error: 422"));
        assert_eq!(widget.title(), "Projects (recently updated)");
    }
}
