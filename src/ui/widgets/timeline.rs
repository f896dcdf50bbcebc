use super::{card_block, DashboardWidget, RenderContext};
use crate::config::{Certification, Education, Experience};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    heading: String,
    detail: String,
    period: String,
    link: Option<String>,
}

/// Experience, education and certifications share one card shape: a
/// heading, a detail line and a period.
pub struct TimelineWidget {
    id: &'static str,
    title: &'static str,
    position: (usize, usize),
    entries: Vec<Entry>,
    scroll_state: ListState,
}

fn period(from: &str, to: &str) -> String {
    match (from.trim().is_empty(), to.trim().is_empty()) {
        (false, false) => format!("{} - {}", from.trim(), to.trim()),
        (false, true) => from.trim().to_string(),
        (true, false) => to.trim().to_string(),
        (true, true) => String::new(),
    }
}

impl TimelineWidget {
    fn new(
        id: &'static str,
        title: &'static str,
        entries: Vec<Entry>,
        position: (usize, usize),
    ) -> Self {
        let mut scroll_state = ListState::default();
        scroll_state.select(Some(0));

        Self {
            id,
            title,
            position,
            entries,
            scroll_state,
        }
    }

    pub fn experience(experiences: &[Experience], position: (usize, usize)) -> Self {
        let entries = experiences
            .iter()
            .map(|e| Entry {
                heading: e.position.clone(),
                detail: e.company.clone(),
                period: period(&e.from, &e.to),
                link: None,
            })
            .collect();
        Self::new("experience", "Experience", entries, position)
    }

    pub fn education(education: &[Education], position: (usize, usize)) -> Self {
        let entries = education
            .iter()
            .map(|e| Entry {
                heading: e.degree.clone(),
                detail: e.institution.clone(),
                period: period(&e.from, &e.to),
                link: None,
            })
            .collect();
        Self::new("education", "Education", entries, position)
    }

    pub fn certifications(certifications: &[Certification], position: (usize, usize)) -> Self {
        let entries = certifications
            .iter()
            .map(|c| Entry {
                heading: c.name.clone(),
                detail: c.body.clone(),
                period: c.year.clone(),
                link: Some(c.link.trim().to_string()).filter(|l| !l.is_empty()),
            })
            .collect();
        Self::new("certifications", "Certifications", entries, position)
    }
}

impl DashboardWidget for TimelineWidget {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn title(&self) -> &str {
        self.title
    }

    fn position(&self) -> (usize, usize) {
        self.position
    }

    fn height(&self) -> Constraint {
        Constraint::Min((self.entries.len().min(4) * 3) as u16 + 2)
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, selected: bool) {
        let block = card_block(self.title, ctx, selected);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        entry.period.as_str(),
                        Style::default().fg(ctx.palette.neutral),
                    )),
                    Line::from(Span::styled(
                        entry.heading.as_str(),
                        Style::default()
                            .fg(ctx.palette.primary)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        entry.detail.as_str(),
                        Style::default().fg(ctx.palette.content),
                    )),
                ])
            })
            .collect();

        let mut list = List::new(items).block(block);
        if selected {
            list = list.highlight_style(Style::default().bg(ctx.palette.neutral));
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
            if selected < self.entries.len().saturating_sub(1) {
                self.scroll_state.select(Some(selected + 1));
            }
        }
    }

    fn selected_link(&self) -> Option<String> {
        self.scroll_state
            .selected()
            .and_then(|i| self.entries.get(i))
            .and_then(|entry| entry.link.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period() {
        assert_eq!(period("June 2014", "August 2017"), "June 2014 - August 2017");
        assert_eq!(period("2019", " "), "2019");
        assert_eq!(period("", ""), "");
    }

    #[test]
    fn test_certification_links() {
        let certs = vec![
            Certification {
                name: "CKA".to_string(),
                body: "CNCF".to_string(),
                year: "2023".to_string(),
                link: "https://example.com/cka".to_string(),
            },
            Certification {
                name: "Other".to_string(),
                body: "Body".to_string(),
                year: "2022".to_string(),
                link: String::new(),
            },
        ];
        let mut widget = TimelineWidget::certifications(&certs, (3, 2));
        assert_eq!(
            widget.selected_link().as_deref(),
            Some("https://example.com/cka")
        );
        widget.scroll_down();
        assert_eq!(widget.selected_link(), None);
    }

    #[test]
    fn test_experience_entries() {
        let widget = TimelineWidget::experience(
            &[Experience {
                company: "Deloitte".to_string(),
                position: "Senior Developer".to_string(),
                from: "August 2020".to_string(),
                to: "Present".to_string(),
            }],
            (1, 2),
        );
        assert_eq!(widget.id(), "experience");
        assert_eq!(widget.entries[0].heading, "Senior Developer");
        assert_eq!(widget.entries[0].period, "August 2020 - Present");
    }
}
