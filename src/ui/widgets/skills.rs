use super::{card_block, DashboardWidget, RenderContext};
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub struct SkillsWidget {
    position: (usize, usize),
    skills: Vec<String>,
}

impl SkillsWidget {
    pub fn new(skills: Vec<String>, position: (usize, usize)) -> Self {
        Self { position, skills }
    }
}

impl DashboardWidget for SkillsWidget {
    fn id(&self) -> String {
        "skills".to_string()
    }

    fn title(&self) -> &str {
        "Tech Stack"
    }

    fn position(&self) -> (usize, usize) {
        self.position
    }

    fn height(&self) -> Constraint {
        Constraint::Length(6)
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, selected: bool) {
        let block = card_block(self.title(), ctx, selected);
        let badge = Style::default().fg(ctx.palette.base).bg(ctx.palette.primary);

        let mut spans = Vec::with_capacity(self.skills.len() * 2);
        for skill in &self.skills {
            spans.push(Span::styled(format!(" {} ", skill), badge));
            spans.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
