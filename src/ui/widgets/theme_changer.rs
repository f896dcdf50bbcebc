use super::{card_block, DashboardWidget, RenderContext};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct ThemeChangerWidget {
    position: (usize, usize),
}

impl ThemeChangerWidget {
    pub fn new(position: (usize, usize)) -> Self {
        Self { position }
    }
}

impl DashboardWidget for ThemeChangerWidget {
    fn id(&self) -> String {
        "theme-changer".to_string()
    }

    fn title(&self) -> &str {
        "Theme"
    }

    fn position(&self) -> (usize, usize) {
        self.position
    }

    fn height(&self) -> Constraint {
        Constraint::Length(3)
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, selected: bool) {
        let block = card_block(self.title(), ctx, selected);

        let line = Line::from(vec![
            Span::styled("● ", Style::default().fg(ctx.palette.primary)),
            Span::styled("● ", Style::default().fg(ctx.palette.secondary)),
            Span::styled("● ", Style::default().fg(ctx.palette.accent)),
            Span::styled(
                ctx.store.theme().to_string(),
                Style::default()
                    .fg(ctx.palette.content)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  t/T: change", Style::default().fg(ctx.palette.neutral)),
        ]);

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
