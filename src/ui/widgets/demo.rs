use super::{card_block, DashboardWidget, RenderContext};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

enum DemoCard {
    Person { name: &'static str, role: &'static str },
    Follow { name: &'static str, role: &'static str },
    Stat { value: &'static str, label: &'static str },
    Toggle { label: &'static str, hint: &'static str, on: bool },
    Progress { label: &'static str, percent: u16 },
    Checkbox { label: &'static str, checked: bool },
}

static CARDS: [DemoCard; 6] = [
    DemoCard::Person {
        name: "Janis Johnson",
        role: "Accounts Agent",
    },
    DemoCard::Follow {
        name: "Meredith Mayer",
        role: "Data Liaison",
    },
    DemoCard::Stat {
        value: "4,600",
        label: "Page views",
    },
    DemoCard::Toggle {
        label: "Enable Notifications",
        hint: "To get latest updates",
        on: true,
    },
    DemoCard::Progress {
        label: "Downloading...",
        percent: 70,
    },
    DemoCard::Checkbox {
        label: "Enable Autosave",
        checked: true,
    },
];

/// Placeholder cards that fill out the dashboard grid.
pub struct DemoWidget {
    position: (usize, usize),
}

impl DemoWidget {
    pub fn new(position: (usize, usize)) -> Self {
        Self { position }
    }

    fn render_card(card: &DemoCard, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ctx.palette.neutral));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let heading = Style::default()
            .fg(ctx.palette.content)
            .add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(ctx.palette.neutral);

        let lines = match card {
            DemoCard::Person { name, role } => vec![
                Line::from(Span::styled(*name, heading)),
                Line::from(Span::styled(*role, muted)),
            ],
            DemoCard::Follow { name, role } => vec![
                Line::from(vec![
                    Span::styled(*name, heading),
                    Span::raw("  "),
                    Span::styled(
                        "[Follow]",
                        Style::default().fg(ctx.palette.base).bg(ctx.palette.primary),
                    ),
                ]),
                Line::from(Span::styled(*role, muted)),
            ],
            DemoCard::Stat { value, label } => vec![
                Line::from(Span::styled(
                    *value,
                    Style::default()
                        .fg(ctx.palette.primary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(*label, muted)),
            ],
            DemoCard::Toggle { label, hint, on } => vec![
                Line::from(vec![
                    Span::styled(
                        if *on { "(●○) " } else { "(○●) " },
                        Style::default().fg(ctx.palette.primary),
                    ),
                    Span::styled(*label, heading),
                ]),
                Line::from(Span::styled(*hint, muted)),
            ],
            DemoCard::Progress { label, percent } => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Length(1)])
                    .split(inner);
                frame.render_widget(Paragraph::new(Span::styled(*label, heading)), chunks[0]);
                let gauge = Gauge::default()
                    .gauge_style(
                        Style::default()
                            .fg(ctx.palette.secondary)
                            .bg(ctx.palette.neutral),
                    )
                    .percent(*percent);
                frame.render_widget(gauge, chunks[1]);
                return;
            }
            DemoCard::Checkbox { label, checked } => vec![Line::from(vec![
                Span::styled(
                    if *checked { "[x] " } else { "[ ] " },
                    Style::default().fg(ctx.palette.accent),
                ),
                Span::styled(*label, heading),
            ])],
        };

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl DashboardWidget for DemoWidget {
    fn id(&self) -> String {
        "demo".to_string()
    }

    fn title(&self) -> &str {
        "Overview"
    }

    fn position(&self) -> (usize, usize) {
        self.position
    }

    fn height(&self) -> Constraint {
        Constraint::Length(10)
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, selected: bool) {
        let block = card_block(self.title(), ctx, selected);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(4)])
            .split(inner);

        for (row, cards) in rows.iter().zip(CARDS.chunks(3)) {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 3); 3])
                .split(*row);
            for (area, card) in columns.iter().zip(cards) {
                Self::render_card(card, frame, *area, ctx);
            }
        }
    }
}
