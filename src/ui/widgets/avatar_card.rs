use super::{card_block, DashboardWidget, RenderContext};
use crate::feeds::{AvatarImage, FeedData, AVATAR_FEED};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub struct AvatarCardWidget {
    position: (usize, usize),
    avatar: Option<AvatarImage>,
    avatar_error: Option<String>,
}

impl AvatarCardWidget {
    pub fn new(position: (usize, usize)) -> Self {
        Self {
            position,
            avatar: None,
            avatar_error: None,
        }
    }

    /// Two pixel rows per terminal row: the upper pixel is the foreground of
    /// `▀`, the lower one its background.
    fn avatar_lines(avatar: &AvatarImage) -> Vec<Line<'static>> {
        avatar
            .pixels
            .chunks(2)
            .map(|rows| {
                let upper = &rows[0];
                let lower = rows.get(1);
                let spans: Vec<Span> = upper
                    .iter()
                    .enumerate()
                    .map(|(x, &[r, g, b])| {
                        let mut style = Style::default().fg(Color::Rgb(r, g, b));
                        if let Some(&[lr, lg, lb]) = lower.and_then(|row| row.get(x)) {
                            style = style.bg(Color::Rgb(lr, lg, lb));
                        }
                        Span::styled("▀", style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn render_avatar(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let Some(avatar) = &self.avatar else {
            let placeholder = if self.avatar_error.is_some() {
                "[ no avatar ]"
            } else {
                "[ loading avatar ]"
            };
            let paragraph = Paragraph::new(Line::from(Span::styled(
                placeholder,
                Style::default().fg(ctx.palette.neutral),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        };

        let ring: u16 = if ctx.hide_avatar_ring { 0 } else { 2 };
        let width = u16::try_from(avatar.width)
            .unwrap_or(u16::MAX)
            .saturating_add(ring)
            .min(area.width);
        let height = u16::try_from(avatar.height.div_ceil(2))
            .unwrap_or(u16::MAX)
            .saturating_add(ring)
            .min(area.height);
        let target = Rect {
            x: area.x.saturating_add(area.width.saturating_sub(width) / 2),
            y: area.y,
            width,
            height,
        };

        let paragraph = Paragraph::new(Self::avatar_lines(avatar));
        if ctx.hide_avatar_ring {
            frame.render_widget(paragraph, target);
        } else {
            let ring_block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ctx.palette.primary));
            frame.render_widget(paragraph.block(ring_block), target);
        }
    }
}

impl DashboardWidget for AvatarCardWidget {
    fn id(&self) -> String {
        AVATAR_FEED.to_string()
    }

    fn title(&self) -> &str {
        "Profile"
    }

    fn position(&self) -> (usize, usize) {
        self.position
    }

    fn height(&self) -> Constraint {
        Constraint::Min(12)
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, selected: bool) {
        let block = card_block(self.title(), ctx, selected);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if ctx.store.is_loading() {
            let loading = Paragraph::new("Loading...")
                .style(Style::default().fg(ctx.palette.neutral))
                .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
            return;
        }

        let Some(profile) = ctx.store.profile() else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Min(3)])
            .split(inner);

        self.render_avatar(frame, chunks[0], ctx);

        let mut lines = vec![Line::from(Span::styled(
            profile.name.clone(),
            Style::default()
                .fg(ctx.palette.primary)
                .add_modifier(Modifier::BOLD),
        ))];

        let wrap_width = chunks[1].width.saturating_sub(2).max(10) as usize;
        for line in textwrap::wrap(&profile.bio, wrap_width) {
            lines.push(Line::from(Span::styled(
                line.into_owned(),
                Style::default().fg(ctx.palette.content),
            )));
        }

        let text = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(text, chunks[1]);
    }

    fn update_data(&mut self, data: FeedData) {
        match data {
            FeedData::Avatar(image) => {
                self.avatar = Some(image);
                self.avatar_error = None;
            }
            FeedData::Error(e) => {
                self.avatar_error = Some(e);
            }
            _ => {}
        }
    }
}
