pub mod avatar_card;
pub mod demo;
pub mod details;
pub mod projects;
pub mod skills;
pub mod theme_changer;
pub mod timeline;

use crate::config::Config;
use crate::feeds::FeedData;
use crate::state::Store;
use crate::theme::Palette;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders},
    Frame,
};

pub use avatar_card::AvatarCardWidget;
pub use demo::DemoWidget;
pub use details::DetailsWidget;
pub use projects::ProjectsWidget;
pub use skills::SkillsWidget;
pub use theme_changer::ThemeChangerWidget;
pub use timeline::TimelineWidget;

/// Everything a card may read while drawing.
pub struct RenderContext<'a> {
    pub palette: &'a Palette,
    pub store: &'a Store,
    pub hide_avatar_ring: bool,
}

pub trait DashboardWidget {
    fn id(&self) -> String;
    fn title(&self) -> &str;
    /// `(row, col)` in the dashboard grid.
    fn position(&self) -> (usize, usize);
    fn height(&self) -> Constraint;
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, selected: bool);

    fn update_data(&mut self, _data: FeedData) {}

    fn scroll_up(&mut self) {}

    fn scroll_down(&mut self) {}

    /// URL behind the highlighted row, if the card has links.
    fn selected_link(&self) -> Option<String> {
        None
    }
}

pub(crate) fn card_block(title: &str, ctx: &RenderContext, selected: bool) -> Block<'static> {
    let border_style = if selected {
        Style::default().fg(ctx.palette.accent)
    } else {
        Style::default().fg(ctx.palette.neutral)
    };

    Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(ctx.palette.primary)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
}

/// Builds the cards the configuration asks for, in focus order.
pub fn build_widgets(config: &Config) -> Vec<Box<dyn DashboardWidget>> {
    let mut widgets: Vec<Box<dyn DashboardWidget>> = Vec::new();

    if !config.theme.disable_switch {
        widgets.push(Box::new(ThemeChangerWidget::new((0, 0))));
    }
    widgets.push(Box::new(AvatarCardWidget::new((1, 0))));
    widgets.push(Box::new(DetailsWidget::new(
        &config.github.username,
        &config.social,
        &config.resume,
        (2, 0),
    )));

    if config.dashboard.show_demo {
        widgets.push(Box::new(DemoWidget::new((0, 1))));
    }
    widgets.push(Box::new(ProjectsWidget::new(
        config.github.sort_by,
        (1, 1),
    )));

    if !config.skills.is_empty() {
        widgets.push(Box::new(SkillsWidget::new(config.skills.clone(), (0, 2))));
    }
    if !config.experiences.is_empty() {
        widgets.push(Box::new(TimelineWidget::experience(&config.experiences, (1, 2))));
    }
    if !config.education.is_empty() {
        widgets.push(Box::new(TimelineWidget::education(&config.education, (2, 2))));
    }
    if !config.certifications.is_empty() {
        widgets.push(Box::new(TimelineWidget::certifications(
            &config.certifications,
            (3, 2),
        )));
    }

    widgets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_switch_hides_theme_changer() {
        let mut config = Config::default();
        config.theme.disable_switch = true;
        let ids: Vec<String> = build_widgets(&config).iter().map(|w| w.id()).collect();
        assert!(!ids.contains(&"theme-changer".to_string()));

        config.theme.disable_switch = false;
        let ids: Vec<String> = build_widgets(&config).iter().map(|w| w.id()).collect();
        assert_eq!(ids[0], "theme-changer");
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let mut config = Config::default();
        config.dashboard.show_demo = false;
        config.skills.clear();
        let ids: Vec<String> = build_widgets(&config).iter().map(|w| w.id()).collect();
        assert_eq!(ids, vec!["theme-changer", "avatar", "details", "projects"]);
    }
}
