use super::widgets::{DashboardWidget, RenderContext};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Lays the cards out in columns by their `(row, col)` position and draws
/// them, highlighting the focused one.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    widgets: &[Box<dyn DashboardWidget>],
    focused: usize,
    ctx: &RenderContext,
) {
    for (column, slots) in columns(widgets).into_iter().zip(split_columns(area, widgets)) {
        if column.is_empty() {
            continue;
        }

        let constraints: Vec<Constraint> = column.iter().map(|&i| widgets[i].height()).collect();
        let areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(slots);

        for (&index, area) in column.iter().zip(areas.iter()) {
            widgets[index].render(frame, *area, ctx, index == focused);
        }
    }
}

fn split_columns(area: Rect, widgets: &[Box<dyn DashboardWidget>]) -> Vec<Rect> {
    let count = column_count(widgets).max(1) as u32;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
        .to_vec()
}

fn column_count(widgets: &[Box<dyn DashboardWidget>]) -> usize {
    widgets
        .iter()
        .map(|w| w.position().1 + 1)
        .max()
        .unwrap_or(0)
}

/// Widget indices per column, each column ordered by row.
fn columns(widgets: &[Box<dyn DashboardWidget>]) -> Vec<Vec<usize>> {
    let mut columns = vec![Vec::new(); column_count(widgets)];
    for (index, widget) in widgets.iter().enumerate() {
        columns[widget.position().1].push(index);
    }
    for column in &mut columns {
        column.sort_by_key(|&i| widgets[i].position().0);
    }
    columns
}
