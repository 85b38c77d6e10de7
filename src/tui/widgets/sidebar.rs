//! Schedule sidebar widget — posts grouped by publish day, newest day first.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{DayGroup, PostId, is_active_group, is_active_post};

/// Renders the schedule sidebar within the given area.
///
/// Each day group shows its label followed by the titles of its posts.
/// The group containing `active` is highlighted, and the active post
/// itself gets an inverted row.
#[mutants::skip]
pub fn draw_sidebar(groups: &[DayGroup], active: Option<&PostId>, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Schedule ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    if groups.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing scheduled yet",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for group in groups {
        let group_style = if is_active_group(group, active) {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(group.label.clone(), group_style)));

        for post in &group.posts {
            let style = if is_active_post(post, active) {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(
                format!("  {}", post.title),
                style,
            )));
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
