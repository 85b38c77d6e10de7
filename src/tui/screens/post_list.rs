//! Post list screen — grouped overview of all release notes.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{DayGroup, Post, PostId, ScheduleSettings, group_by_day};
use crate::tui::action::Action;
use crate::tui::widgets::draw_sidebar;

/// State for the post list screen.
///
/// Navigation runs over a flat index that spans every post across the
/// day groups, top to bottom.
#[derive(Debug, Clone)]
pub struct PostListState {
    settings: ScheduleSettings,
    groups: Vec<DayGroup>,
    selected: usize,
    error: Option<String>,
}

impl PostListState {
    /// Creates an empty state with the cursor on the first row.
    pub fn new(settings: ScheduleSettings) -> Self {
        Self {
            settings,
            groups: Vec::new(),
            selected: 0,
            error: None,
        }
    }

    /// Regroups the given posts and clamps the cursor to the new bounds.
    pub fn set_posts(&mut self, posts: &[Post]) {
        self.groups = group_by_day(posts, &self.settings);
        let count = self.post_count();
        if count == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(count - 1);
        }
    }

    /// Returns the day groups in display order.
    pub fn groups(&self) -> &[DayGroup] {
        &self.groups
    }

    /// Returns the total number of posts across all groups.
    pub fn post_count(&self) -> usize {
        self.groups.iter().map(|g| g.posts.len()).sum()
    }

    /// Returns the currently selected flat index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Returns the post under the cursor, if any.
    pub fn selected_post(&self) -> Option<&Post> {
        self.groups
            .iter()
            .flat_map(|g| g.posts.iter())
            .nth(self.selected)
    }

    /// Returns the id of the post under the cursor, if any.
    pub fn active_id(&self) -> Option<&PostId> {
        self.selected_post().map(|p| &p.id)
    }

    /// Sets an error message shown in the footer.
    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Clears the footer error message.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Returns the current error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let count = self.post_count();
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
                Action::None
            }
            KeyCode::Home => {
                self.selected = 0;
                Action::None
            }
            KeyCode::End => {
                self.selected = count.saturating_sub(1);
                Action::None
            }
            KeyCode::Enter => match self.selected_post() {
                Some(post) => Action::OpenForm(Some(post.clone())),
                None => Action::None,
            },
            KeyCode::Char('n') => Action::OpenForm(None),
            KeyCode::Char('d') => match self.selected_post() {
                Some(post) => Action::DeletePost(post.id.clone()),
                None => Action::None,
            },
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }
}

/// Renders the post list screen.
#[mutants::skip]
pub fn draw_post_list(state: &PostListState, frame: &mut Frame, area: Rect) {
    let [sidebar_area, main_area] =
        Layout::horizontal([Constraint::Length(32), Constraint::Min(0)]).areas(area);

    draw_sidebar(state.groups(), state.active_id(), frame, sidebar_area);

    let [title_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(main_area);

    let count = state.post_count();
    let title = Paragraph::new(Line::from(format!("Release Notes ({count})")))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(title, title_area);

    if count == 0 {
        let empty = Paragraph::new("No release notes yet").alignment(Alignment::Center);
        frame.render_widget(empty, list_area);
    } else {
        let now = Utc::now();
        let mut lines: Vec<Line> = Vec::new();
        let mut flat = 0usize;
        for group in state.groups() {
            lines.push(Line::from(Span::styled(
                group.label.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for post in &group.posts {
                let style = if flat == state.selected() {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default()
                };
                let when = match post.published_at {
                    Some(at) => {
                        let local = at.with_timezone(&state.settings.zone);
                        if at > now {
                            format!("{}  [scheduled]", local.format("%H:%M"))
                        } else {
                            local.format("%H:%M").to_string()
                        }
                    }
                    None => "--:--".to_string(),
                };
                lines.push(Line::from(Span::styled(
                    format!("  {}  {}", post.title, when),
                    style,
                )));
                flat += 1;
            }
        }
        frame.render_widget(Paragraph::new(lines), list_area);
    }

    if let Some(err) = state.error() {
        let error_line =
            Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
        frame.render_widget(error_line, footer_area);
    } else {
        let footer =
            Paragraph::new("↑↓: navigate  Enter: edit  n: new  d: delete  q: quit")
                .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, footer_area);
    }
}
