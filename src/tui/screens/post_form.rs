//! Post form screen — create or edit a release note with eager validation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_textarea::TextArea;

use crate::model::{
    DraftErrors, Post, PostDraft, PostId, PostPayload, ScheduleSettings, UnsavedGuard,
};
use crate::tui::action::Action;
use crate::tui::widgets::{Form, FormField, draw_confirm_modal, draw_form};

/// Field index for the publish date.
const PUBLISH_DATE: usize = 0;
/// Field index for the publish time.
const PUBLISH_TIME: usize = 1;
/// Field index for the title.
const TITLE: usize = 2;
/// Focus slot for the multi-line description editor (not a form field).
const DESCRIPTION: usize = 3;
/// Total focusable slots.
const SLOTS: usize = 4;

/// State for the post form screen.
///
/// Validation runs eagerly: errors are recomputed at open and after every
/// edit, and saving is blocked while any remain.
pub struct PostFormState {
    post_id: Option<PostId>,
    form: Form,
    description: TextArea<'static>,
    focus: usize,
    errors: DraftErrors,
    guard: UnsavedGuard,
    error: Option<String>,
    settings: ScheduleSettings,
}

impl PostFormState {
    /// Opens the form, prefilled from `post` or blank for a new release note.
    pub fn open(post: Option<&Post>, settings: ScheduleSettings) -> Self {
        let draft = match post {
            Some(post) => PostDraft::from_post(post, &settings),
            None => PostDraft::default(),
        };

        let zone = settings.zone_label();
        let time_label = if zone.is_empty() {
            "Publish time".to_string()
        } else {
            format!("Publish time ({zone})")
        };

        let mut form = Form::new(vec![
            FormField::new("Publish date", true).with_hint("YYYY-MM-DD"),
            FormField::new(time_label, true).with_hint("HH:MM"),
            FormField::new("Title", true),
        ]);
        form.set_value(PUBLISH_DATE, draft.publish_date.clone());
        form.set_value(PUBLISH_TIME, draft.publish_time.clone());
        form.set_value(TITLE, draft.title.clone());

        let mut description = if draft.description.is_empty() {
            TextArea::default()
        } else {
            TextArea::new(draft.description.lines().map(str::to_string).collect())
        };
        description.set_cursor_line_style(Style::default());

        let mut state = Self {
            post_id: draft.id,
            form,
            description,
            focus: PUBLISH_DATE,
            errors: DraftErrors::default(),
            guard: UnsavedGuard::default(),
            error: None,
            settings,
        };
        state.refresh_validation();
        state
    }

    /// Returns the current draft assembled from the widgets.
    pub fn draft(&self) -> PostDraft {
        PostDraft {
            id: self.post_id.clone(),
            title: self.form.value(TITLE).to_string(),
            description: self.description.lines().join("\n"),
            publish_date: self.form.value(PUBLISH_DATE).to_string(),
            publish_time: self.form.value(PUBLISH_TIME).to_string(),
        }
    }

    /// Returns a reference to the form for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Returns the current field errors.
    pub fn errors(&self) -> &DraftErrors {
        &self.errors
    }

    /// Returns the currently focused slot.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Returns `true` while the discard-confirmation prompt is open.
    pub fn is_confirming(&self) -> bool {
        self.guard.is_confirming()
    }

    /// Returns the current storage error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sets a storage error message to display.
    pub fn set_error(&mut self, msg: String) {
        self.error = Some(msg);
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.guard.is_confirming() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    self.guard.confirm_leave();
                    Action::CloseForm
                }
                KeyCode::Esc | KeyCode::Char('n') => {
                    self.guard.keep_editing();
                    Action::None
                }
                _ => Action::None,
            };
        }

        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('s') {
            return self.submit();
        }

        match key.code {
            KeyCode::Esc => {
                self.guard.request_cancel();
                Action::None
            }
            KeyCode::Tab => {
                self.focus_to((self.focus + 1) % SLOTS);
                Action::None
            }
            KeyCode::BackTab => {
                self.focus_to((self.focus + SLOTS - 1) % SLOTS);
                Action::None
            }
            KeyCode::Enter if self.focus != DESCRIPTION => self.submit(),
            _ => {
                self.edit_key(key);
                Action::None
            }
        }
    }

    fn focus_to(&mut self, slot: usize) {
        self.focus = slot;
        // An out-of-range form focus leaves every field unfocused while the
        // description editor holds the cursor.
        self.form.set_focus(slot);
    }

    /// Routes an editing key to the focused widget and revalidates.
    fn edit_key(&mut self, key: KeyEvent) {
        if self.focus == DESCRIPTION {
            self.description.input(key);
            self.refresh_validation();
            return;
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return;
        }
        match key.code {
            KeyCode::Char(ch) => {
                self.form.insert_char(ch);
                self.refresh_validation();
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                self.refresh_validation();
            }
            _ => {}
        }
    }

    /// Recomputes field errors from the current draft and mirrors them onto
    /// the form for rendering.
    fn refresh_validation(&mut self) {
        self.errors = self.draft().validate();
        self.form.clear_errors();
        if let Some(e) = &self.errors.publish_date {
            self.form.set_error(PUBLISH_DATE, e.to_string());
        }
        if let Some(e) = &self.errors.publish_time {
            self.form.set_error(PUBLISH_TIME, e.to_string());
        }
        if let Some(e) = &self.errors.title {
            self.form.set_error(TITLE, e.to_string());
        }
    }

    /// Validates and composes the draft into a save action.
    fn submit(&mut self) -> Action {
        self.error = None;
        self.refresh_validation();
        if !self.errors.is_valid() {
            return Action::None;
        }

        let draft = self.draft();
        match draft.compose(&self.settings) {
            Ok(at) => Action::SavePost(PostPayload {
                id: self.post_id.clone(),
                title: draft.title,
                description: draft.description,
                published_at: Some(at),
            }),
            Err(e) => {
                self.errors.publish_date = Some(e.clone());
                self.form.set_error(PUBLISH_DATE, e.to_string());
                Action::None
            }
        }
    }
}

/// Renders the post form screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_post_form(state: &PostFormState, frame: &mut Frame, area: Rect) {
    let title = if state.post_id.is_some() {
        " Edit Release Note "
    } else {
        " New Release Note "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [form_area, desc_area, footer_area] = Layout::vertical([
        Constraint::Length(9),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_form(state.form(), frame, form_area);

    // Description editor
    let desc_color = if state.errors.description.is_some() {
        Color::Red
    } else if state.focus == DESCRIPTION {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let desc_block = Block::default()
        .title("Description *")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(desc_color));
    let desc_inner = desc_block.inner(desc_area);
    frame.render_widget(desc_block, desc_area);
    frame.render_widget(&state.description, desc_inner);

    if let Some(err) = &state.errors.description {
        let error_line = Paragraph::new(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        ));
        let err_area = Rect {
            x: desc_area.x + 2,
            y: desc_area.y + desc_area.height.saturating_sub(1),
            width: desc_area.width.saturating_sub(4),
            height: 1,
        };
        frame.render_widget(error_line, err_area);
    }

    // Footer: storage error takes precedence over the key hints
    if let Some(err) = state.error() {
        let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
        frame.render_widget(error_line, footer_area);
    } else {
        let footer = Paragraph::new(Line::from(
            "Tab: next field  Ctrl+S: save  Esc: cancel",
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, footer_area);
    }

    if state.is_confirming() {
        draw_confirm_modal(
            "Leave the editor?",
            "Your changes will not be saved.",
            "Enter: leave  Esc: keep editing",
            frame,
            area,
        );
    }
}
