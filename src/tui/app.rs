use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Frame, Terminal};

use crate::model::{Post, PostId, PostPayload, ScheduleSettings};
use crate::storage::{PostStore, StorageError};

use super::action::Action;
use super::error::AppError;
use super::screens::{
    PostFormState, PostListState, draw_post_form, draw_post_list,
};

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Grouped overview of all release notes.
    PostList,
    /// Create or edit a single release note.
    PostForm,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    store: PostStore,
    settings: ScheduleSettings,
    posts: Vec<Post>,
    list: PostListState,
    form: Option<PostFormState>,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` on the list screen with posts loaded from storage.
    pub fn new(store: PostStore, settings: ScheduleSettings) -> Result<Self, AppError> {
        let mut app = Self {
            screen: Screen::PostList,
            store,
            settings,
            posts: Vec::new(),
            list: PostListState::new(settings),
            form: None,
            should_quit: false,
        };
        app.reload()?;
        Ok(app)
    }

    /// Main event loop: draw → read event → dispatch → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Renders the current screen.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        match self.screen {
            Screen::PostList => draw_post_list(&self.list, frame, area),
            Screen::PostForm => {
                if let Some(form) = &self.form {
                    draw_post_form(form, frame, area);
                }
            }
        }
    }

    /// Handles a key event by routing it to the active screen and applying
    /// the returned action.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = match self.screen {
            Screen::PostList => self.list.handle_key(key),
            Screen::PostForm => match self.form.as_mut() {
                Some(form) => form.handle_key(key),
                None => Action::None,
            },
        };
        self.apply(action);
    }

    /// Applies a screen action to global state.
    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::OpenForm(post) => {
                self.form = Some(PostFormState::open(post.as_ref(), self.settings));
                self.screen = Screen::PostForm;
            }
            Action::CloseForm => {
                self.form = None;
                self.screen = Screen::PostList;
            }
            Action::SavePost(payload) => self.save_post(payload),
            Action::DeletePost(id) => self.delete_post(&id),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Persists a payload, then returns to the list on success. A storage
    /// failure keeps the form open with the draft intact.
    fn save_post(&mut self, payload: PostPayload) {
        let result = match &payload.id {
            Some(id) => self.store.update(id, &payload).map(|_| ()),
            None => self.store.create(&payload).map(|_| ()),
        }
        .and_then(|()| self.reload());

        match result {
            Ok(()) => {
                self.form = None;
                self.screen = Screen::PostList;
            }
            Err(e) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_error(e.to_string());
                }
            }
        }
    }

    /// Deletes a post and refreshes the list; failures surface in the list
    /// footer.
    fn delete_post(&mut self, id: &PostId) {
        self.list.clear_error();
        let result = self.store.delete(id).and_then(|()| self.reload());
        if let Err(e) = result {
            self.list.set_error(e.to_string());
        }
    }

    /// Reloads posts from storage and regroups the list.
    fn reload(&mut self) -> Result<(), StorageError> {
        self.posts = self.store.list()?;
        self.list.set_posts(&self.posts);
        Ok(())
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the loaded posts.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Returns the list screen state.
    pub fn list(&self) -> &PostListState {
        &self.list
    }

    /// Returns the form screen state while the editor is open.
    pub fn form(&self) -> Option<&PostFormState> {
        self.form.as_ref()
    }
}
