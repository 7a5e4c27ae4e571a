//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::state::{AppState, FormField, InteractionMode, View};

/// TUI application
#[derive(Debug)]
pub struct App {
    /// Application state
    state: AppState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        debug!("App::new: called");
        Self { state: AppState::new() }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        // Clear any transient error message on key press
        self.state.clear_error();

        match self.state.interaction_mode {
            InteractionMode::Normal => {
                debug!("App::handle_key: Normal mode");
                self.handle_normal_key(key)
            }
            InteractionMode::Editing => {
                debug!("App::handle_key: Editing mode");
                self.handle_editing_key(key)
            }
            InteractionMode::Help => {
                debug!("App::handle_key: Help mode");
                self.handle_help_key(key)
            }
        }
    }

    /// Handle key in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_normal_key: called");
        match (key.code, key.modifiers) {
            // === Quit ===
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                debug!("App::handle_normal_key: Ctrl+C force quit");
                return true;
            }
            (KeyCode::Char('q'), _) => {
                debug!("App::handle_normal_key: quit requested");
                self.state.should_quit = true;
            }

            // === Help ===
            (KeyCode::Char('?'), _) | (KeyCode::F(1), _) => {
                debug!("App::handle_normal_key: showing help");
                self.state.interaction_mode = InteractionMode::Help;
            }

            // === Generate (both views) ===
            (KeyCode::Char('g'), _) => {
                debug!("App::handle_normal_key: g - generate");
                self.submit_generate();
            }

            // === Form view ===
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) | (KeyCode::Tab, _)
                if matches!(self.state.current_view, View::Form) =>
            {
                debug!("App::handle_normal_key: next form field");
                self.state.form.focus_next();
            }
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) | (KeyCode::BackTab, _)
                if matches!(self.state.current_view, View::Form) =>
            {
                debug!("App::handle_normal_key: prev form field");
                self.state.form.focus_prev();
            }
            (KeyCode::Enter, _) if matches!(self.state.current_view, View::Form) => {
                debug!("App::handle_normal_key: Enter on form field");
                if self.state.form.focused_field() == FormField::TimeOfDay {
                    // The selector cycles instead of taking text input
                    self.state.form.time_of_day = self.state.form.time_of_day.next();
                } else {
                    self.state.interaction_mode = InteractionMode::Editing;
                }
            }
            (KeyCode::Right, _)
                if matches!(self.state.current_view, View::Form)
                    && self.state.form.focused_field() == FormField::TimeOfDay =>
            {
                debug!("App::handle_normal_key: cycle time of day forward");
                self.state.form.time_of_day = self.state.form.time_of_day.next();
            }
            (KeyCode::Left, _)
                if matches!(self.state.current_view, View::Form)
                    && self.state.form.focused_field() == FormField::TimeOfDay =>
            {
                debug!("App::handle_normal_key: cycle time of day backward");
                self.state.form.time_of_day = self.state.form.time_of_day.prev();
            }
            (KeyCode::Char('v'), _) if matches!(self.state.current_view, View::Form) => {
                debug!("App::handle_normal_key: v - view itinerary");
                if self.state.cards.is_empty() {
                    self.state.set_error("No itinerary yet - press g to generate one");
                } else {
                    self.state.current_view = View::Itinerary;
                }
            }

            // === Itinerary view ===
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) if matches!(self.state.current_view, View::Itinerary) => {
                debug!("App::handle_normal_key: next card");
                let max = self.state.cards.len();
                self.state.card_selection.select_next(max);
            }
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) if matches!(self.state.current_view, View::Itinerary) => {
                debug!("App::handle_normal_key: prev card");
                self.state.card_selection.select_prev();
            }
            (KeyCode::Char('w'), _) if matches!(self.state.current_view, View::Itinerary) => {
                debug!("App::handle_normal_key: toggle weather panel");
                if let Some(card) = self.state.selected_card_mut() {
                    card.toggle_weather();
                }
            }
            (KeyCode::Char('t'), _) if matches!(self.state.current_view, View::Itinerary) => {
                debug!("App::handle_normal_key: toggle transport panel");
                if let Some(card) = self.state.selected_card_mut() {
                    card.toggle_transport();
                }
            }
            (KeyCode::Char('i'), _) if matches!(self.state.current_view, View::Itinerary) => {
                debug!("App::handle_normal_key: toggle tips panel");
                if let Some(card) = self.state.selected_card_mut() {
                    card.toggle_tips();
                }
            }
            (KeyCode::Char('e'), _) | (KeyCode::Esc, _) if matches!(self.state.current_view, View::Itinerary) => {
                debug!("App::handle_normal_key: back to form");
                self.state.current_view = View::Form;
            }

            _ => {
                debug!("App::handle_normal_key: unhandled key");
            }
        }

        false
    }

    /// Queue a generation request from the current form values
    ///
    /// Allowed while a request is already in flight - the newer request
    /// supersedes the older one via the generation counter.
    fn submit_generate(&mut self) {
        debug!("App::submit_generate: called");
        self.state.pending_request = Some(self.state.form.to_request());
        self.state.generating = true;
    }

    /// Handle key while editing a form field
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_editing_key: called");
        let field = self.state.form.focused_field();
        match key.code {
            KeyCode::Esc => {
                debug!("App::handle_editing_key: Esc - stop editing");
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Enter => {
                debug!("App::handle_editing_key: Enter - confirm and advance");
                self.state.interaction_mode = InteractionMode::Normal;
                self.state.form.focus_next();
            }
            KeyCode::Tab => {
                debug!("App::handle_editing_key: Tab - next field");
                self.state.interaction_mode = InteractionMode::Normal;
                self.state.form.focus_next();
            }
            KeyCode::Backspace => {
                debug!("App::handle_editing_key: Backspace");
                if let Some(buf) = self.state.form.buffer_mut(field) {
                    buf.pop();
                }
            }
            KeyCode::Char(c) => {
                debug!(%c, "App::handle_editing_key: Char");
                if let Some(buf) = self.state.form.buffer_mut(field) {
                    buf.push(c);
                }
            }
            _ => {
                debug!("App::handle_editing_key: unhandled key");
            }
        }

        false
    }

    /// Handle key in help mode
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_help_key: called");
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                debug!("App::handle_help_key: closing help");
                self.state.interaction_mode = InteractionMode::Normal;
            }
            _ => {
                debug!("App::handle_help_key: unhandled key");
            }
        }

        false
    }
}
