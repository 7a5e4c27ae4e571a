//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here.

use tracing::debug;

use crate::itinerary::{Activity, DateRequest, TimeOfDay};
use crate::planner::PlanOutcome;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Input form for the five planning fields (default view)
    #[default]
    Form,
    /// Generated itinerary as a list of activity cards
    Itinerary,
}

impl View {
    /// Display name for the header
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Form => "Plan Your Date",
            Self::Itinerary => "Itinerary",
        }
    }
}

/// Interaction mode (modal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Editing the focused form field
    Editing,
    /// Help overlay
    Help,
}

/// The five form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Location,
    Date,
    TimeOfDay,
    Interests,
    Personality,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        Self::Location,
        Self::Date,
        Self::TimeOfDay,
        Self::Interests,
        Self::Personality,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::Date => "Date",
            Self::TimeOfDay => "Time of Day",
            Self::Interests => "Partner's Interests",
            Self::Personality => "Partner's Personality",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Location => "Enter city or area",
            Self::Date => "YYYY-MM-DD",
            Self::TimeOfDay => "Select time of day",
            Self::Interests => "What does your partner enjoy?",
            Self::Personality => "How would you describe your partner?",
        }
    }
}

/// Form input state for the five planning fields
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub location: String,
    pub date: String,
    pub time_of_day: TimeOfDay,
    pub interests: String,
    pub personality: String,
    /// Index into [`FormField::ALL`]
    pub focused: usize,
}

impl FormState {
    /// The currently focused field
    pub fn focused_field(&self) -> FormField {
        FormField::ALL[self.focused.min(FormField::ALL.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        debug!(focused = self.focused, "FormState::focus_next: called");
        self.focused = (self.focused + 1) % FormField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        debug!(focused = self.focused, "FormState::focus_prev: called");
        self.focused = (self.focused + FormField::ALL.len() - 1) % FormField::ALL.len();
    }

    /// Current value of a text field; TimeOfDay renders its label
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Location => &self.location,
            FormField::Date => &self.date,
            FormField::TimeOfDay => self.time_of_day.label(),
            FormField::Interests => &self.interests,
            FormField::Personality => &self.personality,
        }
    }

    /// Mutable buffer for a text field; None for the TimeOfDay selector
    pub fn buffer_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Location => Some(&mut self.location),
            FormField::Date => Some(&mut self.date),
            FormField::Interests => Some(&mut self.interests),
            FormField::Personality => Some(&mut self.personality),
            FormField::TimeOfDay => None,
        }
    }

    /// Snapshot the form into a planning request
    pub fn to_request(&self) -> DateRequest {
        DateRequest {
            location: self.location.clone(),
            date: self.date.clone(),
            time_of_day: self.time_of_day,
            interests: self.interests.clone(),
            personality: self.personality.clone(),
        }
    }
}

/// List selection with scroll offset
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub selected_index: usize,
    pub scroll_offset: usize,
}

impl SelectionState {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self, max: usize) {
        self.selected_index = max.saturating_sub(1);
    }

    /// Keep selection in bounds after the list changes
    pub fn clamp(&mut self, max: usize) {
        if max == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= max {
            self.selected_index = max - 1;
        }
    }
}

/// One rendered activity with its three expansion panels
///
/// The panels toggle independently; toggling twice restores the original
/// state.
#[derive(Debug, Clone)]
pub struct ActivityCard {
    pub activity: Activity,
    pub weather_expanded: bool,
    pub transport_expanded: bool,
    pub tips_expanded: bool,
}

impl ActivityCard {
    pub fn new(activity: Activity) -> Self {
        Self {
            activity,
            weather_expanded: false,
            transport_expanded: false,
            tips_expanded: false,
        }
    }

    pub fn toggle_weather(&mut self) {
        debug!(expanded = self.weather_expanded, "ActivityCard::toggle_weather: called");
        self.weather_expanded = !self.weather_expanded;
    }

    pub fn toggle_transport(&mut self) {
        debug!(expanded = self.transport_expanded, "ActivityCard::toggle_transport: called");
        self.transport_expanded = !self.transport_expanded;
    }

    pub fn toggle_tips(&mut self) {
        debug!(expanded = self.tips_expanded, "ActivityCard::toggle_tips: called");
        self.tips_expanded = !self.tips_expanded;
    }
}

/// Complete TUI application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current view
    pub current_view: View,

    /// Interaction mode
    pub interaction_mode: InteractionMode,

    /// Form inputs
    pub form: FormState,

    /// Title of the displayed itinerary
    pub itinerary_title: String,

    /// Activity cards for the displayed itinerary
    pub cards: Vec<ActivityCard>,

    /// Card selection in the itinerary view
    pub card_selection: SelectionState,

    /// Status banner when the displayed itinerary is the fallback
    pub outcome_note: Option<String>,

    /// True while a generation request is in flight
    pub generating: bool,

    /// Monotonic counter identifying the latest generation request
    pub generation: u64,

    /// Request queued by key handling, picked up by the runner
    pub pending_request: Option<DateRequest>,

    /// Transient error message
    pub error_message: Option<String>,

    /// Whether the application should exit
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        debug!("AppState::new: called");
        Self {
            current_view: View::Form,
            interaction_mode: InteractionMode::Normal,
            form: FormState::default(),
            itinerary_title: String::new(),
            cards: Vec::new(),
            card_selection: SelectionState::default(),
            outcome_note: None,
            generating: false,
            generation: 0,
            pending_request: None,
            error_message: None,
            should_quit: false,
        }
    }

    /// Issue a new generation number for a request about to be spawned
    ///
    /// Any result stamped with an older number is stale and will be
    /// dropped by [`apply_outcome`](Self::apply_outcome).
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        debug!(generation = self.generation, "AppState::next_generation: issued");
        self.generation
    }

    /// Apply a finished generation result
    ///
    /// Results from superseded requests are ignored so a slow response can
    /// never overwrite a newer one.
    pub fn apply_outcome(&mut self, generation: u64, outcome: PlanOutcome) {
        debug!(generation, latest = self.generation, "AppState::apply_outcome: called");
        if generation != self.generation {
            debug!(generation, "AppState::apply_outcome: stale result, ignoring");
            return;
        }

        self.generating = false;
        self.outcome_note = outcome.reason().map(|r| format!("Showing demo plan ({})", r));

        let itinerary = outcome.itinerary();
        self.itinerary_title = itinerary.title.clone();
        self.cards = itinerary.activities.iter().cloned().map(ActivityCard::new).collect();
        self.card_selection.select_first();
        self.current_view = View::Itinerary;
    }

    /// Card currently selected in the itinerary view
    pub fn selected_card_mut(&mut self) -> Option<&mut ActivityCard> {
        self.cards.get_mut(self.card_selection.selected_index)
    }

    /// Set a transient error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(%msg, "AppState::set_error: called");
        self.error_message = Some(msg);
    }

    /// Clear any transient error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}
