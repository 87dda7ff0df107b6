//! Pane, view-mode, and navigation enums.

use uuid::Uuid;

/// The pane the user is working in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Instances,
    Queries,
}

impl Pane {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Instances => "Instances",
            Self::Queries => "Queries",
        }
    }
}

/// Current view/interaction mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Normal,
    Filter,
    Help,
    Config,
    Confirm(ConfirmAction),
}

/// What a pending confirmation dialog will do on 'y'.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteQuery(Uuid),
    DeleteInstance(String),
    DiscardEdits(NavTarget),
}

/// Where a guarded navigation wants to go. Held by the discard-confirmation
/// dialog until the user confirms or aborts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Instances,
    RefreshQueries,
    Quit,
}
