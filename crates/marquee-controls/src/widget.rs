//! Widget contracts the controllers drive. The host editor supplies the
//! implementations; tests use in-memory fakes.

use serde::{Deserialize, Serialize};

/// Interaction surface shared by clickable and toggleable widgets.
pub trait Interactive {
    fn interactable(&self) -> bool;
    fn set_interactable(&mut self, on: bool);
}

/// Two-state switch widget.
pub trait ToggleSwitch: Interactive {
    fn is_on(&self) -> bool;
    fn set_on(&mut self, on: bool);
}

/// Phase of an animated view's show/hide transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Hidden,
    Showing,
    Shown,
    Hiding,
}

impl Visibility {
    /// Whether the view is on screen or on its way there.
    pub fn is_visible(self) -> bool {
        matches!(self, Visibility::Showing | Visibility::Shown)
    }
}

/// View widget with animated show and hide transitions. `begin_*` only
/// starts the animation; the host reports completion to the owning
/// controller once the widget settles.
pub trait AnimatedView {
    fn visibility(&self) -> Visibility;
    fn begin_show(&mut self);
    fn begin_hide(&mut self);
}
