use serde::{Deserialize, Serialize};

use crate::toggle::Toggleable;

/// Whether a group may have all of its toggles off at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupPolicy {
    /// One toggle is always on; turning the active one off re-arms it.
    #[default]
    ExactlyOne,
    /// The active toggle may be turned off, leaving none on.
    AtMostOne,
}

/// Exclusive toggle set.
///
/// The group owns its member controllers and coordinates them through
/// their [`Toggleable`] capability: activating one member turns the
/// previous one off with its full hook set, while policy corrections
/// stay silent so they never echo back into the members' backends.
pub struct ToggleGroupController<T> {
    toggles: Vec<T>,
    policy: GroupPolicy,
    active: Option<usize>,
}

impl<T: Toggleable> ToggleGroupController<T> {
    pub fn new(policy: GroupPolicy) -> Self {
        Self {
            toggles: Vec::new(),
            policy,
            active: None,
        }
    }

    pub fn policy(&self) -> GroupPolicy {
        self.policy
    }

    pub fn toggles(&self) -> &[T] {
        &self.toggles
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.toggles.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.toggles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
    }

    /// Index of the active toggle, if any.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Appends a member and returns its index.
    pub fn push(&mut self, toggle: T) -> usize {
        self.toggles.push(toggle);
        self.toggles.len() - 1
    }

    /// Replaces the members from a properties list and a factory. No
    /// member starts active; callers select the initial one themselves.
    pub fn populate<P>(
        &mut self,
        properties: impl IntoIterator<Item = P>,
        mut make: impl FnMut(P) -> T,
    ) {
        self.toggles.clear();
        self.active = None;
        for item in properties {
            self.toggles.push(make(item));
        }
    }

    /// Activates `index`, turning the previously active member off.
    /// Both members dispatch their full hook sets. Out-of-range and
    /// already-active indices are ignored.
    pub fn set_active(&mut self, index: usize) {
        if index >= self.toggles.len() || self.active == Some(index) {
            return;
        }
        if let Some(previous) = self.active {
            self.toggles[previous].set_on(false);
        }
        self.toggles[index].set_on(true);
        self.active = Some(index);
    }

    /// Reports a user-driven change on member `index` and enforces the
    /// exclusivity policy.
    ///
    /// Turning a member on deactivates the previous one silently.
    /// Turning the active member off is either accepted or silently
    /// reverted, depending on the policy.
    pub fn notify_toggled(&mut self, index: usize, on: bool) {
        if index >= self.toggles.len() {
            return;
        }
        if on {
            if let Some(previous) = self.active {
                if previous != index {
                    self.toggles[previous].set_on_silent(false);
                }
            }
            self.active = Some(index);
        } else if self.active == Some(index) {
            match self.policy {
                GroupPolicy::ExactlyOne => self.toggles[index].set_on_silent(true),
                GroupPolicy::AtMostOne => self.active = None,
            }
        }
    }
}
