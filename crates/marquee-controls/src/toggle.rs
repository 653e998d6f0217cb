use crate::entity::HasProperties;
use crate::widget::ToggleSwitch;

/// Behaviour hooks for a toggle controller.
pub trait ToggleDelegate {
    type Properties;

    /// A payload was bound and may be read from now on.
    fn properties_set(&mut self, _properties: &Self::Properties) {}

    /// Backend reaction to a value change. Silent sets skip this hook.
    fn handle_toggled(&mut self, _on: bool) {}

    /// Presentation reaction to a value change. Runs for every change,
    /// silent or not, so the widget never drifts out of step.
    fn animate_toggled(&mut self, _on: bool) {}

    fn handle_interactable_changed(&mut self, _on: bool) {}
    fn animate_interactable_changed(&mut self, _on: bool) {}
}

/// Controllers holding a two-state value, for composites like groups
/// and tab menus that coordinate toggles without knowing their types.
pub trait Toggleable {
    fn is_on(&self) -> bool;

    /// Sets the value, dispatching the full hook set on a change.
    fn set_on(&mut self, on: bool);

    /// Sets the value without the backend hook; presentation still
    /// runs. Composites use this to keep state changes from echoing.
    fn set_on_silent(&mut self, on: bool);
}

/// Binds a toggle widget to a behaviour delegate.
pub struct ToggleController<W, D: ToggleDelegate> {
    widget: W,
    delegate: D,
    properties: Option<D::Properties>,
    was_interactable: bool,
}

impl<W: ToggleSwitch, D: ToggleDelegate> ToggleController<W, D> {
    pub fn new(widget: W, delegate: D) -> Self {
        Self {
            widget,
            delegate,
            properties: None,
            was_interactable: true,
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// Reports a user-driven value change from the host widget.
    pub fn notify_toggled(&mut self, on: bool) {
        self.delegate.handle_toggled(on);
        self.delegate.animate_toggled(on);
    }

    /// Re-reads the widget's interactable state and dispatches the
    /// change hooks if it moved since the last poll.
    pub fn poll(&mut self) {
        let on = self.widget.interactable();
        if on != self.was_interactable {
            self.was_interactable = on;
            self.delegate.handle_interactable_changed(on);
            self.delegate.animate_interactable_changed(on);
        }
    }

    pub fn interactable(&self) -> bool {
        self.widget.interactable()
    }

    pub fn set_interactable(&mut self, on: bool) {
        self.widget.set_interactable(on);
    }
}

impl<W: ToggleSwitch, D: ToggleDelegate> HasProperties for ToggleController<W, D> {
    type Properties = D::Properties;

    fn properties(&self) -> Option<&D::Properties> {
        self.properties.as_ref()
    }

    fn set_properties(&mut self, properties: D::Properties) {
        self.properties = Some(properties);
        if let Some(properties) = &self.properties {
            self.delegate.properties_set(properties);
        }
    }
}

impl<W: ToggleSwitch, D: ToggleDelegate> Toggleable for ToggleController<W, D> {
    fn is_on(&self) -> bool {
        self.widget.is_on()
    }

    fn set_on(&mut self, on: bool) {
        if self.widget.is_on() != on {
            self.widget.set_on(on);
            self.notify_toggled(on);
        }
    }

    fn set_on_silent(&mut self, on: bool) {
        if self.widget.is_on() != on {
            self.widget.set_on(on);
            self.delegate.animate_toggled(on);
        }
    }
}
