use crate::entity::HasProperties;
use crate::widget::Interactive;

/// Behaviour hooks for a button controller. Hooks come in pairs:
/// `handle_*` for backend reactions, `animate_*` for presentation, and
/// the controller always dispatches them in that order.
pub trait ButtonDelegate {
    type Properties;

    /// A payload was bound and may be read from now on.
    fn properties_set(&mut self, _properties: &Self::Properties) {}

    fn handle_click(&mut self, _properties: Option<&Self::Properties>) {}
    fn animate_click(&mut self) {}

    fn handle_interactable_changed(&mut self, _on: bool) {}
    fn animate_interactable_changed(&mut self, _on: bool) {}
}

/// Controllers that can be clicked, for composites that drive buttons
/// without knowing the widget or delegate types.
pub trait Clickable {
    fn click(&mut self);
    fn interactable(&self) -> bool;
    fn set_interactable(&mut self, on: bool);
}

/// Binds a button widget to a behaviour delegate.
///
/// Interactability can change behind the controller's back, so the
/// host polls the controller once per frame; `poll` dispatches the
/// change hooks when the widget moved since the last look.
pub struct ButtonController<W, D: ButtonDelegate> {
    widget: W,
    delegate: D,
    properties: Option<D::Properties>,
    was_interactable: bool,
}

impl<W: Interactive, D: ButtonDelegate> ButtonController<W, D> {
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

    /// Reports a click from the host widget.
    pub fn notify_clicked(&mut self) {
        self.delegate.handle_click(self.properties.as_ref());
        self.delegate.animate_click();
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
}

impl<W: Interactive, D: ButtonDelegate> HasProperties for ButtonController<W, D> {
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

impl<W: Interactive, D: ButtonDelegate> Clickable for ButtonController<W, D> {
    fn click(&mut self) {
        self.notify_clicked();
    }

    fn interactable(&self) -> bool {
        self.widget.interactable()
    }

    /// Writes through to the widget; the change hooks fire on the next
    /// `poll`.
    fn set_interactable(&mut self, on: bool) {
        self.widget.set_interactable(on);
    }
}
