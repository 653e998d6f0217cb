use crate::entity::HasProperties;
use crate::widget::{AnimatedView, Visibility};

/// Behaviour hooks for a view controller, one per transition edge.
pub trait ViewDelegate {
    type Properties;

    /// A payload was bound and may be read from now on.
    fn properties_set(&mut self, _properties: &Self::Properties) {}

    fn show_started(&mut self) {}
    fn show_finished(&mut self) {}
    fn hide_started(&mut self) {}
    fn hide_finished(&mut self) {}
}

/// Controllers owning a showable surface, for composites like tab
/// menus that swap pages without knowing their types.
pub trait Showable {
    fn visibility(&self) -> Visibility;
    fn show(&mut self);
    fn hide(&mut self);
}

/// Binds an animated view widget to a behaviour delegate.
///
/// `show` and `hide` start the widget transition and fire the start
/// hooks; the host reports the widget settling through
/// `notify_transition_finished`, which fires the matching finish hook.
pub struct ViewController<W, D: ViewDelegate> {
    widget: W,
    delegate: D,
    properties: Option<D::Properties>,
}

impl<W: AnimatedView, D: ViewDelegate> ViewController<W, D> {
    pub fn new(widget: W, delegate: D) -> Self {
        Self {
            widget,
            delegate,
            properties: None,
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

    /// Fires the finish hook matching the widget's settled state.
    /// Mid-transition calls are ignored.
    pub fn notify_transition_finished(&mut self) {
        match self.widget.visibility() {
            Visibility::Shown => self.delegate.show_finished(),
            Visibility::Hidden => self.delegate.hide_finished(),
            Visibility::Showing | Visibility::Hiding => {}
        }
    }
}

impl<W: AnimatedView, D: ViewDelegate> HasProperties for ViewController<W, D> {
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

impl<W: AnimatedView, D: ViewDelegate> Showable for ViewController<W, D> {
    fn visibility(&self) -> Visibility {
        self.widget.visibility()
    }

    fn show(&mut self) {
        if self.widget.visibility().is_visible() {
            return;
        }
        self.widget.begin_show();
        self.delegate.show_started();
    }

    fn hide(&mut self) {
        if !self.widget.visibility().is_visible() {
            return;
        }
        self.widget.begin_hide();
        self.delegate.hide_started();
    }
}
