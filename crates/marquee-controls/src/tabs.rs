use crate::toggle::Toggleable;
use crate::view::Showable;

/// Tab strip bound to a page stack.
///
/// One tab is on and its page shown; every other page is hidden. The
/// controller coordinates members through their [`Toggleable`] and
/// [`Showable`] capabilities, so any pairing of toggle and view types
/// works. Rebuilding from properties activates the first tab.
pub struct TabMenuController<T, V> {
    tabs: Vec<T>,
    pages: Vec<V>,
    active: Option<usize>,
}

impl<T: Toggleable, V: Showable> TabMenuController<T, V> {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            pages: Vec::new(),
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[T] {
        &self.tabs
    }

    pub fn pages(&self) -> &[V] {
        &self.pages
    }

    pub fn tab_mut(&mut self, index: usize) -> Option<&mut T> {
        self.tabs.get_mut(index)
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut V> {
        self.pages.get_mut(index)
    }

    /// Index of the active tab, if any.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Rebuilds the menu from a properties list and a factory building
    /// one tab/page pair per entry, then activates the first pair.
    pub fn rebuild<P>(
        &mut self,
        properties: impl IntoIterator<Item = P>,
        mut make: impl FnMut(&P) -> (T, V),
    ) {
        self.tabs.clear();
        self.pages.clear();
        self.active = None;
        for item in properties {
            let (tab, page) = make(&item);
            self.tabs.push(tab);
            self.pages.push(page);
        }
        if !self.tabs.is_empty() {
            self.select(0);
        }
    }

    /// Activates tab `index`: the previous tab goes off and its page
    /// hides, the new tab goes on and its page shows, all with full
    /// hook sets. Out-of-range and already-active indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index >= self.tabs.len() || self.active == Some(index) {
            return;
        }
        if let Some(previous) = self.active {
            self.tabs[previous].set_on(false);
            self.pages[previous].hide();
        }
        self.tabs[index].set_on(true);
        self.pages[index].show();
        self.active = Some(index);
    }

    /// Reports a user-driven change on tab `index`.
    ///
    /// Activations deactivate the previous tab silently and swap the
    /// pages. Turning the active tab off is always reverted silently;
    /// a tab strip keeps one tab on.
    pub fn notify_tab_toggled(&mut self, index: usize, on: bool) {
        if index >= self.tabs.len() {
            return;
        }
        if on {
            if let Some(previous) = self.active {
                if previous != index {
                    self.tabs[previous].set_on_silent(false);
                    self.pages[previous].hide();
                }
            }
            self.pages[index].show();
            self.active = Some(index);
        } else if self.active == Some(index) {
            self.tabs[index].set_on_silent(true);
        }
    }
}

impl<T: Toggleable, V: Showable> Default for TabMenuController<T, V> {
    fn default() -> Self {
        Self::new()
    }
}
