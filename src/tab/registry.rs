//! Registry of open tabs and the current selection

use super::{OpenInteractionType, Tab, TabId, TabStatus};
use par_connector_protocol::TabCategory;
use thiserror::Error;

/// Registry operations that can be refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// `add_tab` was called with an id that is already registered.
    #[error("tab {0} already exists")]
    AlreadyExists(TabId),

    /// A tab with a concrete category was asked to go back to `unknown`.
    #[error("tab {id} is already {current}; category cannot revert to unknown")]
    CategoryRevert { id: TabId, current: TabCategory },
}

/// All tabs in the panel, in the order they were opened.
///
/// At most one tab is selected at a time. The selection flag lives on the
/// tab itself; `selected_tab_id` mirrors it for O(1) lookup.
#[derive(Debug, Default)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    selected_tab_id: Option<TabId>,
}

impl TabRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new tab. It becomes the selected tab.
    ///
    /// # Errors
    /// [`RegistryError::AlreadyExists`] if the id is taken; the existing tab is
    /// left unchanged.
    pub fn add_tab(&mut self, id: TabId) -> Result<(), RegistryError> {
        if self.contains(&id) {
            return Err(RegistryError::AlreadyExists(id));
        }

        self.clear_selection();
        log::debug!("Added tab {} (total: {})", id, self.tabs.len() + 1);
        self.selected_tab_id = Some(id.clone());
        self.tabs.push(Tab::new(id));
        Ok(())
    }

    /// Remove a tab, returning it. Unknown ids return `None`.
    pub fn delete_tab(&mut self, id: &TabId) -> Option<Tab> {
        let idx = self.tabs.iter().position(|t| &t.id == id)?;
        let tab = self.tabs.remove(idx);

        if self.selected_tab_id.as_ref() == Some(id) {
            self.selected_tab_id = None;
        }

        log::debug!("Deleted tab {} (remaining: {})", id, self.tabs.len());
        Some(tab)
    }

    pub fn get_tab(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| &t.id == id)
    }

    fn get_tab_mut(&mut self, id: &TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TabId) -> bool {
        self.tabs.iter().any(|t| &t.id == id)
    }

    /// Category of a tab, or `None` if it is not registered
    pub fn category_of(&self, id: &TabId) -> Option<TabCategory> {
        self.get_tab(id).map(|t| t.category)
    }

    /// Mark `id` selected and return the previously selected id.
    ///
    /// Selecting an unregistered id changes nothing and returns `None`.
    /// Selecting the already-selected tab returns its own id.
    pub fn set_selected(&mut self, id: &TabId) -> Option<TabId> {
        if !self.contains(id) {
            return None;
        }

        let previous = self.selected_tab_id.clone();
        self.clear_selection();
        if let Some(tab) = self.get_tab_mut(id) {
            tab.is_selected = true;
        }
        self.selected_tab_id = Some(id.clone());
        previous
    }

    fn clear_selection(&mut self) {
        for tab in self.tabs.iter_mut().filter(|t| t.is_selected) {
            tab.is_selected = false;
        }
    }

    pub fn selected_tab(&self) -> Option<&Tab> {
        self.selected_tab_id
            .as_ref()
            .and_then(|id| self.get_tab(id))
    }

    /// The most recently opened tab still registered
    pub fn most_recent_tab(&self) -> Option<&Tab> {
        self.tabs.last()
    }

    /// Assign a concrete category to a tab that is still `unknown`.
    ///
    /// Returns `Ok(true)` if the category changed, `Ok(false)` if the tab is
    /// not registered or already has a concrete category (the category sticks
    /// once set).
    ///
    /// # Errors
    /// [`RegistryError::CategoryRevert`] when asked to set `unknown` on a tab
    /// whose category is already concrete.
    pub fn update_category_from_unknown(
        &mut self,
        id: &TabId,
        category: TabCategory,
    ) -> Result<bool, RegistryError> {
        let Some(tab) = self.get_tab_mut(id) else {
            return Ok(false);
        };

        if category.is_unknown() {
            if tab.category.is_unknown() {
                return Ok(false);
            }
            return Err(RegistryError::CategoryRevert {
                id: id.clone(),
                current: tab.category,
            });
        }

        if !tab.category.is_unknown() {
            return Ok(false);
        }

        tab.category = category;
        log::debug!("Tab {} category set to {}", id, category);
        Ok(true)
    }

    pub fn update_status(&mut self, id: &TabId, status: TabStatus) {
        if let Some(tab) = self.get_tab_mut(id) {
            tab.status = status;
        }
    }

    pub fn update_last_command(&mut self, id: &TabId, command: Option<String>) {
        if let Some(tab) = self.get_tab_mut(id) {
            tab.last_command = command;
        }
    }

    pub fn set_open_interaction_type(&mut self, id: &TabId, kind: OpenInteractionType) {
        if let Some(tab) = self.get_tab_mut(id) {
            tab.open_interaction_type = Some(kind);
        }
    }

    /// All tabs, oldest first
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
