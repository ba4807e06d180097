//! Panels and the panel set.
//!
//! A [`PanelSet`] holds between [`MIN_PANELS`] and [`MAX_PANELS`] panels. The
//! first panel is the base every other panel is compared against.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

pub const MIN_PANELS: usize = 2;
pub const MAX_PANELS: usize = 4;

/// Errors from changing the panel set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("cannot have more than {} panels", MAX_PANELS)]
    TooManyPanels,

    #[error("cannot have fewer than {} panels", MIN_PANELS)]
    TooFewPanels,

    #[error("no panel with id {0}")]
    UnknownPanel(PanelId),
}

/// Stable identity of a panel, independent of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(Uuid);

impl PanelId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The all-zero id, for values not tied to a live panel.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for PanelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: PanelId,
    pub title: String,
    pub text: String,
}

impl Panel {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: PanelId::new(),
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Ordered panels; index 0 is the base.
#[derive(Debug, Clone)]
pub struct PanelSet {
    panels: Vec<Panel>,
}

impl PanelSet {
    pub fn new(base: Panel, comparison: Panel) -> Self {
        Self {
            panels: vec![base, comparison],
        }
    }

    /// Build a set from existing panels, enforcing the panel count bounds.
    pub fn from_panels(panels: Vec<Panel>) -> Result<Self, PanelError> {
        if panels.len() < MIN_PANELS {
            return Err(PanelError::TooFewPanels);
        }
        if panels.len() > MAX_PANELS {
            return Err(PanelError::TooManyPanels);
        }
        Ok(Self { panels })
    }

    pub fn base(&self) -> &Panel {
        &self.panels[0]
    }

    pub fn is_base(&self, id: PanelId) -> bool {
        self.base().id == id
    }

    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|panel| panel.id == id)
    }

    pub fn position(&self, id: PanelId) -> Option<usize> {
        self.panels.iter().position(|panel| panel.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Panel> {
        self.panels.iter()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Always false; a set never drops below [`MIN_PANELS`].
    pub fn is_empty(&self) -> bool {
        debug_assert!(self.panels.len() >= MIN_PANELS);
        false
    }

    pub fn can_add(&self) -> bool {
        self.panels.len() < MAX_PANELS
    }

    pub fn can_remove(&self) -> bool {
        self.panels.len() > MIN_PANELS
    }

    /// Append an empty comparison panel.
    pub fn add_panel(&mut self) -> Result<PanelId, PanelError> {
        if !self.can_add() {
            return Err(PanelError::TooManyPanels);
        }
        let panel = Panel::new(format!("Comparison {}", self.panels.len()), "");
        let id = panel.id;
        self.panels.push(panel);
        tracing::debug!(%id, count = self.panels.len(), "added panel");
        Ok(id)
    }

    /// Remove the last panel, returning it.
    pub fn remove_last(&mut self) -> Result<Panel, PanelError> {
        if !self.can_remove() {
            return Err(PanelError::TooFewPanels);
        }
        let panel = self.panels.pop().ok_or(PanelError::TooFewPanels)?;
        tracing::debug!(id = %panel.id, count = self.panels.len(), "removed panel");
        Ok(panel)
    }

    pub fn set_text(&mut self, id: PanelId, text: impl Into<String>) -> Result<(), PanelError> {
        self.get_mut(id)?.text = text.into();
        Ok(())
    }

    pub fn set_title(&mut self, id: PanelId, title: impl Into<String>) -> Result<(), PanelError> {
        self.get_mut(id)?.title = title.into();
        Ok(())
    }

    fn get_mut(&mut self, id: PanelId) -> Result<&mut Panel, PanelError> {
        self.panels
            .iter_mut()
            .find(|panel| panel.id == id)
            .ok_or(PanelError::UnknownPanel(id))
    }
}

impl<'a> IntoIterator for &'a PanelSet {
    type Item = &'a Panel;
    type IntoIter = std::slice::Iter<'a, Panel>;

    fn into_iter(self) -> Self::IntoIter {
        self.panels.iter()
    }
}
