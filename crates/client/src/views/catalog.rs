//! Plugin catalog view state.
//!
//! Holds the last fetched plugins and derives the visible list from a
//! debounced search term plus type and access filters.

use std::time::{Duration, Instant};

use crate::models::{DeploymentType, Plugin};
use crate::views::debounce::Debounced;

/// Access-based filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessFilter {
    #[default]
    All,
    /// Only plugins the current user may provision.
    Available,
    /// Only locked plugins.
    Locked,
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    plugins: Vec<Plugin>,
    search: Debounced<String>,
    deployment_type: Option<DeploymentType>,
    access: AccessFilter,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self {
            plugins: Vec::new(),
            search: Debounced::default(),
            deployment_type: None,
            access: AccessFilter::All,
        }
    }
}

fn matches_term(plugin: &Plugin, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let contains = |s: &str| s.to_lowercase().contains(term);
    contains(&plugin.name)
        || plugin.description.as_deref().is_some_and(contains)
        || plugin.tags.iter().any(|t| contains(t))
}

impl CatalogView {
    pub fn new(search_delay: Duration) -> Self {
        Self {
            search: Debounced::new(String::new(), search_delay),
            ..Self::default()
        }
    }

    /// Replace the catalog contents with a fresh fetch.
    pub fn set_plugins(&mut self, plugins: Vec<Plugin>) {
        self.plugins = plugins;
    }

    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    /// Record typed search text; it takes effect after the debounce delay.
    pub fn type_search(&mut self, text: &str, now: Instant) {
        self.search.set(text.to_string(), now);
    }

    /// Advance time. Returns `true` when the visible list may have changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.search.tick(now)
    }

    /// Apply the typed search immediately.
    pub fn commit_search(&mut self) -> bool {
        self.search.flush()
    }

    pub fn search_text(&self) -> &str {
        self.search.raw()
    }

    pub fn set_deployment_type(&mut self, deployment_type: Option<DeploymentType>) {
        self.deployment_type = deployment_type;
    }

    pub fn set_access_filter(&mut self, access: AccessFilter) {
        self.access = access;
    }

    /// Plugins passing every filter, stably sorted by name (case-insensitive).
    pub fn visible(&self) -> Vec<&Plugin> {
        let term = self.search.effective().trim().to_lowercase();
        let mut visible: Vec<&Plugin> = self
            .plugins
            .iter()
            .filter(|p| matches_term(p, &term))
            .filter(|p| match &self.deployment_type {
                Some(wanted) => p.deployment_type.as_ref() == Some(wanted),
                None => true,
            })
            .filter(|p| match self.access {
                AccessFilter::All => true,
                AccessFilter::Available => p.can_provision(),
                AccessFilter::Locked => p.is_locked,
            })
            .collect();
        visible.sort_by_key(|p| p.name.to_lowercase());
        visible
    }
}
