//! Role editor state: permission selection against the known catalogue.

use std::collections::BTreeMap;

use crate::models::{Permission, Role, RoleParams};
use crate::permissions::{PermissionMatch, match_known, normalize_slug};

#[derive(Debug, Clone, Default)]
pub struct RoleEditor {
    name: String,
    description: Option<String>,
    catalogue: Vec<Permission>,
    /// Normalised slugs, in selection order.
    selected: Vec<String>,
}

impl RoleEditor {
    pub fn new(catalogue: Vec<Permission>) -> Self {
        Self {
            catalogue,
            ..Self::default()
        }
    }

    /// Start editing an existing role. Its slugs are normalised on load.
    pub fn from_role(role: &Role, catalogue: Vec<Permission>) -> Self {
        let mut editor = Self::new(catalogue);
        editor.name = role.name.clone();
        editor.description = role.description.clone();
        for slug in &role.permissions {
            editor.select(slug);
        }
        editor
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn is_selected(&self, slug: &str) -> bool {
        self.selected.contains(&normalize_slug(slug))
    }

    pub fn select(&mut self, slug: &str) {
        let slug = normalize_slug(slug);
        if !slug.is_empty() && !self.selected.contains(&slug) {
            self.selected.push(slug);
        }
    }

    pub fn deselect(&mut self, slug: &str) {
        let slug = normalize_slug(slug);
        self.selected.retain(|s| *s != slug);
    }

    /// Flip one permission. Returns the new selection state.
    pub fn toggle(&mut self, slug: &str) -> bool {
        if self.is_selected(slug) {
            self.deselect(slug);
            false
        } else {
            self.select(slug);
            true
        }
    }

    /// Catalogue grouped by category, categories sorted.
    pub fn categories(&self) -> BTreeMap<String, Vec<&Permission>> {
        let mut grouped: BTreeMap<String, Vec<&Permission>> = BTreeMap::new();
        for permission in &self.catalogue {
            grouped
                .entry(permission.category_or_prefix().to_string())
                .or_default()
                .push(permission);
        }
        grouped
    }

    /// Select every permission of `category`, or clear them all if they are
    /// already all selected.
    pub fn toggle_category(&mut self, category: &str) {
        let slugs: Vec<String> = self
            .catalogue
            .iter()
            .filter(|p| p.category_or_prefix().eq_ignore_ascii_case(category))
            .map(|p| p.slug.clone())
            .collect();
        if slugs.iter().all(|s| self.is_selected(s)) {
            for slug in &slugs {
                self.deselect(slug);
            }
        } else {
            for slug in &slugs {
                self.select(slug);
            }
        }
    }

    /// Selection checked against the catalogue.
    pub fn resolve(&self) -> PermissionMatch {
        match_known(&self.selected, &self.catalogue)
    }

    /// Body for create/update. Unknown slugs are left out; see
    /// [`RoleEditor::resolve`] to report them.
    pub fn to_params(&self) -> RoleParams {
        RoleParams {
            name: self.name.trim().to_string(),
            description: self.description.clone().filter(|d| !d.trim().is_empty()),
            permissions: self.resolve().matched,
        }
    }
}
