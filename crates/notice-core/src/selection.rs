//! Selectable set of option codes backing every multi-select field.
//!
//! Storage order carries no meaning: rendering always follows catalog order.

use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    codes: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `code`. Returns `false` if it was already selected.
    pub fn insert(&mut self, code: impl Into<String>) -> bool {
        self.codes.insert(code.into())
    }

    /// Remove `code`. Returns `false` if it was not selected.
    pub fn remove(&mut self, code: &str) -> bool {
        self.codes.remove(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Flip `code` in or out of the set. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, code: &str) -> bool {
        if self.codes.remove(code) {
            false
        } else {
            self.codes.insert(code.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Labels of the selected codes in catalog order.
    ///
    /// Codes the catalog does not define follow the known ones, verbatim.
    pub fn labels_in<'a>(&'a self, catalog: &Catalog) -> Vec<&'a str> {
        let known = catalog
            .choices
            .iter()
            .filter(|choice| self.contains(choice.code))
            .map(|choice| -> &'a str { choice.label });
        known.chain(self.unknown_in(catalog)).collect()
    }

    /// Selected codes that `catalog` does not define.
    pub fn unknown_in<'a>(&'a self, catalog: &Catalog) -> Vec<&'a str> {
        self.iter().filter(|code| !catalog.contains(code)).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogId;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = Selection::new();
        assert!(selection.toggle("ria"));
        assert!(selection.contains("ria"));
        assert!(!selection.toggle("ria"));
        assert!(selection.is_empty());
    }

    #[test]
    fn insert_is_idempotent() {
        let mut selection = Selection::new();
        assert!(selection.insert("ria"));
        assert!(!selection.insert("ria"));
        assert_eq!(selection.len(), 1);
        assert!(selection.remove("ria"));
        assert!(!selection.remove("ria"));
    }

    #[test]
    fn labels_follow_catalog_order_not_insertion_order() {
        let selection: Selection = ["alarme_sonore", "degagements_conformes", "eclairage_securite"]
            .into_iter()
            .collect();
        let labels = selection.labels_in(CatalogId::Evacuation.catalog());
        assert_eq!(
            labels,
            vec![
                "Dégagements en nombre et largeur réglementaires (UP)",
                "Éclairage de sécurité (BAES / LSC)",
                "Alarme sonore générale",
            ]
        );
    }

    #[test]
    fn unknown_codes_render_verbatim_after_known_ones() {
        let selection: Selection = ["xyz_unknown", "ria"].into_iter().collect();
        let catalog = CatalogId::Suppression.catalog();
        assert_eq!(
            selection.labels_in(catalog),
            vec!["Robinets d'incendie armés (RIA)", "xyz_unknown"]
        );
        assert_eq!(selection.unknown_in(catalog), vec!["xyz_unknown"]);
    }
}
