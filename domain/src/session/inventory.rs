//! Ingredient inventory value object

use serde::{Deserialize, Serialize};

/// Ingredients the user has confirmed having or lacking.
///
/// `have` and `missing` are disjoint: moving an item into one set removes it
/// from the other. Names are trimmed and lower-cased before any membership
/// test; no stemming is applied, so "tomato" and "tomatoes" are distinct.
/// Both lists keep first-insertion order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientInventory {
    have: Vec<String>,
    missing: Vec<String>,
}

/// Normalize an ingredient name for storage and comparison.
pub fn normalize_ingredient(name: &str) -> String {
    name.trim().to_lowercase()
}

impl IngredientInventory {
    pub fn have(&self) -> &[String] {
        &self.have
    }

    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    pub fn is_empty(&self) -> bool {
        self.have.is_empty() && self.missing.is_empty()
    }

    /// Record an ingredient as available. Empty names are ignored.
    pub fn mark_have(&mut self, name: &str) {
        let name = normalize_ingredient(name);
        if name.is_empty() {
            return;
        }
        self.missing.retain(|m| m != &name);
        if !self.have.contains(&name) {
            self.have.push(name);
        }
    }

    /// Record an ingredient as unavailable. Empty names are ignored.
    pub fn mark_missing(&mut self, name: &str) {
        let name = normalize_ingredient(name);
        if name.is_empty() {
            return;
        }
        self.have.retain(|h| h != &name);
        if !self.missing.contains(&name) {
            self.missing.push(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_have_normalizes() {
        let mut inv = IngredientInventory::default();
        inv.mark_have("  Eggs ");
        inv.mark_have("eggs");
        assert_eq!(inv.have(), &["eggs".to_string()]);
    }

    #[test]
    fn test_sets_stay_disjoint() {
        let mut inv = IngredientInventory::default();
        inv.mark_have("milk");
        inv.mark_missing("milk");
        assert!(inv.have().is_empty());
        assert_eq!(inv.missing(), &["milk".to_string()]);

        inv.mark_have("MILK");
        assert_eq!(inv.have(), &["milk".to_string()]);
        assert!(inv.missing().is_empty());
    }

    #[test]
    fn test_empty_names_ignored() {
        let mut inv = IngredientInventory::default();
        inv.mark_have("   ");
        inv.mark_missing("");
        assert!(inv.is_empty());
    }

    #[test]
    fn test_no_stemming() {
        let mut inv = IngredientInventory::default();
        inv.mark_have("tomato");
        inv.mark_have("tomatoes");
        assert_eq!(inv.have().len(), 2);
    }
}
