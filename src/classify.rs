//! Keyword-table classification of transaction descriptions.
//!
//! Category and event assignment is a plain data lookup: an ordered list
//! of keyword rules where the first match wins. The tables ship with
//! club-domain defaults and are fully replaceable through configuration.

use serde::{Deserialize, Serialize};

/// One rule: a case-insensitive keyword and the label it maps to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub label: String,
}

/// Ordered keyword table with an explicit default label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTable {
    pub rules: Vec<KeywordRule>,
    pub default_label: String,
}

impl KeywordTable {
    /// Create an empty table with the given default label.
    pub fn new(default_label: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            default_label: default_label.into(),
        }
    }

    /// Append a rule. Earlier rules take priority.
    pub fn with_rule(mut self, keyword: impl Into<String>, label: impl Into<String>) -> Self {
        self.rules.push(KeywordRule {
            keyword: keyword.into(),
            label: label.into(),
        });
        self
    }

    /// Label for a piece of text: the first rule whose keyword occurs in
    /// it (case-insensitive), else the default label.
    pub fn classify(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| lower.contains(&rule.keyword.to_lowercase()))
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| self.default_label.clone())
    }
}

/// Category and event tables bundled for the extraction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classifier {
    pub categories: KeywordTable,
    pub events: KeywordTable,
}

impl Classifier {
    pub fn new(categories: KeywordTable, events: KeywordTable) -> Self {
        Self { categories, events }
    }

    /// Best-effort category for a description.
    pub fn category(&self, description: &str) -> String {
        self.categories.classify(description)
    }

    /// Best-effort event label for a description.
    pub fn event(&self, description: &str) -> String {
        self.events.classify(description)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        // "training" must precede "train" so coaching sessions don't
        // land in Transport.
        let categories = KeywordTable::new("Uncategorized")
            .with_rule("training", "Training")
            .with_rule("coach", "Training")
            .with_rule("minibus", "Transport")
            .with_rule("transport", "Transport")
            .with_rule("fuel", "Transport")
            .with_rule("train", "Transport")
            .with_rule("insurance", "Insurance")
            .with_rule("kit", "Equipment")
            .with_rule("equipment", "Equipment")
            .with_rule("hire", "Equipment")
            .with_rule("membership", "Membership")
            .with_rule("subs", "Membership")
            .with_rule("registration", "Membership")
            .with_rule("catering", "Food")
            .with_rule("food", "Food")
            .with_rule("accommodation", "Accommodation")
            .with_rule("hostel", "Accommodation")
            .with_rule("bunkhouse", "Accommodation");

        let events = KeywordTable::new("General")
            .with_rule("welsh 3000", "Welsh 3000s")
            .with_rule("snowdon", "Snowdonia Trip")
            .with_rule("agm", "AGM")
            .with_rule("social", "Social");

        Self::new(categories, events)
    }
}
