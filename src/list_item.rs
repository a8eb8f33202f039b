//! Suggestion list item
//!
//! Renders one candidate with its matched spans emphasized and reports
//! activation to the owning controller. Items are built fresh per render and
//! hold no state of their own.

use crate::matching::{self, Span};

/// CSS-style class hooks for list items.
pub const ITEM_CLASS: &str = "autocomplete-item";
pub const ITEM_ACTIVE_CLASS: &str = "active";

/// Event emitted by an item when it is activated (click or equivalent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    Selected(String),
}

/// One rendered suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    /// Full candidate text, emitted on activation
    pub value: String,
    /// Highlighted text of the candidate
    pub spans: Vec<Span>,
    /// Whether this item is the keyboard cursor target
    pub selected: bool,
}

impl SuggestionItem {
    /// Highlight `value` against the current `query`.
    ///
    /// If highlighting fails the item shows the bare candidate text.
    pub fn new(value: &str, query: &str, selected: bool) -> Self {
        let mut spans = matching::highlight(value, query);
        if spans.is_empty() && !value.is_empty() {
            spans = vec![Span::plain(value)];
        }
        Self {
            value: value.to_string(),
            spans,
            selected,
        }
    }

    pub fn class_name(&self) -> String {
        if self.selected {
            format!("{} {}", ITEM_CLASS, ITEM_ACTIVE_CLASS)
        } else {
            ITEM_CLASS.to_string()
        }
    }

    /// Text content without emphasis.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn activate(&self) -> ItemEvent {
        ItemEvent::Selected(self.value.clone())
    }
}
