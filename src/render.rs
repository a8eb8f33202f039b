//! Render model for the autocomplete widget
//!
//! [`View`] is a plain snapshot of what the widget shows: the input and, when
//! open and non-empty, the dropdown. Candidate text is only ever carried as
//! data; [`to_plain_text`] writes it to a terminal with control characters
//! neutralized, so a candidate can't inject escape sequences.

use std::fmt::Write;

use crate::list_item::SuggestionItem;
use crate::matching::Span;

/// Text of the loading indicator
pub const LOADING_TEXT: &str = "Loading ...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub value: String,
    pub placeholder: Option<String>,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    pub loading: bool,
    pub items: Vec<SuggestionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub input: InputView,
    /// Present only while the list is open and loading or non-empty
    pub dropdown: Option<Dropdown>,
}

impl View {
    pub fn items(&self) -> &[SuggestionItem] {
        self.dropdown
            .as_ref()
            .map(|d| d.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.dropdown.as_ref().is_some_and(|d| d.loading)
    }
}

/// How matched spans are emphasized in terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    /// ANSI bold
    #[default]
    Ansi,
    /// `[match]`, for plain logs and tests
    Brackets,
}

/// Render `view` as lines of terminal text.
pub fn to_plain_text(view: &View, emphasis: Emphasis) -> String {
    let mut out = String::new();

    if view.input.value.is_empty() {
        let placeholder = view.input.placeholder.as_deref().unwrap_or("");
        let _ = writeln!(out, "> ({})", sanitize(placeholder));
    } else {
        let _ = writeln!(out, "> {}", sanitize(&view.input.value));
    }

    if let Some(dropdown) = &view.dropdown {
        if dropdown.loading {
            let _ = writeln!(out, "  {}", LOADING_TEXT);
        }
        for (i, item) in dropdown.items.iter().enumerate() {
            let marker = if item.selected { '*' } else { ' ' };
            let _ = writeln!(
                out,
                "{} {:>2}. {}",
                marker,
                i + 1,
                render_spans(&item.spans, emphasis)
            );
        }
    }

    out
}

/// Render highlighted spans with the given emphasis style.
pub fn render_spans(spans: &[Span], emphasis: Emphasis) -> String {
    let mut out = String::new();
    for span in spans {
        let text = sanitize(&span.text);
        match (span.is_match, emphasis) {
            (false, _) => out.push_str(&text),
            (true, Emphasis::Ansi) => {
                let _ = write!(out, "\x1b[1m{}\x1b[22m", text);
            }
            (true, Emphasis::Brackets) => {
                let _ = write!(out, "[{}]", text);
            }
        }
    }
    out
}

fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(value: &str, dropdown: Option<Dropdown>) -> View {
        View {
            input: InputView {
                value: value.to_string(),
                placeholder: Some("Please enter a region".to_string()),
                class_name: None,
            },
            dropdown,
        }
    }

    #[test]
    fn test_placeholder_shown_for_empty_input() {
        let text = to_plain_text(&view("", None), Emphasis::Brackets);
        assert_eq!(text, "> (Please enter a region)\n");
    }

    #[test]
    fn test_dropdown_lines() {
        let dropdown = Dropdown {
            loading: true,
            items: vec![
                SuggestionItem::new("London, UK", "Lond", true),
                SuggestionItem::new("Londonderry, UK", "Lond", false),
            ],
        };
        let text = to_plain_text(&view("Lond", Some(dropdown)), Emphasis::Brackets);
        assert_eq!(
            text,
            "> Lond\n  Loading ...\n*  1. [Lond]on, UK\n   2. [Lond]onderry, UK\n"
        );
    }

    #[test]
    fn test_ansi_emphasis() {
        let spans = vec![Span::matched("Lond"), Span::plain("on")];
        assert_eq!(render_spans(&spans, Emphasis::Ansi), "\x1b[1mLond\x1b[22mon");
    }

    #[test]
    fn test_control_characters_are_neutralized() {
        let spans = vec![Span::plain("evil\x1b[31m")];
        assert_eq!(render_spans(&spans, Emphasis::Brackets), "evil [31m");
    }

    #[test]
    fn test_view_helpers() {
        let v = view("x", None);
        assert!(v.items().is_empty());
        assert!(!v.is_loading());
    }
}
