use super::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::matching::Span;
use crate::sources::CurrencySource;

/// Data source that records calls and holds responders until the test
/// answers them, so settlement order is fully controlled.
#[derive(Clone, Default)]
struct ManualLookup {
    calls: Arc<Mutex<Vec<String>>>,
    pending: Arc<Mutex<Vec<Responder>>>,
}

impl LoadData for ManualLookup {
    fn load(&self, query: &str, responder: Responder) {
        self.calls.lock().push(query.to_string());
        self.pending.lock().push(responder);
    }
}

impl ManualLookup {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn take(&self, query: &str) -> Responder {
        let mut pending = self.pending.lock();
        let pos = pending
            .iter()
            .position(|r| r.query() == query)
            .unwrap_or_else(|| panic!("no pending lookup for {query:?}"));
        pending.remove(pos)
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn london_source(query: &str) -> anyhow::Result<Vec<String>> {
    if query.to_lowercase().starts_with("lond") {
        Ok(strings(&["London, UK", "Londonderry, UK"]))
    } else {
        Ok(Vec::new())
    }
}

fn manual_widget() -> (Autocomplete, ManualLookup) {
    let lookup = ManualLookup::default();
    let widget = Autocomplete::new(AutocompleteConfig::default(), lookup.clone());
    (widget, lookup)
}

fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |value: &str| sink.borrow_mut().push(value.to_string()))
}

// ============================================
// DEBOUNCE
// ============================================

#[test]
fn test_burst_of_keystrokes_fetches_once_with_last_text() {
    let t0 = Instant::now();
    let (mut widget, lookup) = manual_widget();
    widget.focus(t0);

    widget.input("L", t0);
    widget.input("Lo", t0 + ms(100));
    widget.input("Lon", t0 + ms(200));
    widget.input("Lond", t0 + ms(300));

    widget.tick(t0 + ms(700));
    assert!(lookup.calls().is_empty());

    widget.tick(t0 + ms(800));
    assert_eq!(lookup.calls(), strings(&["Lond"]));
    assert!(widget.is_loading());

    widget.tick(t0 + ms(2000));
    assert_eq!(lookup.calls().len(), 1);
}

#[test]
fn test_query_updates_immediately() {
    let t0 = Instant::now();
    let (mut widget, _lookup) = manual_widget();
    widget.input("Lo", t0);
    assert_eq!(widget.query(), "Lo");
    assert!(widget.is_list_visible());
    assert_eq!(widget.next_deadline(), Some(t0 + ms(500)));
}

#[test]
fn test_custom_debounce_delay() {
    let t0 = Instant::now();
    let lookup = ManualLookup::default();
    let config = AutocompleteConfig {
        debounce_ms: 50,
        ..AutocompleteConfig::default()
    };
    let mut widget = Autocomplete::new(config, lookup.clone());
    widget.input("usd", t0);
    widget.tick(t0 + ms(50));
    assert_eq!(lookup.calls(), strings(&["usd"]));
}

#[test]
fn test_no_fetch_once_list_closed() {
    let t0 = Instant::now();
    let (mut widget, lookup) = manual_widget();
    widget.focus(t0);
    widget.input("Lond", t0);
    widget.blur(t0 + ms(10));

    // Close fires at 210, before the debounce at 500
    widget.tick(t0 + ms(600));
    assert!(!widget.is_list_visible());
    assert!(lookup.calls().is_empty());
}

#[test]
fn test_focus_with_stale_seed_value_fetches_after_debounce() {
    let t0 = Instant::now();
    let lookup = ManualLookup::default();
    let config = AutocompleteConfig::default().with_value("Lond");
    let mut widget = Autocomplete::new(config, lookup.clone());
    assert_eq!(widget.query(), "Lond");

    widget.tick(t0 + ms(1000));
    assert!(lookup.calls().is_empty());

    widget.focus(t0 + ms(1000));
    widget.tick(t0 + ms(1500));
    assert_eq!(lookup.calls(), strings(&["Lond"]));
}

#[test]
fn test_refocus_without_change_does_not_refetch() {
    let t0 = Instant::now();
    let (mut widget, lookup) = manual_widget();
    widget.focus(t0);
    widget.input("Lond", t0);
    widget.tick(t0 + ms(500));
    lookup.take("Lond").resolve(strings(&["London, UK", "Londonderry, UK"]));
    widget.pump();
    assert_eq!(widget.last_fetched_query(), "Lond");

    widget.blur(t0 + ms(600));
    widget.tick(t0 + ms(800));
    assert!(!widget.is_list_visible());

    widget.focus(t0 + ms(900));
    assert!(!widget.is_busy());
    widget.tick(t0 + ms(2000));
    assert_eq!(lookup.calls(), strings(&["Lond"]));
    assert_eq!(widget.candidates().len(), 2);
}

// ============================================
// STALENESS
// ============================================

#[test]
fn test_superseded_fetch_is_discarded() {
    let t0 = Instant::now();
    let (mut widget, lookup) = manual_widget();
    widget.focus(t0);

    widget.input("A", t0);
    widget.tick(t0 + ms(500));
    widget.input("B", t0 + ms(600));
    widget.tick(t0 + ms(1100));
    assert_eq!(lookup.calls(), strings(&["A", "B"]));

    lookup.take("B").resolve(strings(&["b1", "b2"]));
    assert_eq!(widget.pump(), 1);
    assert_eq!(widget.candidates(), strings(&["b1", "b2"]).as_slice());
    assert_eq!(widget.last_fetched_query(), "B");
    assert!(!widget.is_loading());

    // The slower, older answer arrives last
    lookup.take("A").resolve(strings(&["a1"]));
    assert_eq!(widget.pump(), 0);
    assert_eq!(widget.candidates(), strings(&["b1", "b2"]).as_slice());
    assert_eq!(widget.last_fetched_query(), "B");
}

#[test]
fn test_latest_dispatch_applies_even_if_query_moved_on() {
    let t0 = Instant::now();
    let (mut widget, lookup) = manual_widget();
    widget.focus(t0);
    widget.input("Lon", t0);
    widget.tick(t0 + ms(500));

    // Typing continues but the next debounce hasn't fired yet
    widget.input("Lond", t0 + ms(600));
    lookup.take("Lon").resolve(strings(&["London, UK"]));
    widget.tick(t0 + ms(700));

    assert_eq!(widget.candidates(), strings(&["London, UK"]).as_slice());
    assert_eq!(widget.last_fetched_query(), "Lon");
    assert!(!widget.is_loading());

    // Highlighting follows the live query, not the fetched one
    let view = widget.view();
    assert_eq!(view.items()[0].spans[0], Span::matched("Lond"));

    // Live query differs from the fetched one, so the next debounce fetches again
    widget.tick(t0 + ms(1100));
    assert_eq!(lookup.calls(), strings(&["Lon", "Lond"]));
}

#[test]
fn test_hung_lookup_is_replaced_by_newer_dispatch() {
    let t0 = Instant::now();
    let (mut widget, lookup) = manual_widget();
    widget.focus(t0);
    widget.input("par", t0);
    widget.tick(t0 + ms(500));
    assert!(widget.is_loading());

    widget.input("paris", t0 + ms(5000));
    widget.tick(t0 + ms(5500));
    assert!(widget.is_loading());

    lookup.take("paris").resolve(strings(&["Paris, France"]));
    widget.pump();
    assert!(!widget.is_loading());

    lookup.take("par").resolve(strings(&["Parma, Italy"]));
    widget.pump();
    assert_eq!(widget.candidates(), strings(&["Paris, France"]).as_slice());
}

// ============================================
// FAILURES
// ============================================

#[test]
fn test_failed_lookup_yields_empty_candidates() {
    let t0 = Instant::now();
    let failing = |_: &str| -> anyhow::Result<Vec<String>> { anyhow::bail!("service down") };
    let (changes, on_change) = recorder();
    let mut widget = Autocomplete::new(AutocompleteConfig::default(), failing).on_change(on_change);
    widget.focus(t0);
    widget.input("Lond", t0);
    widget.tick(t0 + ms(500));

    assert!(widget.candidates().is_empty());
    assert!(!widget.is_loading());
    assert_eq!(widget.last_fetched_query(), "Lond");
    assert_eq!(widget.view().dropdown, None);
    // Failure is not reported through the change callback
    assert_eq!(*changes.borrow(), strings(&["Lond"]));
}

#[test]
fn test_dropped_responder_clears_loading() {
    let t0 = Instant::now();
    let (mut widget, lookup) = manual_widget();
    widget.focus(t0);
    widget.input("Lond", t0);
    widget.tick(t0 + ms(500));
    assert!(widget.is_loading());

    drop(lookup.take("Lond"));
    widget.pump();
    assert!(!widget.is_loading());
    assert!(widget.candidates().is_empty());
}

// ============================================
// CLEARING
// ============================================

#[test]
fn test_clearing_input_empties_candidates_immediately() {
    let t0 = Instant::now();
    let mut widget = Autocomplete::new(AutocompleteConfig::default(), london_source);
    widget.focus(t0);
    widget.input("Lond", t0);
    widget.tick(t0 + ms(500));
    widget.key(NavKey::Down, t0 + ms(600));
    assert_eq!(widget.candidates().len(), 2);

    widget.input("", t0 + ms(700));
    assert!(widget.candidates().is_empty());
    assert_eq!(widget.cursor(), None);
    assert_eq!(widget.last_fetched_query(), "");
    assert_eq!(widget.next_deadline(), None);
}

#[test]
fn test_clearing_input_discards_in_flight_lookup() {
    let t0 = Instant::now();
    let (mut widget, lookup) = manual_widget();
    widget.focus(t0);
    widget.input("Lond", t0);
    widget.tick(t0 + ms(500));
    assert!(widget.is_loading());

    widget.input("", t0 + ms(600));
    assert!(!widget.is_loading());

    lookup.take("Lond").resolve(strings(&["London, UK"]));
    widget.tick(t0 + ms(2000));
    assert!(widget.candidates().is_empty());
    assert_eq!(lookup.calls(), strings(&["Lond"]));
}

// ============================================
// SELECTION CURSOR
// ============================================

#[test]
fn test_cursor_stays_in_bounds() {
    let t0 = Instant::now();
    let mut widget = Autocomplete::new(AutocompleteConfig::default(), london_source);
    widget.focus(t0);
    widget.input("Lond", t0);
    widget.tick(t0 + ms(500));

    for _ in 0..5 {
        widget.key(NavKey::Down, t0 + ms(600));
    }
    assert_eq!(widget.cursor(), Some(1));

    widget.key(NavKey::Up, t0 + ms(600));
    assert_eq!(widget.cursor(), Some(0));
    for _ in 0..5 {
        widget.key(NavKey::Up, t0 + ms(600));
    }
    assert_eq!(widget.cursor(), None);
}

#[test]
fn test_cursor_down_without_candidates_stays_none() {
    let t0 = Instant::now();
    let (mut widget, _lookup) = manual_widget();
    widget.focus(t0);
    widget.key(NavKey::Down, t0);
    assert_eq!(widget.cursor(), None);
}

#[test]
fn test_new_results_reset_cursor() {
    let t0 = Instant::now();
    let (mut widget, lookup) = manual_widget();
    widget.focus(t0);
    widget.input("a", t0);
    widget.tick(t0 + ms(500));
    lookup.take("a").resolve(strings(&["a1", "a2"]));
    widget.pump();
    widget.key(NavKey::Down, t0 + ms(600));
    assert_eq!(widget.cursor(), Some(0));

    widget.input("ab", t0 + ms(700));
    widget.tick(t0 + ms(1200));
    lookup.take("ab").resolve(strings(&["ab1"]));
    widget.pump();
    assert_eq!(widget.cursor(), None);
}

#[test]
fn test_enter_without_cursor_does_nothing() {
    let t0 = Instant::now();
    let mut widget = Autocomplete::new(AutocompleteConfig::default(), london_source);
    widget.focus(t0);
    widget.input("Lond", t0);
    widget.tick(t0 + ms(500));

    assert!(!widget.key(NavKey::Enter, t0 + ms(600)));
    assert_eq!(widget.query(), "Lond");
    assert_eq!(widget.candidates().len(), 2);
}

#[test]
fn test_keys_ignored_while_closed() {
    let t0 = Instant::now();
    let (mut widget, _lookup) = manual_widget();
    assert!(!widget.key(NavKey::Down, t0));
    assert!(!widget.key(NavKey::Escape, t0));
}

#[test]
fn test_nav_key_names() {
    assert_eq!(NavKey::from_name("ArrowUp"), Some(NavKey::Up));
    assert_eq!(NavKey::from_name("down"), Some(NavKey::Down));
    assert_eq!(NavKey::from_name("Enter"), Some(NavKey::Enter));
    assert_eq!(NavKey::from_name("Escape"), Some(NavKey::Escape));
    assert_eq!(NavKey::from_name("Tab"), None);
}

// ============================================
// VISIBILITY
// ============================================

#[test]
fn test_blur_hides_list_after_grace_period() {
    let t0 = Instant::now();
    let (mut widget, _lookup) = manual_widget();
    widget.focus(t0);
    widget.blur(t0);

    widget.tick(t0 + ms(199));
    assert!(widget.is_list_visible());
    widget.tick(t0 + ms(200));
    assert!(!widget.is_list_visible());
}

#[test]
fn test_click_during_grace_period_still_selects() {
    let t0 = Instant::now();
    let (changes, on_change) = recorder();
    let mut widget =
        Autocomplete::new(AutocompleteConfig::default(), london_source).on_change(on_change);
    widget.focus(t0);
    widget.input("Lond", t0);
    widget.tick(t0 + ms(500));

    // Pointer down on an item blurs the field first
    widget.blur(t0 + ms(1000));
    widget.tick(t0 + ms(1100));
    let item = widget.view().items()[1].clone();
    widget.handle_item_event(item.activate(), t0 + ms(1100));

    assert_eq!(widget.query(), "Londonderry, UK");
    assert_eq!(changes.borrow().last().map(String::as_str), Some("Londonderry, UK"));
}

#[test]
fn test_refocus_cancels_pending_close() {
    let t0 = Instant::now();
    let (mut widget, _lookup) = manual_widget();
    widget.focus(t0);
    widget.blur(t0 + ms(10));
    widget.focus(t0 + ms(100));

    widget.tick(t0 + ms(1000));
    assert!(widget.is_list_visible());
}

#[test]
fn test_typing_reopens_list() {
    let t0 = Instant::now();
    let (mut widget, _lookup) = manual_widget();
    widget.focus(t0);
    widget.dismiss(t0);
    widget.tick(t0 + ms(200));
    assert!(!widget.is_list_visible());

    widget.input("x", t0 + ms(300));
    assert!(widget.is_list_visible());
}

#[test]
fn test_escape_closes_without_commit() {
    let t0 = Instant::now();
    let mut widget = Autocomplete::new(AutocompleteConfig::default(), london_source);
    widget.focus(t0);
    widget.input("Lond", t0);
    widget.tick(t0 + ms(500));
    widget.key(NavKey::Down, t0 + ms(600));

    assert!(widget.key(NavKey::Escape, t0 + ms(600)));
    widget.tick(t0 + ms(800));
    assert!(!widget.is_list_visible());
    assert_eq!(widget.query(), "Lond");
    assert_eq!(widget.cursor(), None);
    assert_eq!(widget.view().dropdown, None);
}

#[test]
fn test_dropdown_shows_loading_indicator() {
    let t0 = Instant::now();
    let (mut widget, lookup) = manual_widget();
    widget.focus(t0);
    widget.input("Lond", t0);
    assert_eq!(widget.view().dropdown, None);

    widget.tick(t0 + ms(500));
    let view = widget.view();
    assert!(view.is_loading());
    assert!(view.items().is_empty());

    lookup.take("Lond").resolve(strings(&["London, UK"]));
    widget.pump();
    let view = widget.view();
    assert!(!view.is_loading());
    assert_eq!(view.items().len(), 1);
}

// ============================================
// CHANGE NOTIFICATION
// ============================================

#[test]
fn test_on_change_follows_every_mutation_in_order() {
    let t0 = Instant::now();
    let (changes, on_change) = recorder();
    let (widget, _lookup) = manual_widget();
    let mut widget = widget.on_change(on_change);

    widget.input("L", t0);
    widget.input("Lo", t0);
    widget.input("L", t0);
    widget.input("", t0);
    assert_eq!(*changes.borrow(), strings(&["L", "Lo", "L", ""]));
}

#[test]
fn test_on_change_not_fired_for_seed_value() {
    let (changes, on_change) = recorder();
    let widget = Autocomplete::new(
        AutocompleteConfig::default().with_value("USD"),
        CurrencySource::default(),
    )
    .on_change(on_change);
    assert_eq!(widget.query(), "USD");
    assert!(changes.borrow().is_empty());
}

#[test]
fn test_selection_during_in_flight_lookup_keeps_list_empty() {
    let t0 = Instant::now();
    let (mut widget, lookup) = manual_widget();
    widget.focus(t0);
    widget.input("Lon", t0);
    widget.tick(t0 + ms(500));
    lookup.take("Lon").resolve(strings(&["London, UK"]));
    widget.pump();

    widget.input("Lond", t0 + ms(600));
    widget.tick(t0 + ms(1100));
    widget.select("London, UK", t0 + ms(1150));
    assert!(!widget.is_loading());

    lookup.take("Lond").resolve(strings(&["London, UK", "Londonderry, UK"]));
    widget.tick(t0 + ms(1200));
    assert!(widget.candidates().is_empty());
}

// ============================================
// END TO END
// ============================================

#[test]
fn test_end_to_end_region_selection() {
    let t0 = Instant::now();
    let (changes, on_change) = recorder();
    let mut widget =
        Autocomplete::new(AutocompleteConfig::default(), london_source).on_change(on_change);

    widget.focus(t0);
    widget.input("Lond", t0);
    widget.tick(t0 + ms(500));

    let view = widget.view();
    assert_eq!(view.items().len(), 2);
    for item in view.items() {
        assert_eq!(item.spans[0], Span::matched("Lond"));
    }

    widget.key(NavKey::Down, t0 + ms(600));
    assert!(widget.view().items()[0].selected);
    assert!(widget.key(NavKey::Enter, t0 + ms(600)));

    assert_eq!(widget.query(), "London, UK");
    assert_eq!(widget.view().dropdown, None);
    assert_eq!(changes.borrow().last().map(String::as_str), Some("London, UK"));

    widget.tick(t0 + ms(800));
    assert!(!widget.is_list_visible());
}

#[test]
fn test_end_to_end_currency_without_match() {
    let t0 = Instant::now();
    let mut widget = Autocomplete::new(AutocompleteConfig::default(), CurrencySource::default());
    widget.focus(t0);
    widget.input("xyz123", t0);
    widget.tick(t0 + ms(500));

    assert_eq!(widget.last_fetched_query(), "xyz123");
    assert!(!widget.is_loading());
    assert_eq!(widget.view().dropdown, None);
}

#[test]
fn test_end_to_end_currency_match() {
    let t0 = Instant::now();
    let mut widget = Autocomplete::new(AutocompleteConfig::default(), CurrencySource::default());
    widget.focus(t0);
    widget.input("swiss", t0);
    widget.tick(t0 + ms(500));

    let view = widget.view();
    assert_eq!(view.items().len(), 1);
    assert_eq!(
        view.items()[0].spans,
        vec![
            Span::plain("(CHF) "),
            Span::matched("Swiss"),
            Span::plain(" franc"),
        ]
    );
}
