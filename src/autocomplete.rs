//! Autocomplete controller
//!
//! Owns the interaction state of one search field: query text, debounce
//! timer, in-flight lookup, selection cursor and list visibility.
//!
//! The controller is headless and never blocks. Every event handler takes the
//! current time; deferred work (debounce expiry, close grace) runs from
//! [`Autocomplete::tick`], and lookup answers are applied from
//! [`Autocomplete::pump`]. A host loop typically looks like:
//!
//! ```rust,ignore
//! let mut widget = Autocomplete::new(config, CurrencySource::default())
//!     .on_change(|value| println!("changed: {value}"));
//!
//! widget.focus(Instant::now());
//! widget.input("dollar", Instant::now());
//! loop {
//!     if let Some(at) = widget.next_deadline() {
//!         sleep_until(at);
//!     }
//!     widget.tick(Instant::now());
//!     render(&widget.view());
//! }
//! ```
//!
//! # Staleness
//!
//! Every dispatched lookup carries a [`FetchTicket`] with a monotonically
//! increasing generation. Only the ticket of the most recent dispatch may
//! change the candidate list; answers for superseded dispatches are dropped on
//! arrival. Clearing the query or committing a selection also invalidates the
//! in-flight lookup.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::AutocompleteConfig;
use crate::error::ResultExt;
use crate::list_item::{ItemEvent, SuggestionItem};
use crate::lookup::{
    settlement_channel, FetchTicket, LoadData, Responder, Settlement, SettlementReceiver,
    SettlementSender,
};
use crate::render::{Dropdown, InputView, View};
use crate::timer::DeadlineSlot;

/// Callback invoked with the query after every change.
pub type ChangeCallback = Box<dyn FnMut(&str)>;

/// Keyboard input understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Escape,
}

impl NavKey {
    /// Map a key name ("ArrowUp", "up", "Enter", ...) to a navigation key.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "arrowup" | "up" => Some(Self::Up),
            "arrowdown" | "down" => Some(Self::Down),
            "enter" | "return" => Some(Self::Enter),
            "escape" | "esc" => Some(Self::Escape),
            _ => None,
        }
    }
}

pub struct Autocomplete {
    config: AutocompleteConfig,
    loader: Arc<dyn LoadData>,
    on_change: Option<ChangeCallback>,

    /// Current text of the field
    query: String,
    /// Query whose results `candidates` holds; empty when none applies
    last_fetched_query: String,
    /// Suggestions in source order
    candidates: Vec<String>,
    /// Keyboard cursor into `candidates`
    cursor: Option<usize>,
    list_visible: bool,
    loading: bool,

    debounce: DeadlineSlot,
    close_grace: DeadlineSlot,

    /// Generation of the most recent dispatch
    generation: u64,
    /// Ticket whose answer may still be applied
    in_flight: Option<FetchTicket>,
    settle_tx: SettlementSender,
    settle_rx: SettlementReceiver,
}

impl Autocomplete {
    pub fn new(config: AutocompleteConfig, loader: impl LoadData + 'static) -> Self {
        Self::with_shared_loader(config, Arc::new(loader))
    }

    /// Build a controller around a data source shared with other widgets.
    pub fn with_shared_loader(config: AutocompleteConfig, loader: Arc<dyn LoadData>) -> Self {
        let (settle_tx, settle_rx) = settlement_channel();
        let query = config.value.clone().unwrap_or_default();
        Self {
            config,
            loader,
            on_change: None,
            query,
            last_fetched_query: String::new(),
            candidates: Vec::new(),
            cursor: None,
            list_visible: false,
            loading: false,
            debounce: DeadlineSlot::new(),
            close_grace: DeadlineSlot::new(),
            generation: 0,
            in_flight: None,
            settle_tx,
            settle_rx,
        }
    }

    /// Register the change callback.
    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    // === Getters ===

    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn last_fetched_query(&self) -> &str {
        &self.last_fetched_query
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Cursor target, if any.
    pub fn selected_candidate(&self) -> Option<&str> {
        self.cursor
            .and_then(|i| self.candidates.get(i))
            .map(String::as_str)
    }

    pub fn is_list_visible(&self) -> bool {
        self.list_visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether any timer is armed or a lookup is outstanding.
    pub fn is_busy(&self) -> bool {
        self.debounce.is_armed() || self.close_grace.is_armed() || self.in_flight.is_some()
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.debounce.deadline(), self.close_grace.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Receiver of lookup answers, for hosts that want to block or await on
    /// them and pass each to [`Autocomplete::apply_settlement`].
    pub fn settlements(&self) -> SettlementReceiver {
        self.settle_rx.clone()
    }

    // === Events ===

    /// The field gained focus.
    pub fn focus(&mut self, now: Instant) {
        self.close_grace.cancel();
        self.open_list();
        if !self.query.is_empty() && self.query != self.last_fetched_query {
            self.debounce.arm(now, self.config.debounce());
        }
    }

    /// The field lost focus. The list hides after the close grace period.
    pub fn blur(&mut self, now: Instant) {
        self.schedule_close(now);
    }

    /// The text of the field changed.
    pub fn input(&mut self, text: &str, now: Instant) {
        self.set_query(text);
        self.last_fetched_query.clear();
        self.close_grace.cancel();
        self.open_list();

        if self.query.is_empty() {
            self.debounce.cancel();
            self.invalidate_in_flight();
            self.candidates.clear();
            self.cursor = None;
            return;
        }

        self.debounce.arm(now, self.config.debounce());
    }

    /// Handle a navigation key. Returns true if the key was consumed.
    pub fn key(&mut self, key: NavKey, now: Instant) -> bool {
        if !self.list_visible {
            return false;
        }

        match key {
            NavKey::Up => {
                self.cursor = self.cursor.and_then(|i| i.checked_sub(1));
                true
            }
            NavKey::Down => {
                if let Some(last) = self.candidates.len().checked_sub(1) {
                    self.cursor = Some(self.cursor.map_or(0, |i| (i + 1).min(last)));
                }
                true
            }
            NavKey::Enter => match self.selected_candidate().map(str::to_string) {
                Some(value) => {
                    self.select(&value, now);
                    true
                }
                None => false,
            },
            NavKey::Escape => {
                self.dismiss(now);
                true
            }
        }
    }

    /// A list item was activated.
    pub fn handle_item_event(&mut self, event: ItemEvent, now: Instant) {
        match event {
            ItemEvent::Selected(value) => self.select(&value, now),
        }
    }

    /// Commit `value` as the query and close the list.
    pub fn select(&mut self, value: &str, now: Instant) {
        info!(event_type = "autocomplete_select", value, "Suggestion selected");
        self.set_query(value);
        self.cursor = None;
        self.candidates.clear();
        self.debounce.cancel();
        self.invalidate_in_flight();
        self.schedule_close(now);
    }

    /// Close the list without committing.
    pub fn dismiss(&mut self, now: Instant) {
        self.schedule_close(now);
    }

    /// Run every timer whose deadline has passed, in deadline order, then
    /// apply any lookup answers that have arrived.
    pub fn tick(&mut self, now: Instant) {
        self.pump();
        loop {
            let close_due = self.close_grace.deadline().filter(|at| *at <= now);
            let debounce_due = self.debounce.deadline().filter(|at| *at <= now);
            match (close_due, debounce_due) {
                (None, None) => break,
                (Some(close_at), Some(debounce_at)) if debounce_at < close_at => {
                    self.fire_debounce(now)
                }
                (Some(_), _) => self.fire_close(now),
                (None, Some(_)) => self.fire_debounce(now),
            }
        }
        self.pump();
    }

    /// Apply every lookup answer waiting in the channel. Returns how many
    /// were applied (stale answers are not counted).
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(settlement) = self.settle_rx.try_recv() {
            if self.apply_settlement(settlement) {
                applied += 1;
            }
        }
        applied
    }

    /// Apply one lookup answer if it belongs to the most recent dispatch.
    pub fn apply_settlement(&mut self, settlement: Settlement) -> bool {
        let Settlement { ticket, outcome } = settlement;

        if self.in_flight.as_ref() != Some(&ticket) {
            debug!(
                generation = ticket.generation,
                latest = self.generation,
                query = %ticket.query,
                "Discarding stale lookup result"
            );
            return false;
        }
        self.in_flight = None;

        // A failed lookup shows no suggestions
        self.candidates = outcome.warn_on_err("Lookup").unwrap_or_default();
        debug!(
            query = %ticket.query,
            generation = ticket.generation,
            count = self.candidates.len(),
            "Lookup settled"
        );
        self.last_fetched_query = ticket.query;
        self.loading = false;
        self.cursor = None;
        true
    }

    // === Rendering ===

    /// Snapshot of what the widget shows.
    pub fn view(&self) -> View {
        let input = InputView {
            value: self.query.clone(),
            placeholder: self.config.placeholder.clone(),
            class_name: self.config.class_name.clone(),
        };

        let dropdown = (self.list_visible && (self.loading || !self.candidates.is_empty())).then(|| {
            Dropdown {
                loading: self.loading,
                items: self
                    .candidates
                    .iter()
                    .enumerate()
                    .map(|(i, c)| SuggestionItem::new(c, &self.query, self.cursor == Some(i)))
                    .collect(),
            }
        });

        View { input, dropdown }
    }

    // === Internals ===

    fn set_query(&mut self, value: &str) {
        if self.query == value {
            return;
        }
        self.query = value.to_string();
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.query);
        }
    }

    fn open_list(&mut self) {
        self.list_visible = true;
    }

    fn schedule_close(&mut self, now: Instant) {
        self.close_grace.arm(now, self.config.close_delay());
    }

    fn fire_close(&mut self, now: Instant) {
        if self.close_grace.take_due(now) {
            debug!("Closing suggestion list");
            self.list_visible = false;
            self.cursor = None;
        }
    }

    fn fire_debounce(&mut self, now: Instant) {
        if self.debounce.take_due(now) {
            self.dispatch_if_needed();
        }
    }

    fn dispatch_if_needed(&mut self) {
        if !self.list_visible || self.query.is_empty() || self.query == self.last_fetched_query {
            return;
        }

        self.generation += 1;
        let ticket = FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
        };
        self.in_flight = Some(ticket.clone());
        self.loading = true;

        info!(
            event_type = "autocomplete_lookup",
            query = %ticket.query,
            generation = ticket.generation,
            "Dispatching lookup"
        );
        let responder = Responder::new(ticket, self.settle_tx.clone());
        let loader = Arc::clone(&self.loader);
        loader.load(&self.query, responder);

        // Synchronous sources have already answered
        self.pump();
    }

    fn invalidate_in_flight(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            debug!(
                generation = ticket.generation,
                query = %ticket.query,
                "Invalidating in-flight lookup"
            );
        }
        self.loading = false;
    }
}

impl std::fmt::Debug for Autocomplete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autocomplete")
            .field("query", &self.query)
            .field("last_fetched_query", &self.last_fetched_query)
            .field("candidates", &self.candidates)
            .field("cursor", &self.cursor)
            .field("list_visible", &self.list_visible)
            .field("loading", &self.loading)
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
#[path = "autocomplete_tests.rs"]
mod tests;
