//! Lookup capability consumed by the autocomplete controller.
//!
//! The controller never awaits a lookup directly. Each dispatch hands the
//! data source a [`Responder`] tagged with a [`FetchTicket`]; the source
//! answers whenever it is ready (synchronously or from another thread) and the
//! answer travels back over a channel that the controller drains.
//!
//! # Usage
//!
//! ```rust,ignore
//! // Synchronous source: any `Fn(&str) -> anyhow::Result<Vec<String>>`
//! let source = |q: &str| -> anyhow::Result<Vec<String>> { Ok(filter(q)) };
//!
//! // Blocking source (HTTP etc.) answered from a worker thread
//! impl LoadData for MySource {
//!     fn load(&self, query: &str, responder: Responder) {
//!         spawn_blocking_lookup("my-source", query, responder, fetch);
//!     }
//! }
//! ```

use std::fmt::Display;
use std::thread;

use async_channel::{Receiver, Sender};
use tracing::{debug, warn};

use crate::error::AutocompleteError;

/// Identity of one dispatched fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonic dispatch counter; only the latest generation may apply.
    pub generation: u64,
    /// Query the fetch was dispatched for.
    pub query: String,
}

/// Outcome of a fetch, sent back to the controller.
#[derive(Debug)]
pub struct Settlement {
    pub ticket: FetchTicket,
    pub outcome: Result<Vec<String>, AutocompleteError>,
}

pub type SettlementSender = Sender<Settlement>;
pub type SettlementReceiver = Receiver<Settlement>;

/// Create the channel a controller uses to collect settlements.
pub fn settlement_channel() -> (SettlementSender, SettlementReceiver) {
    async_channel::unbounded()
}

/// One-shot answer handle for a dispatched fetch.
///
/// Dropping a responder without answering settles the fetch as a failure, so
/// a faulty source cannot leave the loading indicator on forever.
pub struct Responder {
    ticket: Option<FetchTicket>,
    tx: SettlementSender,
}

impl Responder {
    pub fn new(ticket: FetchTicket, tx: SettlementSender) -> Self {
        Self {
            ticket: Some(ticket),
            tx,
        }
    }

    pub fn query(&self) -> &str {
        self.ticket.as_ref().map_or("", |t| t.query.as_str())
    }

    pub fn generation(&self) -> u64 {
        self.ticket.as_ref().map_or(0, |t| t.generation)
    }

    pub fn resolve(mut self, candidates: Vec<String>) {
        self.send(Ok(candidates));
    }

    pub fn reject(mut self, message: impl Display) {
        let query = self.query().to_string();
        self.send(Err(AutocompleteError::Lookup {
            query,
            message: message.to_string(),
        }));
    }

    pub fn settle(self, result: anyhow::Result<Vec<String>>) {
        match result {
            Ok(candidates) => self.resolve(candidates),
            Err(e) => self.reject(format!("{:#}", e)),
        }
    }

    fn send(&mut self, outcome: Result<Vec<String>, AutocompleteError>) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };
        let generation = ticket.generation;
        if self.tx.try_send(Settlement { ticket, outcome }).is_err() {
            // Controller is gone; nobody is waiting for this answer
            debug!(generation, "Settlement receiver closed, dropping lookup result");
        }
    }
}

impl Drop for Responder {
    fn drop(&mut self) {
        if let Some(ticket) = &self.ticket {
            let query = ticket.query.clone();
            warn!(query = %query, generation = ticket.generation, "Lookup dropped without answer");
            self.send(Err(AutocompleteError::LookupDropped { query }));
        }
    }
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("ticket", &self.ticket)
            .finish()
    }
}

/// The data-source abstraction: given the query text, eventually answer the
/// responder with an ordered list of candidates or a failure.
pub trait LoadData: Send + Sync {
    fn load(&self, query: &str, responder: Responder);
}

impl<F> LoadData for F
where
    F: Fn(&str) -> anyhow::Result<Vec<String>> + Send + Sync,
{
    fn load(&self, query: &str, responder: Responder) {
        responder.settle(self(query));
    }
}

/// Run a blocking lookup on a worker thread and settle `responder` from there.
pub fn spawn_blocking_lookup<F>(name: &str, query: &str, responder: Responder, lookup: F)
where
    F: FnOnce(String) -> anyhow::Result<Vec<String>> + Send + 'static,
{
    let query = query.to_string();
    let spawned = thread::Builder::new()
        .name(format!("lookup-{}", name))
        .spawn(move || responder.settle(lookup(query)));

    // On spawn failure the closure (and the responder in it) is dropped,
    // which settles the fetch as dropped.
    if let Err(e) = spawned {
        warn!(error = %e, source = name, "Failed to spawn lookup thread");
    }
}
