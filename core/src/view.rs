//! In-memory product collection and the confirmed-delete workflow.
//!
//! # Design
//! `ProductListView` is a sans-IO state machine. Each network step is split
//! into a method that hands the host an `HttpRequest` and a `finish_*`
//! method that takes the outcome back, so a host may suspend between them
//! on whatever event loop it runs. The confirmation prompt is a value too:
//! `request_delete` returns a `PendingDelete` and nothing is sent until the
//! host resolves it with the user's answer.
//!
//! `products` only changes in two places: wholesale replacement after a
//! successful load, and single-row removal after an acknowledged delete.

use std::collections::HashSet;
use std::fmt::{self, Display};

use chrono::TimeZone;
use tracing::{debug, warn};

use crate::client::ProductClient;
use crate::error::ApiError;
use crate::format::format_creation_time;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Product, ProductId};

/// Text of the confirmation prompt shown before any delete.
pub const DELETE_PROMPT: &str = "Are you sure to delete this record?";

/// Progress of the one list load performed per mount.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    LoadFailed(ApiError),
}

/// A delete waiting on the user's answer. Only the view creates these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    id: ProductId,
}

impl PendingDelete {
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn prompt(&self) -> &'static str {
        DELETE_PROMPT
    }
}

/// User-visible failure signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    LoadFailed(ApiError),
    DeleteFailed { id: ProductId, error: ApiError },
}

impl Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LoadFailed(error) => write!(f, "could not load products: {error}"),
            Notice::DeleteFailed { id, error } => {
                write!(f, "could not delete product {id}: {error}")
            }
        }
    }
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub creation_time: String,
    /// False while a delete for this row is in flight.
    pub delete_enabled: bool,
}

/// How a `delete_with` call ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    /// No such row, the list is not loaded, or a delete is already in flight.
    Unavailable,
}

/// Answers the confirmation prompt for blocking hosts.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<C: Confirm + ?Sized> Confirm for &mut C {
    fn confirm(&mut self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }
}

#[derive(Debug)]
pub struct ProductListView {
    client: ProductClient,
    products: Vec<Product>,
    load_state: LoadState,
    in_flight: HashSet<ProductId>,
    notice: Option<Notice>,
}

impl ProductListView {
    pub fn new(client: ProductClient) -> Self {
        Self {
            client,
            products: Vec::new(),
            load_state: LoadState::Idle,
            in_flight: HashSet::new(),
            notice: None,
        }
    }

    pub fn client(&self) -> &ProductClient {
        &self.client
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Start a fresh load. Any previously held rows are dropped.
    pub fn mount(&mut self) -> HttpRequest {
        debug!(from = ?self.load_state, "mounting product list");
        self.products.clear();
        self.in_flight.clear();
        self.notice = None;
        self.load_state = LoadState::Loading;
        self.client.build_list_products()
    }

    /// Apply the outcome of the request returned by `mount`.
    ///
    /// An outcome arriving outside `Loading` is stale and ignored.
    pub fn finish_load(&mut self, outcome: Result<HttpResponse, ApiError>) -> Result<(), ApiError> {
        if self.load_state != LoadState::Loading {
            debug!(state = ?self.load_state, "ignoring stale list response");
            return Ok(());
        }

        match outcome.and_then(|response| self.client.parse_list_products(response)) {
            Ok(products) => {
                debug!(count = products.len(), "product list loaded");
                self.products = products;
                self.load_state = LoadState::Loaded;
                Ok(())
            }
            Err(error) => {
                warn!(%error, "product list load failed");
                self.load_state = LoadState::LoadFailed(error.clone());
                self.notice = Some(Notice::LoadFailed(error.clone()));
                Err(error)
            }
        }
    }

    /// Ask to delete `id`. Returns the prompt to show, or `None` when the row
    /// has no active delete control.
    pub fn request_delete(&self, id: &ProductId) -> Option<PendingDelete> {
        if self.load_state != LoadState::Loaded
            || self.in_flight.contains(id)
            || !self.products.iter().any(|p| &p.id == id)
        {
            return None;
        }
        Some(PendingDelete { id: id.clone() })
    }

    /// Id of the loaded row whose displayed id is `typed`.
    ///
    /// Integer `42` and string `"42"` both display as `42`, so typed input is
    /// matched against the rows rather than parsed into a `ProductId`.
    pub fn find_id(&self, typed: &str) -> Option<ProductId> {
        let typed = typed.trim();
        self.products
            .iter()
            .find(|p| p.id.to_string() == typed)
            .map(|p| p.id.clone())
    }

    /// Resolve a prompt. A declined prompt changes nothing and sends nothing.
    pub fn resolve_delete(&mut self, pending: PendingDelete, confirmed: bool) -> Option<HttpRequest> {
        if !confirmed {
            debug!(id = %pending.id, "delete declined");
            return None;
        }
        if !self.in_flight.insert(pending.id.clone()) {
            debug!(id = %pending.id, "delete already in flight");
            return None;
        }
        debug!(id = %pending.id, "delete confirmed");
        Some(self.client.build_delete_product(&pending.id))
    }

    /// Apply the outcome of a confirmed delete. The row is removed only when
    /// the server acknowledged the delete. Outcomes for ids that
    /// `resolve_delete` did not send (or that a remount discarded) are ignored.
    pub fn finish_delete(
        &mut self,
        id: &ProductId,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<(), ApiError> {
        if !self.in_flight.remove(id) {
            debug!(%id, "ignoring delete outcome that was never confirmed");
            return Ok(());
        }

        match outcome.and_then(|response| self.client.parse_delete_product(response)) {
            Ok(()) => {
                if let Some(pos) = self.products.iter().position(|p| &p.id == id) {
                    self.products.remove(pos);
                }
                debug!(%id, remaining = self.products.len(), "product removed");
                Ok(())
            }
            Err(error) => {
                warn!(%id, %error, "product delete failed");
                self.notice = Some(Notice::DeleteFailed {
                    id: id.clone(),
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    pub fn rows<Tz>(&self, tz: &Tz) -> Vec<ProductRow>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.products
            .iter()
            .map(|p| ProductRow {
                id: p.id.clone(),
                name: p.name.clone(),
                price: p.price,
                quantity: p.quantity,
                creation_time: format_creation_time(&p.creation_time, tz),
                delete_enabled: !self.in_flight.contains(&p.id),
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Blocking drivers
    // -----------------------------------------------------------------------

    pub fn load_with(&mut self, transport: &mut impl Transport) -> Result<(), ApiError> {
        let request = self.mount();
        let outcome = transport.execute(&request);
        self.finish_load(outcome)
    }

    pub fn delete_with(
        &mut self,
        id: &ProductId,
        transport: &mut impl Transport,
        confirm: &mut impl Confirm,
    ) -> Result<DeleteOutcome, ApiError> {
        let Some(pending) = self.request_delete(id) else {
            return Ok(DeleteOutcome::Unavailable);
        };
        let confirmed = confirm.confirm(pending.prompt());
        let Some(request) = self.resolve_delete(pending, confirmed) else {
            return Ok(if confirmed {
                DeleteOutcome::Unavailable
            } else {
                DeleteOutcome::Declined
            });
        };
        let outcome = transport.execute(&request);
        self.finish_delete(id, outcome)?;
        Ok(DeleteOutcome::Deleted)
    }
}
