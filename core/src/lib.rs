//! Client core for the inventory product screens.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the in-memory
//! product collection in sync with what the server acknowledges.
//!
//! # Design
//! - `ProductClient` is stateless; it holds only `base_url`.
//! - `ProductListView` owns the only mutable product collection and drives
//!   list-on-mount and confirmed delete through explicit request/finish steps.
//! - `Transport` and `Confirm` are the two seams a host implements.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod format;
pub mod http;
pub mod route;
pub mod types;
pub mod view;

pub use client::ProductClient;
pub use error::ApiError;
pub use format::format_creation_time;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use route::Route;
pub use types::{CreateProduct, CreationTime, Product, ProductId, UpdateProduct};
pub use view::{Confirm, DeleteOutcome, LoadState, Notice, PendingDelete, ProductListView, ProductRow};
