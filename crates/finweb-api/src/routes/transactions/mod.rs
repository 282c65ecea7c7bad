//! Transaction routes - Add-transaction form, list and create
//!
//! Features:
//! - HTMX form submission with coercion of the raw fields
//! - JSON list of the filtered transactions
//! - JSON create and reload
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints

pub mod api;

pub use api::{api_reload, api_transaction_create, api_transactions, htmx_transaction_store};
