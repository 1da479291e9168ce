//! Urban Wheel Core - Shared record types.
//!
//! This crate defines the three record kinds the storefront API accepts or
//! returns, together with their validation rules:
//! - [`Product`] - catalog entry, read-only over the API
//! - [`ContactMessage`] - persisted contact form submission
//! - [`CartItem`] - ephemeral cart-add request, never persisted
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. The storefront crate owns persistence and transport.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
