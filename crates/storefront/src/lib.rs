//! Urban Wheel storefront library.
//!
//! This crate provides the storefront API as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod fallback;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
