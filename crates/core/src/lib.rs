//! Headless Woo Core - Shared checkout types.
//!
//! This crate provides the types used by the storefront when talking about
//! carts and orders:
//! - `storefront` - Public-facing checkout endpoint and confirmation page
//! - `integration-tests` - Tests against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP
//! clients. WooCommerce stays the source of truth for orders; these types
//! describe what the storefront sends and reads back.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, order statuses, and the cart submission

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
