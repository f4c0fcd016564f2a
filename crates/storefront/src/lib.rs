//! Headless Woo Storefront library.
//!
//! This crate provides the checkout endpoint and confirmation page as a
//! library, allowing them to be tested in-process and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod woocommerce;

#[cfg(test)]
mod test_support;
