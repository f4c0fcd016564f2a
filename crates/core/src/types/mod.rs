//! Core types for Headless Woo.
//!
//! This module provides type-safe wrappers for checkout concepts.

pub mod checkout;
pub mod id;
pub mod status;

pub use checkout::{CartError, CartSubmission, OrderDraft};
pub use id::*;
pub use status::OrderStatus;
