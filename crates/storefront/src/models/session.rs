//! Session-related types.
//!
//! The storefront keeps no cart of its own; these keys are the contract with
//! whatever cart UI runs alongside the checkout.

/// Session keys for checkout state.
pub mod keys {
    /// Key for the visitor's in-progress cart.
    pub const CART: &str = "cart";

    /// Key for the last order created by this visitor that still awaits payment.
    pub const PENDING_ORDER_ID: &str = "pending_order_id";
}
