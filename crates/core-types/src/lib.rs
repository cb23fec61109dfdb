// In crates/core-types/src/lib.rs

pub mod error;
pub mod types;
pub mod validation;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use types::{
    Mode, OrderPrice, OrderRequest, OrderResponse, OrderStatus, OrderType, Side, Symbol,
    TimeInForce,
};
pub use validation::{validate_price, validate_quantity, validate_side, validate_symbol};
