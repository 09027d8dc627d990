//! Adapters around the pricing core.

pub mod inbound;
