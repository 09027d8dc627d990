//! Outbound ports: interfaces the application calls out through.

pub mod observer;
