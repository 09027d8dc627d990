//! CLI module graph.

pub mod command;
pub mod compare;
pub mod config;
pub mod dispatch;
pub mod output;
pub mod quote;
pub mod tune;
