//! Route handlers.

pub mod public;
