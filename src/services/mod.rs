//! Service layer for business logic.
//!
//! Services coordinate persistence and the valuation engine for the CLI and
//! the web server.

pub mod properties;

pub use properties::PropertyStore;
