//! Collaborator traits for the assistant engine
//!
//! The engine consumes these interfaces and never implements storage or
//! network access itself. This enables:
//! - Pluggable backends (swap implementations without code changes)
//! - Testing with mocks
//!
//! # Trait Hierarchy
//!
//! ```text
//! Catalog:
//!   - ProductCatalog: product lookups for display alongside replies
//!   - UserHistory: browsing categories for returning users
//!
//! Responder:
//!   - ResponderBackend: optional external LLM completion
//! ```

mod catalog;
mod responder;

pub use catalog::{ProductCatalog, UserHistory, Product, ProductFilter};
pub use responder::{ResponderBackend, CompletionOptions};
