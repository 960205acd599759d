//! Generic document store adapter.
//!
//! This module provides the building blocks for persisting entities in a
//! document database, independent of any one driver's query DSL.
//!
//! # Main Components
//!
//! - [`Document`] - Trait that persisted types implement
//! - [`DocumentStore`] - Generic CRUD access to named collections
//! - [`Filter`] / [`UpdateOp`] - Store-neutral query and update values
//! - [`TransactionResult`] - Outcome of a write
//! - [`MongoStore`] / [`InMemoryStore`] - Concrete stores
//!
//! # Testing
//!
//! See [`mock`] module for a store double with queued expectations.

pub mod core;
pub mod filter;
pub mod memory;
pub mod mock;
pub mod mongo;
pub mod transaction;

pub use self::core::*;
pub use filter::{Filter, UpdateOp};
pub use memory::InMemoryStore;
pub use mongo::MongoStore;
pub use transaction::{TransactionResult, TransactionResultView};
