//! Query-state primitives for the employee directory client.
//!
//! This crate owns the structured query a record browser keeps in sync with
//! its address bar: free-text search, a filter dimension, a page number, and
//! a page-local sort selection. It also provides the generic [`Page`]
//! envelope fetched results arrive in. No I/O happens here; the main crate
//! wires these values to the network and to an address-bar collaborator.

pub mod page;
pub mod query;

pub use self::page::{DEFAULT_PAGE_LIMIT, Page};
pub use self::query::{FilterBy, QueryState, SortDirection, SortKey, SortSelection};
