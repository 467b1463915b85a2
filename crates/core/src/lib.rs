//! Domain layer for the BancaDati tender service.
//!
//! Holds the OCDS-style tender model and the pure query logic (filtering,
//! ordering, pagination, filter-option enumeration) shared by every tender
//! store. Nothing in here performs I/O.

pub mod error;
pub mod filter;
pub mod filter_options;
pub mod mock;
pub mod pagination;
pub mod tender;
pub mod types;

#[cfg(test)]
mod test_support;
