//! Row structs read from the relational schema.
//!
//! These mirror query result shapes, not tables; [`crate::mapper`] folds
//! them into the nested tender model.

pub mod tender_row;
