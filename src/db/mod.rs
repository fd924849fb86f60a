//! Database module: row models and SQL repositories.
//!
//! This module is split into two submodules:
//! - `model`: row/view models returned by repositories and insert inputs.
//! - `repo`: SQL-only functions, including the composed listing query.
//!
//! External modules should import from `bankfeed::db`; the repository API and
//! commonly used models are re-exported here.

pub mod model;
pub mod repo;

pub use repo::*;

pub use model::{
    NewAccount, NewMatchedTransaction, NewRecognizedTransaction, NewUncategorizedTransaction,
    SummaryCounts, UncategorizedRow,
};
