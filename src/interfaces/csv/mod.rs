//! CSV serialization of query results.

pub mod summary_writer;
