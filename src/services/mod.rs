//! Core read-query and aggregation logic over the measures dataset.
//!
//! Every function here is a pure read: it takes an explicit database handle,
//! issues parameterized queries, and propagates `DbErr` unchanged. Empty
//! results are values, never errors. Authorization happens at the HTTP
//! boundary before these are called.

pub mod daily;
pub mod latest;
pub mod query;
