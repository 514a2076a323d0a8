//! Outbound adapters implementing the domain ports, one module per medium.
//!
//! - **network**: REST API sources over a shared `reqwest` client
//! - **cache**: key-value sources over Redis or an in-process store
//! - **memory**: process-local search memo
//! - **persistence**: SQLite sources through Diesel
//!
//! Adapters translate between wire or row formats and domain types, and
//! classify their errors into [`Failure`](crate::domain::Failure). They hold
//! no orchestration logic.

pub mod cache;
pub mod memory;
pub mod network;
pub mod persistence;
