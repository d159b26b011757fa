//! Domains module containing business logic organized by bounded contexts.
//!
//! The server currently has a single domain, `tools`: the time filter tools
//! and the pipeline that validates and dispatches calls to them.

pub mod tools;
