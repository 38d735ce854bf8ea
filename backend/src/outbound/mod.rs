//! Outbound adapters implementing the domain's driven ports.
//!
//! Adapters translate between domain types and whatever the host platform
//! stores. They contain no business logic.

pub mod memory;
