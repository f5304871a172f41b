//! Inbound adapters translating external requests into validated domain
//! records while keeping framework details at the edge.

pub mod http;
