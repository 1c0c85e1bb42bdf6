//! Inbound adapters translating external requests into domain service calls.
//!
//! Only the HTTP transport exists today; it lives under [`http`].

pub mod http;
