//! Outbound adapters backing the domain ports with real infrastructure.

pub mod persistence;
