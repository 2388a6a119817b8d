//! Network sinks.

pub mod udp;
