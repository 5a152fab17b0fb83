//! Top-level facade crate for fbmetrics.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use fbmetrics_core::*;
}

pub mod server {
    pub use fbmetrics_server::*;
}
