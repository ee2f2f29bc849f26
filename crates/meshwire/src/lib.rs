//! Top-level facade crate for meshwire.
//!
//! Re-exports the serialization core and the built-in item families so
//! users can depend on a single crate.

pub mod core {
    pub use meshwire_core::*;
}

pub mod items {
    pub use meshwire_items::*;
}
