//! Cart module.
//!
//! Cart membership shared by every surface of the process.

mod entry;
mod store;

pub use entry::CartEntry;
pub use store::{AddOutcome, CartStore};
