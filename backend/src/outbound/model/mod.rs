//! Shelf-life model adapters.

mod lookup;

pub use lookup::{LookupModelError, LookupShelfLifeModel};
