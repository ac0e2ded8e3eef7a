//! Repository layer: entity-scoped database operations.

mod alert;
mod encounter;

pub use alert::*;
pub use encounter::*;
