//! Pure data structures: reference entities, orders and the enriched read model.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::*;
pub use order::*;
pub use product::*;
