// Thin re-export module: the store owns the height -> hash pins, the gate
// answers acceptance questions against a borrowed store.

pub mod gate;
pub mod store;

pub use gate::*;
pub use store::*;
