//! Canonical entities shared by every connector

mod inventory;
mod order;
mod robot;
mod store;

pub use inventory::*;
pub use order::*;
pub use robot::*;
pub use store::*;
