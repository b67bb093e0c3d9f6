mod customer;
mod money;

pub use customer::*;
pub use money::*;
