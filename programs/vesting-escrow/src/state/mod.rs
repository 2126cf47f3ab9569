pub mod adapter;
pub mod escrow;
pub mod factory;

pub use adapter::*;
pub use escrow::*;
pub use factory::*;
