pub mod ownable;
