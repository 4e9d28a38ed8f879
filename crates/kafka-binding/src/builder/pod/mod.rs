pub mod env;
pub mod volume;
