pub mod models;
pub mod repository;
pub mod signing;
pub mod utils;

pub use models::*;
