pub mod listing;
pub mod models;

pub use listing::*;
pub use models::*;
