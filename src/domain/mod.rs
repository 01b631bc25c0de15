pub mod episode;
pub mod error;
pub mod models;
