pub mod omdb;
pub mod store;
