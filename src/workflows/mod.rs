pub mod fetcher;
pub mod normalizer;
pub mod renamer;
pub mod scaffold;
pub mod status;
