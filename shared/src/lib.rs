// Data models and parsing helpers shared by the engine and its tests.
pub mod models;
pub mod utils;
