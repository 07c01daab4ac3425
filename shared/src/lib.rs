// Data models and helpers shared by the engine and the console front-end.
pub mod models;
pub mod utils;
