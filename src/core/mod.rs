pub mod controller;
pub mod reader;
pub mod transcript;
pub mod utils;
