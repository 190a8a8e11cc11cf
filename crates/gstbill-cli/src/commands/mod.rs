pub mod batch;
pub mod compute;
pub mod config;
pub mod list;
pub mod number;
pub mod states;
pub mod words;
