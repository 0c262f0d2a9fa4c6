pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod controls;
pub mod output;
pub mod stats;
pub mod utils;

#[cfg(test)]
mod tests;
