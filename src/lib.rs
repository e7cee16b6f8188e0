pub mod app;
pub mod cli;
pub mod config;
pub mod embed;
pub mod filter;
pub mod gallery;
pub mod loader;
pub mod output;
pub mod record;
pub mod runner;
pub mod utils;

#[cfg(test)]
mod tests;
