pub mod cache;
pub mod config;
pub mod hn_client;
pub mod logging;
pub mod models;
pub mod render;
pub mod server;
pub mod stories;

#[cfg(test)]
mod test_support;
