pub mod analysis;
pub mod auth;
pub mod config;
pub mod consts;
pub mod error;
pub mod logging;
pub mod parse;
pub mod prompts;
pub mod provider;
pub mod recommend;
pub mod server;
