pub mod app;
pub mod config;
pub mod crop;
pub mod data_url;
pub mod download;
pub mod error;
pub mod gemini;
pub mod install;
pub mod prompts;
pub mod session;
