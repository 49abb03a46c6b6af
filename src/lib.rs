pub mod cache;
pub mod download;
pub mod fetch;
pub mod http;
pub mod runtime;
pub mod target;
