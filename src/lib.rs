pub mod aggregate;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod http_client;
pub mod matcher;
pub mod model;
pub mod render;
pub mod report;
