pub mod aggregate;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod feed;
pub mod http_client;
pub mod palette;
pub mod panel;
pub mod selection;
pub mod state;
