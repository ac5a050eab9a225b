pub mod api;
pub mod browser;
pub mod config;
pub mod data_collector;
pub mod page_source;
pub mod parser;
pub mod schema;
pub mod song_table;
