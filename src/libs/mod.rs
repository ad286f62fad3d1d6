pub mod brands;
pub mod config;
pub mod cycle;
pub mod data_storage;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod prescription;
pub mod refresh;
pub mod reminder;
pub mod state;
pub mod store;
pub mod tracker;
pub mod view;
