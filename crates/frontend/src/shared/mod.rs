pub mod api_client;
pub mod charts;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod errors;
pub mod fetch_state;
pub mod format;
pub mod icons;
pub mod page_frame;
pub mod validators;
