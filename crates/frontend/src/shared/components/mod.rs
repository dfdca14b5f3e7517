pub mod date_range_picker;
pub mod error_banner;
pub mod filter_panel;
pub mod loading;
pub mod page_header;
pub mod stat_card;
