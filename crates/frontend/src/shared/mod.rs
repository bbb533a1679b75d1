pub mod api_utils;
pub mod export;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod number_format;
pub mod scroll_lock;
