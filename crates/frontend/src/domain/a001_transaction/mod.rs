pub mod api;
pub mod row;
pub mod ui;
