pub mod logo;
pub mod ui;
