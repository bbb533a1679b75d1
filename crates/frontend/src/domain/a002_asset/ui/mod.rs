pub mod logo;
