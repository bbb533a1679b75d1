pub mod a001_transaction;
pub mod a002_asset;
pub mod common;
