pub mod aggregate;

pub use aggregate::{AssetMetadata, AssetSummary};
