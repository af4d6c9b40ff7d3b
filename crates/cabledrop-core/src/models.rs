pub mod asset;
pub mod dataset;
pub mod drop;
pub mod geometry;
pub mod region;

pub use asset::{AssetCategory, NamedPoint};
pub use dataset::{DropStats, SiteDataset};
pub use drop::{CableDrop, DropStyle};
pub use geometry::{GeoPoint, LatLon, Ring};
pub use region::Region;
