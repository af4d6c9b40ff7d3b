//! Cabledrop Geo - Containment, matching and drop generation
//!
//! This crate is pure and synchronous: it takes parsed regions and points and
//! returns drops. Reading and writing files lives in `cabledrop-core`.

pub mod engine;
pub mod matcher;
pub mod path;
pub mod spatial;
pub mod validation;

pub use engine::{drop_name, DropEngine, DropRun};
pub use matcher::{match_nearest, match_region, MatchedPair};
pub use path::{synthesize, synthesize_named};
pub use spatial::{contains, distance};
