//! Quadtree tiling of an ellipsoid: converting between tile addresses, native projected
//! rectangles and geodetic rectangles.

mod cartographic;
mod config;
mod ellipsoid;
mod ellipsoidal_occluder;
mod error;
mod geographic_projection;
mod geographic_tiling_scheme;
mod intersect;
pub mod math;
mod plugin;
mod projection;
mod rectangle;
mod tile_key;
mod tiling_scheme;
mod web_mercator_projection;
mod web_mercator_tiling_scheme;

pub use cartographic::*;
pub use config::*;
pub use ellipsoid::*;
pub use ellipsoidal_occluder::*;
pub use error::*;
pub use geographic_projection::*;
pub use intersect::*;
pub use plugin::*;
pub use projection::*;
pub use rectangle::*;
pub use tile_key::*;
pub use tiling_scheme::*;
pub use web_mercator_projection::*;
