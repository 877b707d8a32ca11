//! The geographic preset: longitude and latitude map directly to native X and Y.

use std::sync::Arc;

use crate::{
    ellipsoid::Ellipsoid, geographic_projection::GeographicProjection,
    tiling_scheme::TilingSchemeOptions,
};

impl TilingSchemeOptions {
    /// A [`GeographicProjection`] over the whole globe with two root tiles, west and east.
    pub fn geographic(ellipsoid: &Ellipsoid) -> Self {
        Self {
            ellipsoid: Arc::new(*ellipsoid),
            projection: Some(Arc::new(GeographicProjection::from_ellipsoid(ellipsoid))),
            native_rectangle: None,
            number_of_level_zero_tiles_x: 2,
            number_of_level_zero_tiles_y: 1,
        }
    }
}
