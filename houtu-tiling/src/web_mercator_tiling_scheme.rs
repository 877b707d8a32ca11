//! The web mercator preset used by most slippy-map imagery servers.

use std::sync::Arc;

use crate::{
    ellipsoid::Ellipsoid, tiling_scheme::TilingSchemeOptions,
    web_mercator_projection::WebMercatorProjection,
};

impl TilingSchemeOptions {
    /// A [`WebMercatorProjection`] over its square domain with a single root tile.
    pub fn web_mercator(ellipsoid: &Ellipsoid) -> Self {
        Self {
            ellipsoid: Arc::new(*ellipsoid),
            projection: Some(Arc::new(WebMercatorProjection::from_ellipsoid(ellipsoid))),
            native_rectangle: None,
            number_of_level_zero_tiles_x: 1,
            number_of_level_zero_tiles_y: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::{
        cartographic::Cartographic,
        error::{ErrorKind, TilingError},
        math::EPSILON10,
        rectangle::Rectangle,
        tile_key::TileKey,
        tiling_scheme::TilingScheme,
    };

    fn scheme() -> TilingScheme {
        TilingScheme::new(TilingSchemeOptions::web_mercator(&Ellipsoid::WGS84)).unwrap()
    }

    #[test]
    fn covers_up_to_the_maximum_latitude() {
        let rectangle = scheme().rectangle();
        let expected = Rectangle::new(
            -PI,
            -WebMercatorProjection::MAXIMUM_LATITUDE,
            PI,
            WebMercatorProjection::MAXIMUM_LATITUDE,
        );
        assert!(rectangle.equals_epsilon(&expected, EPSILON10));
    }

    #[test]
    fn tile_x_y_to_rectangle_returns_full_rectangle_at_root() {
        let scheme = scheme();
        let rectangle = scheme.tile_x_y_to_rectangle(0, 0, 0).unwrap();
        assert!(rectangle.equals_epsilon(&scheme.rectangle(), EPSILON10));
    }

    #[test]
    fn tiles_northwest_corner() {
        let scheme = scheme();
        let northwest = scheme.tile_x_y_to_rectangle(0, 0, 1).unwrap();
        let northeast = scheme.tile_x_y_to_rectangle(1, 0, 1).unwrap();
        let southeast = scheme.tile_x_y_to_rectangle(1, 1, 1).unwrap();
        let southwest = scheme.tile_x_y_to_rectangle(0, 1, 1).unwrap();
        assert_eq!(northeast.north, northwest.north);
        assert_eq!(northeast.south, northwest.south);
        assert_eq!(southeast.north, southwest.north);
        assert_eq!(southeast.south, southwest.south);

        assert_eq!(northwest.west, southwest.west);
        assert_eq!(northwest.east, southwest.east);
        assert_eq!(northeast.west, southeast.west);
        assert_eq!(northeast.east, southeast.east);

        assert!(northeast.north > southeast.north);
        assert!(northwest.south > southwest.south);
        assert!(northeast.east > northwest.east);
        assert!(southeast.west > southwest.west);
    }

    #[test]
    fn position_to_tile_x_y_returns_correct_tile() {
        let scheme = scheme();
        let center_of_southwestern_child = Cartographic::new(-PI / 2.0, -PI / 4.0, 0.0);
        assert_eq!(
            scheme
                .position_to_tile_x_y(&center_of_southwestern_child, 1)
                .unwrap(),
            TileKey::new(0, 1, 1)
        );
        let center_of_northeastern_child = Cartographic::new(PI / 2.0, PI / 4.0, 0.0);
        assert_eq!(
            scheme
                .position_to_tile_x_y(&center_of_northeastern_child, 1)
                .unwrap(),
            TileKey::new(1, 0, 1)
        );
    }

    #[test]
    fn latitudes_beyond_the_square_clamp_to_edge_rows() {
        let scheme = scheme();
        let arctic = Cartographic::from_degrees(10.0, 89.0, 0.0);
        assert_eq!(
            scheme.position_to_tile_x_y(&arctic, 3).unwrap(),
            TileKey::new(4, 0, 3)
        );
        let antarctic = Cartographic::from_degrees(10.0, -89.0, 0.0);
        assert_eq!(
            scheme.position_to_tile_x_y(&antarctic, 3).unwrap(),
            TileKey::new(4, 7, 3)
        );
    }

    #[test]
    fn pole_is_a_numeric_error() {
        let scheme = scheme();
        let error = scheme
            .position_to_tile_x_y(&Cartographic::new(0.0, FRAC_PI_2, 0.0), 2)
            .unwrap_err();
        assert_eq!(error, TilingError::NonFinite { operation: "project" });
        assert_eq!(error.kind(), ErrorKind::Numeric);

        let error = scheme
            .rectangle_to_native_rectangle(&Rectangle::MAX_VALUE)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Numeric);
    }
}
