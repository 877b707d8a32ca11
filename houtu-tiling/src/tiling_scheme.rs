use std::sync::Arc;

use bevy::{
    log::{debug, warn},
    math::DVec3,
    prelude::Resource,
};

use crate::{
    cartographic::Cartographic,
    ellipsoid::Ellipsoid,
    error::TilingError,
    projection::Projection,
    rectangle::Rectangle,
    tile_key::TileKey,
};

/// Everything needed to build a [`TilingScheme`].
///
/// `native_rectangle` defaults to the projection's full native domain.
#[derive(Debug, Clone)]
pub struct TilingSchemeOptions {
    pub ellipsoid: Arc<Ellipsoid>,
    pub projection: Option<Arc<dyn Projection>>,
    pub native_rectangle: Option<Rectangle>,
    pub number_of_level_zero_tiles_x: u32,
    pub number_of_level_zero_tiles_y: u32,
}
impl Default for TilingSchemeOptions {
    fn default() -> Self {
        TilingSchemeOptions::geographic(&Ellipsoid::WGS84)
    }
}
impl TilingSchemeOptions {
    pub fn new(ellipsoid: &Ellipsoid, projection: Arc<dyn Projection>) -> Self {
        Self {
            ellipsoid: Arc::new(*ellipsoid),
            projection: Some(projection),
            native_rectangle: None,
            number_of_level_zero_tiles_x: 1,
            number_of_level_zero_tiles_y: 1,
        }
    }
    pub fn with_native_rectangle(mut self, native_rectangle: Rectangle) -> Self {
        self.native_rectangle = Some(native_rectangle);
        self
    }
    /// Covers `rectangle`, given in geodetic radians, by projecting its corners.
    pub fn with_rectangle(mut self, rectangle: &Rectangle) -> Result<Self, TilingError> {
        let projection = self.projection.as_ref().ok_or_else(|| {
            TilingError::Configuration("a projection is required to cover a rectangle".into())
        })?;
        self.native_rectangle = Some(project_rectangle(projection.as_ref(), rectangle)?);
        Ok(self)
    }
    pub fn with_level_zero_tiles(mut self, x: u32, y: u32) -> Self {
        self.number_of_level_zero_tiles_x = x;
        self.number_of_level_zero_tiles_y = y;
        self
    }
}

/// A tiling scheme for geometry or imagery on the surface of an ellipsoid.
///
/// At level-of-detail zero, the coarsest, least-detailed level, the number of tiles is
/// configurable. At each following level every tile has four children, two in each
/// direction. Tile `x` counts columns eastward from the west edge of the covering
/// rectangle and tile `y` counts rows southward from its north edge.
///
/// The scheme is immutable; clones share the same ellipsoid and projection.
#[derive(Debug, Clone, Resource)]
pub struct TilingScheme {
    ellipsoid: Arc<Ellipsoid>,
    projection: Arc<dyn Projection>,
    native_rectangle: Rectangle,
    rectangle: Rectangle,
    number_of_level_zero_tiles_x: u32,
    number_of_level_zero_tiles_y: u32,
}
impl TilingScheme {
    pub fn new(options: TilingSchemeOptions) -> Result<Self, TilingError> {
        let scheme = TilingScheme::validate(options);
        match &scheme {
            Ok(scheme) => debug!(
                "tiling scheme over {:?} with {}x{} level zero tiles",
                scheme.native_rectangle,
                scheme.number_of_level_zero_tiles_x,
                scheme.number_of_level_zero_tiles_y
            ),
            Err(error) => warn!("rejected tiling scheme: {}", error),
        }
        scheme
    }
    fn validate(options: TilingSchemeOptions) -> Result<Self, TilingError> {
        if options.number_of_level_zero_tiles_x == 0 || options.number_of_level_zero_tiles_y == 0 {
            return Err(TilingError::Configuration(format!(
                "level zero tile counts must be positive, got {}x{}",
                options.number_of_level_zero_tiles_x, options.number_of_level_zero_tiles_y
            )));
        }
        if !options.ellipsoid.is_valid() {
            return Err(TilingError::Configuration(format!(
                "ellipsoid radii {} must be finite and positive",
                options.ellipsoid.radii
            )));
        }
        let projection = options
            .projection
            .ok_or_else(|| TilingError::Configuration("a projection is required".into()))?;
        if projection.ellipsoid() != options.ellipsoid.as_ref() {
            return Err(TilingError::Configuration(
                "the projection was built for a different ellipsoid".into(),
            ));
        }
        let native_rectangle = options
            .native_rectangle
            .unwrap_or_else(|| projection.native_domain());
        if !native_rectangle.is_non_degenerate() {
            return Err(TilingError::Configuration(format!(
                "covering rectangle {:?} is degenerate",
                native_rectangle
            )));
        }
        let rectangle = un_project_rectangle(projection.as_ref(), &native_rectangle)?;
        Ok(Self {
            ellipsoid: options.ellipsoid,
            projection,
            native_rectangle,
            rectangle,
            number_of_level_zero_tiles_x: options.number_of_level_zero_tiles_x,
            number_of_level_zero_tiles_y: options.number_of_level_zero_tiles_y,
        })
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
    pub fn projection(&self) -> &dyn Projection {
        self.projection.as_ref()
    }
    /// The covering rectangle in geodetic radians.
    pub fn rectangle(&self) -> Rectangle {
        self.rectangle
    }
    /// The covering rectangle in native coordinates.
    pub fn native_rectangle(&self) -> Rectangle {
        self.native_rectangle
    }
    pub fn number_of_level_zero_tiles_x(&self) -> u32 {
        self.number_of_level_zero_tiles_x
    }
    pub fn number_of_level_zero_tiles_y(&self) -> u32 {
        self.number_of_level_zero_tiles_y
    }

    /// Gets the total number of tiles in the X direction at a specified level-of-detail.
    pub fn number_of_x_tiles_at_level(&self, level: u32) -> Result<u32, TilingError> {
        tiles_at_level(self.number_of_level_zero_tiles_x, level)
    }
    /// Gets the total number of tiles in the Y direction at a specified level-of-detail.
    pub fn number_of_y_tiles_at_level(&self, level: u32) -> Result<u32, TilingError> {
        tiles_at_level(self.number_of_level_zero_tiles_y, level)
    }
    pub fn number_of_tiles_at_level(&self, level: u32) -> Result<u64, TilingError> {
        let x_tiles = self.number_of_x_tiles_at_level(level)? as u64;
        let y_tiles = self.number_of_y_tiles_at_level(level)? as u64;
        Ok(x_tiles * y_tiles)
    }

    /// Whether `key` addresses a tile of this scheme.
    pub fn contains(&self, key: &TileKey) -> bool {
        match (
            self.number_of_x_tiles_at_level(key.level),
            self.number_of_y_tiles_at_level(key.level),
        ) {
            (Ok(x_tiles), Ok(y_tiles)) => key.x < x_tiles && key.y < y_tiles,
            _ => false,
        }
    }

    /// The level zero tiles, starting in the northwest corner and proceeding east, then south.
    pub fn level_zero_tiles(&self) -> Vec<TileKey> {
        let mut result = Vec::with_capacity(
            self.number_of_level_zero_tiles_x as usize * self.number_of_level_zero_tiles_y as usize,
        );
        for y in 0..self.number_of_level_zero_tiles_y {
            for x in 0..self.number_of_level_zero_tiles_x {
                result.push(TileKey::new(x, y, 0));
            }
        }
        result
    }

    /// Transforms a rectangle in geodetic radians to the native coordinates of this scheme.
    pub fn rectangle_to_native_rectangle(
        &self,
        rectangle: &Rectangle,
    ) -> Result<Rectangle, TilingError> {
        project_rectangle(self.projection.as_ref(), rectangle)
    }

    /// Converts tile x, y coordinates and level to a rectangle in native coordinates.
    ///
    /// Neighbouring tiles share bit-identical edges and the outermost tiles reproduce the
    /// covering rectangle exactly.
    pub fn tile_x_y_to_native_rectangle(
        &self,
        x: u32,
        y: u32,
        level: u32,
    ) -> Result<Rectangle, TilingError> {
        let x_tiles = self.number_of_x_tiles_at_level(level)?;
        let y_tiles = self.number_of_y_tiles_at_level(level)?;
        if x >= x_tiles || y >= y_tiles {
            return Err(TilingError::TileOutOfRange { x, y, level });
        }
        let rectangle = self.native_rectangle;

        let x_tile_width = rectangle.compute_width() / x_tiles as f64;
        let west = x as f64 * x_tile_width + rectangle.west;
        let east = if x + 1 == x_tiles {
            rectangle.east
        } else {
            (x + 1) as f64 * x_tile_width + rectangle.west
        };

        let y_tile_height = rectangle.compute_height() / y_tiles as f64;
        let north = rectangle.north - y as f64 * y_tile_height;
        let south = if y + 1 == y_tiles {
            rectangle.south
        } else {
            rectangle.north - (y + 1) as f64 * y_tile_height
        };
        Ok(Rectangle::new(west, south, east, north))
    }

    /// Converts tile x, y coordinates and level to a cartographic rectangle in radians.
    pub fn tile_x_y_to_rectangle(
        &self,
        x: u32,
        y: u32,
        level: u32,
    ) -> Result<Rectangle, TilingError> {
        let native_rectangle = self.tile_x_y_to_native_rectangle(x, y, level)?;
        un_project_rectangle(self.projection.as_ref(), &native_rectangle)
    }

    pub fn tile_key_to_native_rectangle(&self, key: &TileKey) -> Result<Rectangle, TilingError> {
        self.tile_x_y_to_native_rectangle(key.x, key.y, key.level)
    }
    pub fn tile_key_to_rectangle(&self, key: &TileKey) -> Result<Rectangle, TilingError> {
        self.tile_x_y_to_rectangle(key.x, key.y, key.level)
    }

    /// Calculates the tile containing `position` at `level`.
    ///
    /// Positions on the east or south edge of the covering rectangle belong to the last
    /// column or row. Positions outside the covering rectangle are clamped to the nearest
    /// edge tile.
    pub fn position_to_tile_x_y(
        &self,
        position: &Cartographic,
        level: u32,
    ) -> Result<TileKey, TilingError> {
        let x_tiles = self.number_of_x_tiles_at_level(level)?;
        let y_tiles = self.number_of_y_tiles_at_level(level)?;
        let native = self.projection.project(position);
        if !native.x.is_finite() || !native.y.is_finite() {
            return Err(TilingError::NonFinite {
                operation: "project",
            });
        }
        let rectangle = self.native_rectangle;

        let x_tile_width = rectangle.compute_width() / x_tiles as f64;
        let y_tile_height = rectangle.compute_height() / y_tiles as f64;

        let distance_from_west = native.x - rectangle.west;
        let distance_from_north = rectangle.north - native.y;

        Ok(TileKey::new(
            cell_index(distance_from_west / x_tile_width, x_tiles),
            cell_index(distance_from_north / y_tile_height, y_tiles),
            level,
        ))
    }
}

fn tiles_at_level(level_zero_tiles: u32, level: u32) -> Result<u32, TilingError> {
    1u32.checked_shl(level)
        .and_then(|factor| level_zero_tiles.checked_mul(factor))
        .ok_or(TilingError::LevelOutOfRange { level })
}

fn cell_index(offset: f64, tiles: u32) -> u32 {
    let index = offset.floor();
    if index <= 0.0 {
        0
    } else if index >= tiles as f64 {
        tiles - 1
    } else {
        index as u32
    }
}

fn project_rectangle(
    projection: &dyn Projection,
    rectangle: &Rectangle,
) -> Result<Rectangle, TilingError> {
    if !rectangle.validate() {
        return Err(TilingError::InvalidRectangle(*rectangle));
    }
    let corners = [
        rectangle.south_west(),
        rectangle.north_west(),
        rectangle.south_east(),
        rectangle.north_east(),
    ]
    .map(|corner| projection.project(&corner));
    let native = bounding_rectangle(&corners);
    if !native.is_finite() {
        return Err(TilingError::NonFinite {
            operation: "project",
        });
    }
    Ok(native)
}

fn un_project_rectangle(
    projection: &dyn Projection,
    native_rectangle: &Rectangle,
) -> Result<Rectangle, TilingError> {
    let corners = [
        (native_rectangle.west, native_rectangle.south),
        (native_rectangle.west, native_rectangle.north),
        (native_rectangle.east, native_rectangle.south),
        (native_rectangle.east, native_rectangle.north),
    ]
    .map(|(x, y)| {
        let cartographic = projection.un_project(&DVec3::new(x, y, 0.0));
        DVec3::new(cartographic.longitude, cartographic.latitude, 0.0)
    });
    let rectangle = bounding_rectangle(&corners);
    if !rectangle.is_finite() {
        return Err(TilingError::NonFinite {
            operation: "un_project",
        });
    }
    Ok(rectangle)
}

/// The smallest rectangle holding the `x` and `y` of every point. Any NaN coordinate makes
/// the result non-finite.
fn bounding_rectangle(points: &[DVec3]) -> Rectangle {
    let mut west = f64::INFINITY;
    let mut south = f64::INFINITY;
    let mut east = f64::NEG_INFINITY;
    let mut north = f64::NEG_INFINITY;
    for point in points {
        if point.x.is_nan() || point.y.is_nan() {
            return Rectangle::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        }
        west = west.min(point.x);
        south = south.min(point.y);
        east = east.max(point.x);
        north = north.max(point.y);
    }
    Rectangle::new(west, south, east, north)
}
