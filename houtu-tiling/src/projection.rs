use std::fmt::Debug;

use bevy::math::DVec3;

use crate::{cartographic::Cartographic, ellipsoid::Ellipsoid, rectangle::Rectangle};

/// Converts geodetic positions to and from the planar coordinates of a tiling scheme.
///
/// Native `x` and `y` are carried in the returned vector's `x` and `y`; height passes
/// through unchanged in `z`. `project` and `un_project` must be inverses of each other up to
/// floating point rounding. Implementations do not clamp: a position the projection cannot
/// represent yields a non-finite component, which callers are expected to report.
pub trait Projection: Debug + Send + Sync {
    fn ellipsoid(&self) -> &Ellipsoid;
    fn project(&self, cartographic: &Cartographic) -> DVec3;
    fn un_project(&self, vec: &DVec3) -> Cartographic;
    /// The full valid extent of the projection in native coordinates.
    fn native_domain(&self) -> Rectangle;
}
