use bevy::math::DVec3;

use crate::{ellipsoid::Ellipsoid, rectangle::Rectangle};

/// Determines whether points are hidden behind the horizon of an ellipsoid centred at the
/// origin, as seen from a camera position.
///
/// Visibility tests run in the ellipsoid's scaled space, where the ellipsoid becomes the unit
/// sphere. See <https://cesium.com/blog/2013/04/25/Horizon-culling/>.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsoidalOccluder {
    ellipsoid: Ellipsoid,
    camera_position: DVec3,
    camera_position_in_scaled_space: DVec3,
    distance_to_limb_in_scaled_space_squared: f64,
}
impl EllipsoidalOccluder {
    pub fn new(ellipsoid: &Ellipsoid, camera_position: DVec3) -> Self {
        let mut occluder = Self {
            ellipsoid: *ellipsoid,
            camera_position: DVec3::ZERO,
            camera_position_in_scaled_space: DVec3::ZERO,
            distance_to_limb_in_scaled_space_squared: 0.0,
        };
        occluder.set_camera_position(camera_position);
        occluder
    }
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
    pub fn camera_position(&self) -> DVec3 {
        self.camera_position
    }
    pub fn set_camera_position(&mut self, camera_position: DVec3) {
        let cv = self
            .ellipsoid
            .transform_position_to_scaled_space(&camera_position);
        self.camera_position = camera_position;
        self.camera_position_in_scaled_space = cv;
        self.distance_to_limb_in_scaled_space_squared = cv.length_squared() - 1.0;
    }

    /// Whether `occludee`, in the ellipsoid's frame, can be seen from the camera.
    pub fn is_point_visible(&self, occludee: &DVec3) -> bool {
        let scaled = self.ellipsoid.transform_position_to_scaled_space(occludee);
        self.is_scaled_space_point_visible(&scaled)
    }
    pub fn is_scaled_space_point_visible(&self, occludee_scaled_space_position: &DVec3) -> bool {
        is_scaled_space_point_visible(
            occludee_scaled_space_position,
            &self.camera_position_in_scaled_space,
            self.distance_to_limb_in_scaled_space_squared,
        )
    }
    /// Like [`Self::is_scaled_space_point_visible`], but tests against the ellipsoid shrunk by
    /// `minimum_height` when that height is negative. The point must be expressed in the
    /// scaled space of the shrunk ellipsoid, as returned by
    /// [`Self::compute_horizon_culling_point_possibly_under_ellipsoid`].
    pub fn is_scaled_space_point_visible_possibly_under_ellipsoid(
        &self,
        occludee_scaled_space_position: &DVec3,
        minimum_height: f64,
    ) -> bool {
        match shrunk_ellipsoid(&self.ellipsoid, minimum_height) {
            Some(shrunk) => {
                let cv = shrunk.transform_position_to_scaled_space(&self.camera_position);
                is_scaled_space_point_visible(
                    occludee_scaled_space_position,
                    &cv,
                    cv.length_squared() - 1.0,
                )
            }
            None => self.is_scaled_space_point_visible(occludee_scaled_space_position),
        }
    }

    /// Computes a point, in scaled space, that lies below the horizon whenever every one of
    /// `positions` does.
    ///
    /// `direction_to_point` need not be normalized; the direction from the ellipsoid centre
    /// to the centre of the positions works well. Returns `None` when there are no positions,
    /// when some position faces away from the direction, or when the result is not finite.
    pub fn compute_horizon_culling_point(
        &self,
        direction_to_point: &DVec3,
        positions: &[DVec3],
    ) -> Option<DVec3> {
        horizon_culling_point(&self.ellipsoid, direction_to_point, positions.iter().copied())
    }
    /// Like [`Self::compute_horizon_culling_point`], for positions that may be as far as
    /// `minimum_height` below the surface.
    pub fn compute_horizon_culling_point_possibly_under_ellipsoid(
        &self,
        direction_to_point: &DVec3,
        positions: &[DVec3],
        minimum_height: f64,
    ) -> Option<DVec3> {
        let ellipsoid = shrunk_ellipsoid(&self.ellipsoid, minimum_height).unwrap_or(self.ellipsoid);
        horizon_culling_point(&ellipsoid, direction_to_point, positions.iter().copied())
    }
    /// Like [`Self::compute_horizon_culling_point`], for packed vertices. Each vertex starts
    /// every `stride` values and is offset by `center`.
    pub fn compute_horizon_culling_point_from_vertices(
        &self,
        direction_to_point: &DVec3,
        vertices: &[f64],
        stride: usize,
        center: &DVec3,
    ) -> Option<DVec3> {
        if stride < 3 {
            return None;
        }
        let positions = vertices
            .chunks(stride)
            .filter(|vertex| vertex.len() >= 3)
            .map(|vertex| DVec3::new(vertex[0], vertex[1], vertex[2]) + *center);
        horizon_culling_point(&self.ellipsoid, direction_to_point, positions)
    }
    /// Computes a horizon culling point for `rectangle` lying on the surface of `ellipsoid`,
    /// which may differ from the occluding ellipsoid.
    ///
    /// Returns `None` when the rectangle is centred too close to the ellipsoid's centre for
    /// horizon culling to be useful.
    pub fn compute_horizon_culling_point_from_rectangle(
        &self,
        rectangle: &Rectangle,
        ellipsoid: &Ellipsoid,
    ) -> Option<DVec3> {
        let positions = rectangle.subsample(ellipsoid, 0.0);
        let (min, max) = positions.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(min, max), position| (min.min(*position), max.max(*position)),
        );
        let center = (min + max) * 0.5;
        if center.length() < 0.1 * ellipsoid.minimum_radius {
            return None;
        }
        self.compute_horizon_culling_point(&center, &positions)
    }
}

/// Normalized `direction_to_point` in the scaled space of `ellipsoid`. The zero vector stays
/// zero.
pub fn compute_scaled_space_direction_to_point(
    ellipsoid: &Ellipsoid,
    direction_to_point: &DVec3,
) -> DVec3 {
    if *direction_to_point == DVec3::ZERO {
        return DVec3::ZERO;
    }
    ellipsoid
        .transform_position_to_scaled_space(direction_to_point)
        .normalize()
}

fn is_scaled_space_point_visible(
    occludee_scaled_space_position: &DVec3,
    camera_position_in_scaled_space: &DVec3,
    distance_to_limb_in_scaled_space_squared: f64,
) -> bool {
    let cv = *camera_position_in_scaled_space;
    let vh_magnitude_squared = distance_to_limb_in_scaled_space_squared;
    let vt = *occludee_scaled_space_position - cv;
    let vt_dot_vc = -vt.dot(cv);
    // Below the surface the culling plane passes through the camera.
    let is_occluded = if vh_magnitude_squared < 0.0 {
        vt_dot_vc > 0.0
    } else {
        vt_dot_vc > vh_magnitude_squared
            && vt_dot_vc * vt_dot_vc / vt.length_squared() > vh_magnitude_squared
    };
    !is_occluded
}

fn shrunk_ellipsoid(ellipsoid: &Ellipsoid, minimum_height: f64) -> Option<Ellipsoid> {
    if minimum_height < 0.0 && ellipsoid.minimum_radius > -minimum_height {
        Some(Ellipsoid::from_vec3(ellipsoid.radii + minimum_height))
    } else {
        None
    }
}

fn horizon_culling_point(
    ellipsoid: &Ellipsoid,
    direction_to_point: &DVec3,
    positions: impl Iterator<Item = DVec3>,
) -> Option<DVec3> {
    let scaled_space_direction_to_point =
        compute_scaled_space_direction_to_point(ellipsoid, direction_to_point);
    let mut result_magnitude: f64 = 0.0;
    for position in positions {
        let candidate_magnitude =
            compute_magnitude(ellipsoid, &position, &scaled_space_direction_to_point);
        if candidate_magnitude < 0.0 {
            return None;
        }
        result_magnitude = result_magnitude.max(candidate_magnitude);
    }
    if result_magnitude <= 0.0 || !result_magnitude.is_finite() {
        return None;
    }
    Some(scaled_space_direction_to_point * result_magnitude)
}

fn compute_magnitude(
    ellipsoid: &Ellipsoid,
    position: &DVec3,
    scaled_space_direction_to_point: &DVec3,
) -> f64 {
    let scaled_space_position = ellipsoid.transform_position_to_scaled_space(position);
    let magnitude_squared = scaled_space_position.length_squared();
    let magnitude = magnitude_squared.sqrt();
    let direction = scaled_space_position / magnitude;

    // Points below the ellipsoid are treated as lying on it.
    let magnitude_squared = magnitude_squared.max(1.0);
    let magnitude = magnitude.max(1.0);

    let cos_alpha = direction.dot(*scaled_space_direction_to_point);
    let sin_alpha = direction.cross(*scaled_space_direction_to_point).length();
    let cos_beta = 1.0 / magnitude;
    let sin_beta = (magnitude_squared - 1.0).sqrt() * cos_beta;

    1.0 / (cos_alpha * cos_beta - sin_alpha * sin_beta)
}
