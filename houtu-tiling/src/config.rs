//! Declarative tiling scheme configuration, typically read from JSON.

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use crate::{
    ellipsoid::Ellipsoid,
    error::TilingError,
    rectangle::Rectangle,
    tiling_scheme::{TilingScheme, TilingSchemeOptions},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    Geographic,
    WebMercator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedEllipsoid {
    #[default]
    Wgs84,
    UnitSphere,
    Moon,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EllipsoidConfig {
    Named(NamedEllipsoid),
    Radii { radii: [f64; 3] },
}
impl Default for EllipsoidConfig {
    fn default() -> Self {
        EllipsoidConfig::Named(NamedEllipsoid::default())
    }
}
impl EllipsoidConfig {
    pub fn to_ellipsoid(&self) -> Ellipsoid {
        match self {
            EllipsoidConfig::Named(NamedEllipsoid::Wgs84) => Ellipsoid::WGS84,
            EllipsoidConfig::Named(NamedEllipsoid::UnitSphere) => Ellipsoid::UNIT_SPHERE,
            EllipsoidConfig::Named(NamedEllipsoid::Moon) => Ellipsoid::MOON,
            EllipsoidConfig::Radii { radii } => Ellipsoid::from_vec3(DVec3::from_array(*radii)),
        }
    }
}

/// Serializable form of [`TilingSchemeOptions`].
///
/// `rectangle` is in native coordinates. Omitted tile counts fall back to the defaults of
/// the chosen projection: 2x1 for geographic, 1x1 for web mercator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilingSchemeConfig {
    pub projection: ProjectionKind,
    #[serde(default)]
    pub ellipsoid: EllipsoidConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rectangle: Option<Rectangle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_level_zero_tiles_x: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_level_zero_tiles_y: Option<u32>,
}
impl TilingSchemeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, TilingError> {
        serde_json::from_str(json).map_err(|error| TilingError::Configuration(error.to_string()))
    }
    pub fn to_json_string(&self) -> Result<String, TilingError> {
        serde_json::to_string(self).map_err(|error| TilingError::Configuration(error.to_string()))
    }
    pub fn to_options(&self) -> TilingSchemeOptions {
        let ellipsoid = self.ellipsoid.to_ellipsoid();
        let mut options = match self.projection {
            ProjectionKind::Geographic => TilingSchemeOptions::geographic(&ellipsoid),
            ProjectionKind::WebMercator => TilingSchemeOptions::web_mercator(&ellipsoid),
        };
        options.native_rectangle = self.rectangle;
        if let Some(x) = self.number_of_level_zero_tiles_x {
            options.number_of_level_zero_tiles_x = x;
        }
        if let Some(y) = self.number_of_level_zero_tiles_y {
            options.number_of_level_zero_tiles_y = y;
        }
        options
    }
}

impl TilingScheme {
    pub fn from_config(config: &TilingSchemeConfig) -> Result<Self, TilingError> {
        TilingScheme::new(config.to_options())
    }
}
