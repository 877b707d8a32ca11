use bevy::prelude::*;

use crate::tiling_scheme::TilingScheme;

/// Makes a tiling scheme and its ellipsoid available to systems as resources.
pub struct TilingSchemePlugin {
    pub tiling_scheme: TilingScheme,
}
impl TilingSchemePlugin {
    pub fn new(tiling_scheme: TilingScheme) -> Self {
        Self { tiling_scheme }
    }
}

impl Plugin for TilingSchemePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(*self.tiling_scheme.ellipsoid());
        app.insert_resource(self.tiling_scheme.clone());
    }
}
