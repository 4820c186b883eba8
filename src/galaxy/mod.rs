use bevy::prelude::*;

mod error;
mod galaxy_config;
mod galaxy_manager;
mod generate;
mod point_cloud;
mod random_source;
mod spawn_galaxy;

pub use galaxy_config::{
    GalaxyConfig, GalaxyConfigPlugin, GalaxyParam, GalaxySeed, ParameterChanged, Rgb,
};
pub use galaxy_manager::{GalaxyResourceManager, RenderSink};
pub use point_cloud::PointCloud;
pub use random_source::RngSource;
pub use spawn_galaxy::{GalaxyPoints, SpawnGalaxyPlugin};

#[cfg(test)]
pub use generate::generate;
#[cfg(test)]
pub use random_source::SequenceSource;

pub struct GalaxyPlugin;

impl Plugin for GalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((GalaxyConfigPlugin, SpawnGalaxyPlugin));
    }
}
