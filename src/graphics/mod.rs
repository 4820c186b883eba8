use bevy::prelude::*;

mod points_material;

pub use points_material::{billboard_mesh, GalaxyPointsMaterial};

pub struct GraphicsPlugin;

impl Plugin for GraphicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(points_material::PointsMaterialPlugin);
    }
}
