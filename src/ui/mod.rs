use bevy::prelude::*;

mod camera;
mod config_egui;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((config_egui::ConfigEguiPlugin, camera::CameraPlugin));
    }
}
