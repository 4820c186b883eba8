use crate::prelude::*;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GalaxyConfigUi>()
            .add_systems(Startup, configure_visuals_system)
            .add_systems(Update, (sync_draft_system, ui_system).chain());
    }
}

/// Values shown by the panel. Sliders edit this copy every frame; the real
/// config only changes once an edit is committed.
#[derive(Resource, Default)]
struct GalaxyConfigUi {
    draft: GalaxyConfig,
    // picker edits waiting for the pointer to come up
    inside_pending: bool,
    outside_pending: bool,
}

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..egui::Visuals::dark()
    });
}

fn sync_draft_system(galaxy_config: Res<GalaxyConfig>, mut ui_state: ResMut<GalaxyConfigUi>) {
    if galaxy_config.is_changed() {
        ui_state.draft = galaxy_config.clone();
    }
}

/// Released after a drag, or edited without dragging (keys, clicks, typing)
fn committed(response: &egui::Response) -> bool {
    response.drag_stopped() || (response.changed() && !response.dragged())
}

fn slider<N: egui::emath::Numeric>(
    ui: &mut egui::Ui,
    value: &mut N,
    min: N,
    max: N,
    step: f64,
    label: &str,
) -> bool {
    let response = ui.add(egui::Slider::new(value, min..=max).step_by(step).text(label));
    committed(&response)
}

/// The picker lives in a popup, so the button response reports a change on
/// every frame of a drag and never reports the drag itself. Edits are held
/// in `pending` until no pointer button is down.
fn color_button(ui: &mut egui::Ui, color: &mut Rgb, pending: &mut bool, label: &str) -> bool {
    ui.horizontal(|ui| {
        let response = ui.color_edit_button_rgb(color);
        ui.label(label);
        *pending |= response.changed();
        if *pending && !ui.input(|i| i.pointer.any_down()) {
            *pending = false;
            return true;
        }
        false
    })
    .inner
}

fn ui_system(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<GalaxyConfigUi>,
    mut galaxy_config: ResMut<GalaxyConfig>,
    galaxy_points: Res<GalaxyPoints>,
    mut changes: EventWriter<ParameterChanged>,
) {
    let ctx = contexts.ctx_mut();
    let (min, max, step) = (&GalaxyConfig::MIN, &GalaxyConfig::MAX, &GalaxyConfig::STEP);
    let GalaxyConfigUi {
        draft,
        inside_pending,
        outside_pending,
    } = &mut *ui_state;
    let mut commit = |param: GalaxyParam| {
        changes.write(ParameterChanged(param));
    };

    egui::SidePanel::left("side_panel")
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.heading("Galaxy");

            if slider(ui, &mut draft.count, min.count, max.count, step.count as f64, "Count") {
                commit(GalaxyParam::Count(draft.count));
            }
            if slider(ui, &mut draft.size, min.size, max.size, step.size as f64, "Size") {
                commit(GalaxyParam::Size(draft.size));
            }
            if slider(ui, &mut draft.radius, min.radius, max.radius, step.radius as f64, "Radius") {
                commit(GalaxyParam::Radius(draft.radius));
            }
            if slider(
                ui,
                &mut draft.branches,
                min.branches,
                max.branches,
                step.branches as f64,
                "Branches",
            ) {
                commit(GalaxyParam::Branches(draft.branches));
            }
            if slider(ui, &mut draft.spin, min.spin, max.spin, step.spin as f64, "Spin") {
                commit(GalaxyParam::Spin(draft.spin));
            }
            if slider(
                ui,
                &mut draft.randomness,
                min.randomness,
                max.randomness,
                step.randomness as f64,
                "Randomness",
            ) {
                commit(GalaxyParam::Randomness(draft.randomness));
            }
            if slider(
                ui,
                &mut draft.randomness_power,
                min.randomness_power,
                max.randomness_power,
                step.randomness_power as f64,
                "Randomness Power",
            ) {
                commit(GalaxyParam::RandomnessPower(draft.randomness_power));
            }

            ui.separator();
            if color_button(ui, &mut draft.inside_color, inside_pending, "Inside Color") {
                commit(GalaxyParam::InsideColor(draft.inside_color));
            }
            if color_button(ui, &mut draft.outside_color, outside_pending, "Outside Color") {
                commit(GalaxyParam::OutsideColor(draft.outside_color));
            }

            ui.separator();
            ui.label(format!("Points: {}", galaxy_points.attached_points()));
            if ui.button("Regenerate").clicked() {
                // same parameters, fresh draws
                galaxy_config.set_changed();
            }
        });
}
