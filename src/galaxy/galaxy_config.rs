use super::error::{GalaxyError, GalaxyResult};
use bevy::prelude::*;

/// RGB triple, each component in [0, 1]
pub type Rgb = [f32; 3];

/// Parameters describing one galaxy.
///
/// Replaced wholesale on every committed edit, so a generation pass always
/// sees one consistent set of values.
#[derive(Resource, Clone, PartialEq, Debug)]
pub struct GalaxyConfig {
    pub count: i32,
    /// Sprite half-extent, only read by the renderer
    pub size: f32,
    pub radius: f32,
    pub branches: i32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: Rgb,
    pub outside_color: Rgb,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            size: 0.02,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            // #ff6030
            inside_color: [1.0, 96.0 / 255.0, 48.0 / 255.0],
            // #1b3984
            outside_color: [27.0 / 255.0, 57.0 / 255.0, 132.0 / 255.0],
        }
    }
}

impl GalaxyConfig {
    // Slider bounds. The generator itself accepts anything `validate` lets through.
    pub const MIN: Self = Self {
        count: 100,
        size: 0.001,
        radius: 0.01,
        branches: 2,
        spin: -5.0,
        randomness: 0.0,
        randomness_power: 1.0,
        inside_color: [0.0; 3],
        outside_color: [0.0; 3],
    };
    pub const MAX: Self = Self {
        count: 100_000,
        size: 0.1,
        radius: 20.0,
        branches: 20,
        spin: 5.0,
        randomness: 2.0,
        randomness_power: 10.0,
        inside_color: [1.0; 3],
        outside_color: [1.0; 3],
    };
    pub const STEP: Self = Self {
        count: 100,
        size: 0.001,
        radius: 0.01,
        branches: 1,
        spin: 0.001,
        randomness: 0.001,
        randomness_power: 0.001,
        inside_color: [0.0; 3],
        outside_color: [0.0; 3],
    };

    /// Rejects values the generator cannot work with. Nothing is clamped.
    pub fn validate(&self) -> GalaxyResult<()> {
        if self.count < 0 {
            return Err(GalaxyError::invalid("count", "must be at least 0"));
        }
        if !(self.size > 0.0) || !self.size.is_finite() {
            return Err(GalaxyError::invalid("size", "must be a finite value above 0"));
        }
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return Err(GalaxyError::invalid("radius", "must be a finite value above 0"));
        }
        if self.branches < 1 {
            return Err(GalaxyError::invalid("branches", "must be at least 1"));
        }
        if !self.spin.is_finite() {
            return Err(GalaxyError::invalid("spin", "must be finite"));
        }
        if !(self.randomness >= 0.0) || !self.randomness.is_finite() {
            return Err(GalaxyError::invalid(
                "randomness",
                "must be a finite value of at least 0",
            ));
        }
        if !(self.randomness_power > 0.0) || !self.randomness_power.is_finite() {
            return Err(GalaxyError::invalid(
                "randomness_power",
                "must be a finite value above 0",
            ));
        }
        if !is_unit_rgb(&self.inside_color) {
            return Err(GalaxyError::invalid(
                "inside_color",
                "components must lie in [0, 1]",
            ));
        }
        if !is_unit_rgb(&self.outside_color) {
            return Err(GalaxyError::invalid(
                "outside_color",
                "components must lie in [0, 1]",
            ));
        }
        Ok(())
    }

    /// Returns a copy of `self` with a single field replaced
    pub fn with_param(&self, param: GalaxyParam) -> Self {
        let mut next = self.clone();
        match param {
            GalaxyParam::Count(v) => next.count = v,
            GalaxyParam::Size(v) => next.size = v,
            GalaxyParam::Radius(v) => next.radius = v,
            GalaxyParam::Branches(v) => next.branches = v,
            GalaxyParam::Spin(v) => next.spin = v,
            GalaxyParam::Randomness(v) => next.randomness = v,
            GalaxyParam::RandomnessPower(v) => next.randomness_power = v,
            GalaxyParam::InsideColor(v) => next.inside_color = v,
            GalaxyParam::OutsideColor(v) => next.outside_color = v,
        }
        next
    }
}

fn is_unit_rgb(color: &Rgb) -> bool {
    color.iter().all(|c| (0.0..=1.0).contains(c))
}

/// One field of [`GalaxyConfig`] together with its new value
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum GalaxyParam {
    Count(i32),
    Size(f32),
    Radius(f32),
    Branches(i32),
    Spin(f32),
    Randomness(f32),
    RandomnessPower(f32),
    InsideColor(Rgb),
    OutsideColor(Rgb),
}

impl GalaxyParam {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Count(_) => "count",
            Self::Size(_) => "size",
            Self::Radius(_) => "radius",
            Self::Branches(_) => "branches",
            Self::Spin(_) => "spin",
            Self::Randomness(_) => "randomness",
            Self::RandomnessPower(_) => "randomness_power",
            Self::InsideColor(_) => "inside_color",
            Self::OutsideColor(_) => "outside_color",
        }
    }

    /// Whether the value sits inside the range the config panel offers
    pub fn within_ui_bounds(&self) -> bool {
        let (min, max) = (&GalaxyConfig::MIN, &GalaxyConfig::MAX);
        match *self {
            Self::Count(v) => (min.count..=max.count).contains(&v),
            Self::Size(v) => (min.size..=max.size).contains(&v),
            Self::Radius(v) => (min.radius..=max.radius).contains(&v),
            Self::Branches(v) => (min.branches..=max.branches).contains(&v),
            Self::Spin(v) => (min.spin..=max.spin).contains(&v),
            Self::Randomness(v) => (min.randomness..=max.randomness).contains(&v),
            Self::RandomnessPower(v) => {
                (min.randomness_power..=max.randomness_power).contains(&v)
            }
            Self::InsideColor(c) | Self::OutsideColor(c) => is_unit_rgb(&c),
        }
    }
}

/// Sent by the config surface once an edit is committed, never per drag frame
#[derive(Event, Clone, Copy, Debug)]
pub struct ParameterChanged(pub GalaxyParam);

/// `None` draws from the thread rng, `Some` reseeds on every regeneration
#[derive(Resource, Clone, Copy, Default, Debug)]
pub struct GalaxySeed(pub Option<u64>);

pub struct GalaxyConfigPlugin;

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxyConfig::default())
            .init_resource::<GalaxySeed>()
            .add_event::<ParameterChanged>()
            .add_systems(Update, apply_parameter_changes);
    }
}

pub fn apply_parameter_changes(
    mut events: EventReader<ParameterChanged>,
    mut galaxy_config: ResMut<GalaxyConfig>,
) {
    let mut next: Option<GalaxyConfig> = None;
    for ParameterChanged(param) in events.read() {
        if !param.within_ui_bounds() {
            warn!("{} = {:?} is outside the panel bounds", param.name(), param);
        }
        let base = next.as_ref().unwrap_or(&*galaxy_config);
        next = Some(base.with_param(*param));
    }

    if let Some(next) = next {
        // Equal values must not trigger a regeneration
        galaxy_config.set_if_neq(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GalaxyConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_branches_and_radius() {
        let config = GalaxyConfig {
            branches: 0,
            ..default()
        };
        assert_eq!(config.validate().unwrap_err().parameter(), "branches");

        let config = GalaxyConfig {
            radius: 0.0,
            ..default()
        };
        assert_eq!(config.validate().unwrap_err().parameter(), "radius");

        let config = GalaxyConfig {
            radius: f32::NAN,
            ..default()
        };
        assert_eq!(config.validate().unwrap_err().parameter(), "radius");
    }

    #[test]
    fn rejects_negative_count_and_colors_out_of_range() {
        let config = GalaxyConfig {
            count: -1,
            ..default()
        };
        assert_eq!(config.validate().unwrap_err().parameter(), "count");

        let config = GalaxyConfig {
            outside_color: [0.5, 1.2, 0.0],
            ..default()
        };
        assert_eq!(config.validate().unwrap_err().parameter(), "outside_color");
    }

    #[test]
    fn single_branch_is_accepted_below_ui_minimum() {
        let config = GalaxyConfig {
            branches: 1,
            ..default()
        };
        assert!(config.validate().is_ok());
        assert!(!GalaxyParam::Branches(1).within_ui_bounds());
    }

    #[test]
    fn with_param_leaves_original_untouched() {
        let config = GalaxyConfig::default();
        let next = config.with_param(GalaxyParam::Spin(-2.5));
        assert_eq!(next.spin, -2.5);
        assert_eq!(config.spin, 1.0);
        assert_eq!(next.count, config.count);
    }

    #[test]
    fn parameter_events_replace_config() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(GalaxyConfigPlugin);

        app.world_mut()
            .send_event(ParameterChanged(GalaxyParam::Count(5000)));
        app.world_mut()
            .send_event(ParameterChanged(GalaxyParam::Branches(7)));
        app.update();

        let config = app.world().resource::<GalaxyConfig>();
        assert_eq!(config.count, 5000);
        assert_eq!(config.branches, 7);
        assert_eq!(config.radius, GalaxyConfig::default().radius);
    }

    #[test]
    fn unchanged_value_does_not_mark_config_changed() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(GalaxyConfigPlugin);
        app.update();

        let tick = app.world().resource_ref::<GalaxyConfig>().last_changed();
        let count = GalaxyConfig::default().count;
        app.world_mut()
            .send_event(ParameterChanged(GalaxyParam::Count(count)));
        app.update();

        assert_eq!(
            app.world().resource_ref::<GalaxyConfig>().last_changed(),
            tick
        );
    }
}
