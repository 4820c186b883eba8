use super::error::GalaxyResult;
use super::galaxy_config::{GalaxyConfig, Rgb};
use super::point_cloud::PointCloud;
use super::random_source::RandomSource;
use rayon::prelude::*;
use std::f32::consts::TAU;

/// Draws consumed by a single point, in the order they are taken
#[derive(Clone, Copy, Debug)]
struct PointDraws {
    radius: f32,
    // (magnitude, sign) for x, y, z
    offsets: [(f32, f32); 3],
}

impl PointDraws {
    fn take<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let radius = rng.draw();
        let mut offsets = [(0.0, 0.0); 3];
        for axis in offsets.iter_mut() {
            let magnitude = rng.draw();
            let sign = rng.draw();
            *axis = (magnitude, sign);
        }
        Self { radius, offsets }
    }
}

/// Builds the point cloud for `config`.
///
/// Draws are pulled from `rng` sequentially (seven per point), then the
/// per-point math runs in parallel; the output only depends on the draw
/// sequence. Radial distance is uniform in `r`, so density rises towards
/// the centre.
pub fn generate<R: RandomSource + ?Sized>(
    config: &GalaxyConfig,
    rng: &mut R,
) -> GalaxyResult<PointCloud> {
    config.validate()?;

    let count = config.count as usize;
    let draws: Vec<PointDraws> = (0..count).map(|_| PointDraws::take(&mut *rng)).collect();

    let points = draws
        .par_iter()
        .enumerate()
        .map(|(i, point)| place_point(config, i, point))
        .collect();

    Ok(PointCloud::from_points(points))
}

fn place_point(config: &GalaxyConfig, index: usize, draws: &PointDraws) -> ([f32; 3], Rgb) {
    let r = draws.radius * config.radius;
    let spin_angle = config.spin * r;
    let branches = config.branches as usize;
    let branch_angle = (index % branches) as f32 / branches as f32 * TAU;

    let [offset_x, offset_y, offset_z] = draws.offsets.map(|(magnitude, sign)| {
        let sign = if sign < 0.5 { 1.0 } else { -1.0 };
        sign * magnitude.powf(config.randomness_power) * config.randomness
    });

    let angle = branch_angle + spin_angle;
    let position = [
        angle.cos() * r + offset_x,
        offset_y,
        angle.sin() * r + offset_z,
    ];

    let t = (r / config.radius).clamp(0.0, 1.0);
    let color = lerp_rgb(&config.inside_color, &config.outside_color, t);

    (position, color)
}

fn lerp_rgb(from: &Rgb, to: &Rgb, t: f32) -> Rgb {
    std::array::from_fn(|c| {
        let (a, b) = (from[c], to[c]);
        // rounding must not push the result past either endpoint
        (a + (b - a) * t).clamp(a.min(b), a.max(b))
    })
}
