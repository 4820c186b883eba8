/// Generated particles: `positions[i]` is coloured by `colors[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
}

impl PointCloud {
    pub(crate) fn from_points(points: Vec<([f32; 3], [f32; 3])>) -> Self {
        let (positions, colors) = points.into_iter().unzip();
        Self { positions, colors }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[cfg(test)]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    #[cfg(test)]
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// `x0 y0 z0 x1 y1 z1 ...`
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// `r0 g0 b0 r1 g1 b1 ...`
    pub fn flat_colors(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}
