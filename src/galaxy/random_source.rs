use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// Supplies uniform draws in `[0, 1)`.
///
/// The generator pulls exactly seven draws per point in a fixed order, so any
/// two sources yielding the same sequence produce the same galaxy.
pub trait RandomSource {
    fn draw(&mut self) -> f32;
}

/// Adapts any `rand` generator
pub struct RngSource<R: RngCore>(pub R);

impl<R: RngCore> RandomSource for RngSource<R> {
    fn draw(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

impl RngSource<Box<dyn RngCore>> {
    /// Seeded `StdRng` when a seed is given, thread rng otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(Box::new(StdRng::seed_from_u64(seed))),
            None => Self(Box::new(rand::rng())),
        }
    }
}

/// Replays a fixed list of draws, wrapping around at the end
#[cfg(test)]
#[derive(Clone, Debug)]
pub struct SequenceSource {
    draws: Vec<f32>,
    taken: usize,
}

#[cfg(test)]
impl SequenceSource {
    pub fn new(draws: Vec<f32>) -> Self {
        assert!(!draws.is_empty(), "sequence needs at least one draw");
        assert!(draws.iter().all(|d| (0.0..1.0).contains(d)));
        Self { draws, taken: 0 }
    }

    /// Total number of draws handed out so far
    pub fn taken(&self) -> usize {
        self.taken
    }
}

#[cfg(test)]
impl RandomSource for SequenceSource {
    fn draw(&mut self) -> f32 {
        let value = self.draws[self.taken % self.draws.len()];
        self.taken += 1;
        value
    }
}
