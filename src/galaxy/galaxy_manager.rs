use super::error::GalaxyResult;
use super::galaxy_config::GalaxyConfig;
use super::generate::generate;
use super::point_cloud::PointCloud;
use super::random_source::RandomSource;

/// Whatever displays point clouds (the scene graph in the app, a recorder in tests).
///
/// `detach` takes back the exact resource `attach` handed out.
pub trait RenderSink {
    type Resource;

    fn attach(&mut self, cloud: &PointCloud, config: &GalaxyConfig) -> Self::Resource;
    fn detach(&mut self, resource: Self::Resource);
}

/// Owns one generated cloud and the sink-side resource built from it
pub struct GalaxyHandle<R> {
    cloud: PointCloud,
    resource: R,
}

impl<R> GalaxyHandle<R> {
    pub fn point_cloud(&self) -> &PointCloud {
        &self.cloud
    }

    #[cfg(test)]
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Detaches the resource from `sink` and drops the buffers
    pub fn release<S: RenderSink<Resource = R>>(self, sink: &mut S) {
        sink.detach(self.resource);
    }
}

pub enum GalaxySlot<R> {
    Empty,
    Attached(GalaxyHandle<R>),
}

impl<R> Default for GalaxySlot<R> {
    fn default() -> Self {
        Self::Empty
    }
}

/// Keeps at most one galaxy attached to a sink.
///
/// Every regeneration moves the slot through `Empty` before the new handle
/// goes in, so the sink never holds two galaxies at once. Callers must not
/// regenerate re-entrantly.
pub struct GalaxyResourceManager<R> {
    slot: GalaxySlot<R>,
    generation: u64,
}

impl<R> Default for GalaxyResourceManager<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> GalaxyResourceManager<R> {
    pub fn new() -> Self {
        Self {
            slot: GalaxySlot::Empty,
            generation: 0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &GalaxySlot<R> {
        &self.slot
    }

    pub fn current(&self) -> Option<&GalaxyHandle<R>> {
        match &self.slot {
            GalaxySlot::Attached(handle) => Some(handle),
            GalaxySlot::Empty => None,
        }
    }

    /// Number of galaxies attached so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the attached galaxy with a freshly generated one.
    ///
    /// Parameters are checked before anything is detached: a rejected commit
    /// leaves the previous galaxy on screen.
    pub fn regenerate<S, G>(
        &mut self,
        sink: &mut S,
        config: &GalaxyConfig,
        rng: &mut G,
    ) -> GalaxyResult<()>
    where
        S: RenderSink<Resource = R>,
        G: RandomSource + ?Sized,
    {
        config.validate()?;

        self.release(sink);

        let cloud = generate(config, rng)?;
        let resource = sink.attach(&cloud, config);
        self.slot = GalaxySlot::Attached(GalaxyHandle { cloud, resource });
        self.generation += 1;
        Ok(())
    }

    /// Detaches the current galaxy, if any. Returns whether one was attached.
    pub fn release<S: RenderSink<Resource = R>>(&mut self, sink: &mut S) -> bool {
        match std::mem::take(&mut self.slot) {
            GalaxySlot::Attached(handle) => {
                handle.release(sink);
                true
            }
            GalaxySlot::Empty => false,
        }
    }
}
