pub use crate::galaxy::{
    GalaxyConfig, GalaxyParam, GalaxyPoints, GalaxyResourceManager, GalaxySeed, ParameterChanged,
    PointCloud, RenderSink, Rgb, RngSource,
};
