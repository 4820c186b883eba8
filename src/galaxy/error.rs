use thiserror::Error;

pub type GalaxyResult<T> = Result<T, GalaxyError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GalaxyError {
    #[error("invalid galaxy parameter `{name}`: {requirement}")]
    InvalidParameter {
        name: &'static str,
        requirement: &'static str,
    },
}

impl GalaxyError {
    pub fn invalid(name: &'static str, requirement: &'static str) -> Self {
        Self::InvalidParameter { name, requirement }
    }

    /// Name of the offending field
    #[cfg(test)]
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidParameter { name, .. } => name,
        }
    }
}
