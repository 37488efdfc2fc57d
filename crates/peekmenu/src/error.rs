use thiserror::Error;

/// Invalid menu configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MenuError {
    #[error("a context menu needs at least one action")]
    NoActions,
    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },
    #[error("backdrop blur sigma must be non-negative, got {0}")]
    NegativeBlurSigma(f32),
    #[error("scale bounds must satisfy 0 < min ({min}) <= open ({open})")]
    InvalidScaleBounds { min: f32, open: f32 },
    #[error("drag setting {name} is out of range: {value}")]
    InvalidDrag { name: &'static str, value: f32 },
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidLength { name: &'static str, value: f32 },
}
