use thiserror::Error;

/// Rejected configuration values. Raised at construction time, never per frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("movement speed must be positive and finite, got {0}")]
    InvalidSpeed(f32),

    #[error("rotation step must be non-negative and finite, got {0}")]
    InvalidRotationStep(f32),

    #[error("pitch range [{min}, {max}] must be non-empty and lie strictly between -pi/2 and pi/2")]
    InvalidPitchRange { min: f32, max: f32 },

    #[error("collider half extents must be positive, got [{x}, {y}, {z}]")]
    InvalidColliderExtents { x: f32, y: f32, z: f32 },

    #[error("world half extent must be positive and finite, got {0}")]
    InvalidHalfExtent(f32),

    #[error("interaction range must be positive, got {0}")]
    InvalidInteractionRange(f32),

    #[error("leave range {leave_range} must exceed interaction range {interaction_range}")]
    LeaveRangeTooSmall {
        interaction_range: f32,
        leave_range: f32,
    },

    #[error("camera {field} must be finite and non-negative, got {value}")]
    InvalidCamera { field: &'static str, value: f32 },
}
