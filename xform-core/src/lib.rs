//! xform core library - transformation algebra and camera math
//!
//! Provides the 4x4 matrix and 3-vector types, camera projection and view
//! derivation, and model matrix composition used by the WebGL demos.

pub mod error;
pub mod matrix;
pub mod projection;
pub mod settings;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use error::{Error, Result};
pub use matrix::Matrix4;
pub use projection::{Camera, ProjectionMode};
pub use settings::{CameraSettings, ClipBounds, ProjectionSettings, ViewSettings};
pub use transform::{mvp, ModelTransform, Orientation};
pub use vector::Vector3;
