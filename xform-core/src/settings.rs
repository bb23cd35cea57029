//! Camera setups loaded from TOML or JSON
use serde::{Deserialize, Serialize};

use crate::matrix::Matrix4;
use crate::projection::{Camera, ProjectionMode};
use crate::vector::Vector3;
use crate::{Error, Result};

/// The six planes of a viewing volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl ClipBounds {
    /// Reject volumes that would divide by zero or invert a perspective.
    pub fn validate(&self, mode: ProjectionMode) -> Result<()> {
        let fields = [
            ("left", self.left),
            ("right", self.right),
            ("bottom", self.bottom),
            ("top", self.top),
            ("near", self.near),
            ("far", self.far),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(Error::NonFinite(name));
            }
        }

        let pairs = [
            ("left/right", self.left, self.right),
            ("bottom/top", self.bottom, self.top),
            ("near/far", self.near, self.far),
        ];
        for (what, low, high) in pairs {
            if low == high {
                return Err(Error::InvalidBounds { what, low, high });
            }
        }

        if mode == ProjectionMode::Perspective && self.near <= 0.0 {
            return Err(Error::NonPositiveNear(self.near));
        }
        Ok(())
    }
}

/// A projection derivation and its clip bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSettings {
    pub kind: ProjectionMode,
    #[serde(flatten)]
    pub bounds: ClipBounds,
}

/// A view derivation: either towards a target or along a view-plane normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewSettings {
    LookAt {
        eye: [f32; 3],
        target: [f32; 3],
        up: [f32; 3],
    },
    ViewPoint {
        eye: [f32; 3],
        direction: [f32; 3],
        up: [f32; 3],
    },
}

impl ViewSettings {
    pub fn validate(&self) -> Result<()> {
        let (eye, second, up, second_name) = match self {
            ViewSettings::LookAt { eye, target, up } => (eye, target, up, "target"),
            ViewSettings::ViewPoint { eye, direction, up } => (eye, direction, up, "direction"),
        };
        for (name, values) in [("eye", eye), (second_name, second), ("up", up)] {
            if values.iter().any(|v| !v.is_finite()) {
                return Err(Error::NonFinite(name));
            }
        }

        let up = Vector3::from(*up);
        if up.length() == 0.0 {
            return Err(Error::DegenerateView("up vector has zero length"));
        }
        let n = match self {
            ViewSettings::LookAt { eye, target, .. } => {
                if eye == target {
                    return Err(Error::DegenerateView("eye and target coincide"));
                }
                Vector3::from(*eye).subtract(&Vector3::from(*target))
            }
            ViewSettings::ViewPoint { direction, .. } => {
                let direction = Vector3::from(*direction);
                if direction.length() == 0.0 {
                    return Err(Error::DegenerateView("view direction has zero length"));
                }
                direction
            }
        };
        // u = up x n would be zero, leaving only the n row of the basis.
        if up.cross_product(&n).length() == 0.0 {
            return Err(Error::DegenerateView("up is parallel to the view direction"));
        }
        Ok(())
    }

    /// Derive the view matrix on `camera`.
    pub fn apply_to(&self, camera: &mut Camera) -> Matrix4 {
        match *self {
            ViewSettings::LookAt { eye, target, up } => {
                camera.look_at(&eye.into(), &target.into(), &up.into())
            }
            ViewSettings::ViewPoint { eye, direction, up } => {
                camera.view_point(&eye.into(), &direction.into(), &up.into())
            }
        }
    }
}

/// Full camera configuration. Absent tables leave that slot untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<ProjectionSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewSettings>,
}

impl CameraSettings {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let settings: Self = toml::from_str(input)?;
        log::debug!("Loaded camera settings from TOML: {:?}", settings);
        Ok(settings)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(input)?;
        log::debug!("Loaded camera settings from JSON: {:?}", settings);
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(projection) = &self.projection {
            projection.bounds.validate(projection.kind)?;
        }
        if let Some(view) = &self.view {
            view.validate()?;
        }
        Ok(())
    }
}
