//! Camera module — projection/view derivation, frustum planes, viewport mapping.

mod camera;
mod frustum;

pub use camera::{Camera, Projection, CAMERA_PROBE_HALF_EXTENT};
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
