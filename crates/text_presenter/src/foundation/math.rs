//! Math utilities and types
//!
//! Label positions live in the same 3D space as the rest of the scene, so the
//! presenter works with nalgebra vectors directly.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// World up axis used for vertical offsets
pub fn up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Smoothstep easing of a normalized parameter
///
/// The input is clamped to `[0, 1]` before easing.
pub fn smoothstep(k: f32) -> f32 {
    let k = k.clamp(0.0, 1.0);
    k * k * (3.0 - 2.0 * k)
}
