//! Vector helpers for shading that glam does not provide.

use crate::Vec3;

/// Linear RGB color, components nominally in [0, 1].
pub type Color = Vec3;

/// Reflect `v` about the surface normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`
/// using Snell's law. `eta_ratio` is η_incident / η_transmitted.
///
/// The caller is responsible for checking total internal reflection first.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, eta_ratio: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = eta_ratio * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// True if every component is close enough to zero that the vector
/// cannot be used as a direction.
#[inline]
pub fn is_near_zero(v: Vec3) -> bool {
    const S: f32 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

/// Relative luminance of a linear color (Rec. 709 weights).
#[inline]
pub fn luminance(c: Color) -> f32 {
    0.2126 * c.x + 0.7152 * c.y + 0.0722 * c.z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_same_medium_passes_straight() {
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(uv, Vec3::Y, 1.0);
        assert!((out - uv).length() < 1e-5);
    }

    #[test]
    fn test_refract_bends_toward_normal_entering_denser_medium() {
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(uv, Vec3::Y, 1.0 / 1.5);

        // Snell: sin(out) = sin(in) / 1.5
        let sin_in = uv.x.abs();
        let sin_out = out.normalize().x.abs();
        assert!((sin_out - sin_in / 1.5).abs() < 1e-4);
        assert!(out.y < 0.0);
    }

    #[test]
    fn test_is_near_zero() {
        assert!(is_near_zero(Vec3::ZERO));
        assert!(is_near_zero(Vec3::splat(1e-9)));
        assert!(!is_near_zero(Vec3::new(0.0, 1e-3, 0.0)));
    }

    #[test]
    fn test_luminance() {
        assert!((luminance(Color::ONE) - 1.0).abs() < 1e-6);
        assert_eq!(luminance(Color::ZERO), 0.0);
        // Green dominates perceived brightness
        assert!(luminance(Color::Y) > luminance(Color::X));
    }
}
