//! Distance thresholds and movement helpers
//!
//! Ants never collide with each other; the only geometry that matters is
//! "close enough to the piece" and "far enough off the field".

use glam::Vec2;

/// An approaching ant is at its target when strictly closer than `epsilon`
#[inline]
pub fn has_arrived(pos: Vec2, target: Vec2, epsilon: f32) -> bool {
    pos.distance(target) < epsilon
}

/// An escaping ant is gone once strictly farther than `radius` from `center`
#[inline]
pub fn is_off_field(pos: Vec2, center: Vec2, radius: f32) -> bool {
    pos.distance(center) > radius
}

/// Move from `pos` toward `target` by at most `max_step`, never overshooting
pub fn step_toward(pos: Vec2, target: Vec2, max_step: f32) -> Vec2 {
    let delta = target - pos;
    let dist = delta.length();
    if dist <= max_step || dist <= f32::EPSILON {
        return target;
    }
    pos + delta / dist * max_step
}

/// Unit direction pointing away from `center` through `pos`.
///
/// An ant sitting exactly on the center has no radial direction; it leaves
/// along +X.
#[inline]
pub fn escape_direction(pos: Vec2, center: Vec2) -> Vec2 {
    (pos - center).try_normalize().unwrap_or(Vec2::X)
}

/// Angle of the vector from `from` to `to`, or `fallback` when they coincide
#[inline]
pub fn heading_toward(from: Vec2, to: Vec2, fallback: f32) -> f32 {
    let d = to - from;
    if d.length_squared() <= f32::EPSILON {
        fallback
    } else {
        d.y.atan2(d.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_arrival_is_strict() {
        let target = Vec2::new(100.0, 0.0);
        assert!(has_arrived(Vec2::new(104.0, 0.0), target, 5.0));
        assert!(!has_arrived(Vec2::new(105.0, 0.0), target, 5.0));
        assert!(!has_arrived(Vec2::new(300.0, 0.0), target, 5.0));
    }

    #[test]
    fn test_off_field_is_strict() {
        assert!(!is_off_field(Vec2::new(500.0, 0.0), Vec2::ZERO, 500.0));
        assert!(is_off_field(Vec2::new(0.0, -500.5), Vec2::ZERO, 500.0));
        assert!(!is_off_field(Vec2::new(300.0, 300.0), Vec2::ZERO, 500.0));
    }

    #[test]
    fn test_step_toward_moves_by_step() {
        let next = step_toward(Vec2::new(300.0, 0.0), Vec2::new(100.0, 0.0), 10.0);
        assert!((next - Vec2::new(290.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_step_toward_does_not_overshoot() {
        let target = Vec2::new(100.0, 0.0);
        let next = step_toward(Vec2::new(103.0, 0.0), target, 10.0);
        assert_eq!(next, target);
        assert_eq!(step_toward(target, target, 10.0), target);
    }

    #[test]
    fn test_escape_direction() {
        let dir = escape_direction(Vec2::new(0.0, 50.0), Vec2::ZERO);
        assert!((dir - Vec2::Y).length() < 1e-6);

        let dir = escape_direction(Vec2::new(110.0, 10.0), Vec2::new(100.0, 10.0));
        assert!((dir - Vec2::X).length() < 1e-6);

        assert_eq!(escape_direction(Vec2::ZERO, Vec2::ZERO), Vec2::X);
    }

    #[test]
    fn test_heading_toward() {
        let h = heading_toward(Vec2::ZERO, Vec2::new(0.0, 10.0), 0.0);
        assert!((h - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(heading_toward(Vec2::ONE, Vec2::ONE, 1.25), 1.25);
    }
}
