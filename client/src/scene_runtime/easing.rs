//! Timing curves and small geometry helpers used by the scene systems.
//!
//! Everything here is a pure function of its inputs so the curves can be
//! checked at their endpoints without a running app.

use bevy::color::{Hsla, Srgba};
use bevy::prelude::*;
use std::f32::consts::PI;

/// Pump rod height at rest.
pub const ROD_UP: f32 = -1.1;
/// Pump rod height at the bottom of a stroke.
pub const ROD_DOWN: f32 = -1.6;

pub const PART_APPEAR_SECS: f32 = 0.4;
pub const PUMP_STROKE_SECS: f32 = 0.5;
pub const WOBBLE_SECS: f32 = 0.5;
pub const VICTORY_DANCE_SECS: f32 = 3.0;
pub const SCREEN_SHAKE_SECS: f32 = 0.4;
pub const SUCCESS_PULSE_SECS: f32 = 0.5;
pub const SPARKLE_SECS: f32 = 0.8;

/// Scale a freshly inflated part starts from.
pub const APPEAR_START_SCALE: f32 = 0.01;

/// Elastic overshoot, 0 at `p = 0` and settling at 1.
pub fn bounce(progress: f32) -> f32 {
    1.0 - 2f32.powf(-10.0 * progress) * (progress * PI * 3.0).cos()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppearFlash {
    /// 0 is pure white, 1 is the part's own color.
    pub color_mix: f32,
    /// White emissive intensity.
    pub emissive: f32,
}

/// White burst over the first half of the appear animation.
pub fn appear_flash(progress: f32) -> AppearFlash {
    let emissive = if progress < 0.5 {
        0.3 * (1.0 - progress * 2.0)
    } else {
        0.0
    };
    AppearFlash {
        color_mix: (progress * 2.0).min(1.0),
        emissive,
    }
}

/// Rod goes down over the first half of a stroke and back up over the second.
pub fn pump_rod_y(progress: f32) -> f32 {
    let progress = progress.clamp(0.0, 1.0);
    if progress < 0.5 {
        let q = progress * 2.0;
        ROD_UP + (ROD_DOWN - ROD_UP) * (q * PI / 2.0).sin()
    } else {
        let q = (progress - 0.5) * 2.0;
        ROD_DOWN + (ROD_UP - ROD_DOWN) * (q * PI / 2.0).sin()
    }
}

/// Squash-and-stretch that decays to unit scale.
pub fn wobble_scale(progress: f32) -> Vec3 {
    let amount = (progress * PI * 6.0).sin() * 0.1 * (1.0 - progress);
    Vec3::new(1.0 + amount, 1.0 - amount, 1.0 + amount)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupPose {
    pub translation: Vec3,
    pub roll: f32,
    pub scale: f32,
}

impl GroupPose {
    pub const NEUTRAL: Self = Self {
        translation: Vec3::ZERO,
        roll: 0.0,
        scale: 1.0,
    };

    pub fn to_transform(self) -> Transform {
        Transform {
            translation: self.translation,
            rotation: Quat::from_rotation_z(self.roll),
            scale: Vec3::splat(self.scale),
        }
    }
}

/// Dance pose `elapsed_ms` after the win.
pub fn victory_pose(elapsed_ms: f32) -> GroupPose {
    GroupPose {
        translation: Vec3::new(
            (elapsed_ms * 0.01).sin() * 0.3,
            (elapsed_ms * 0.015).sin().abs() * 0.5,
            0.0,
        ),
        roll: (elapsed_ms * 0.02).sin() * 0.2,
        scale: 1.0 + (elapsed_ms * 0.03).sin() * 0.1,
    }
}

/// Gentle bob while the avatar is tethered. Returns `(y, roll)`.
pub fn idle_bob(animation_clock: f32) -> (f32, f32) {
    (
        (animation_clock * 1.5).sin() * 0.1,
        (animation_clock * 0.8).sin() * 0.05,
    )
}

pub fn float_away_roll(animation_clock: f32) -> f32 {
    (animation_clock * 3.0).sin() * 0.2
}

pub fn camera_sway_x(animation_clock: f32) -> f32 {
    (animation_clock * 0.3).sin() * 0.2
}

/// Base color with its HSL lightness pulsed by the color clock.
pub fn breathing_color(base: Srgba, color_clock: f32, alpha: f32) -> Srgba {
    let mut hsla = Hsla::from(base);
    let pulse = 0.02 * (color_clock * 1.5).sin();
    hsla.lightness = (hsla.lightness + pulse).clamp(0.5, 0.85);
    Srgba::from(hsla).with_alpha(alpha)
}

pub fn quadratic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

pub fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Straight piece of a tube approximated by a unit-height cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeSegment {
    pub center: Vec3,
    pub rotation: Quat,
    pub length: f32,
}

/// Splits a sampled curve into cylinder segments. Degenerate pieces are
/// skipped.
pub fn tube_segments(points: &[Vec3]) -> Vec<TubeSegment> {
    points
        .windows(2)
        .filter_map(|pair| {
            let delta = pair[1] - pair[0];
            let length = delta.length();
            (length > f32::EPSILON).then(|| TubeSegment {
                center: (pair[0] + pair[1]) * 0.5,
                rotation: Quat::from_rotation_arc(Vec3::Y, delta / length),
                length,
            })
        })
        .collect()
}

/// Distance along the ray to the first hit with a sphere, if any.
/// `direction` must be normalized.
pub fn ray_hits_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let along = to_center.dot(direction);
    let closest_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = along - half_chord;
    let far = along + half_chord;
    if far < 0.0 {
        None
    } else if near >= 0.0 {
        Some(near)
    } else {
        Some(far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn bounce_starts_at_zero_and_settles_near_one() {
        assert!(close(bounce(0.0), 0.0));
        assert!(close(bounce(1.0), 1.0));
        assert!(bounce(0.3) > 1.0, "expected overshoot");
    }

    #[test]
    fn flash_fades_out_by_the_midpoint() {
        let start = appear_flash(0.0);
        assert_eq!(start.color_mix, 0.0);
        assert!(close(start.emissive, 0.3));
        let mid = appear_flash(0.5);
        assert_eq!(mid.color_mix, 1.0);
        assert_eq!(mid.emissive, 0.0);
    }

    #[test]
    fn pump_stroke_returns_to_the_top() {
        assert!(close(pump_rod_y(0.0), ROD_UP));
        assert!(close(pump_rod_y(0.5), ROD_DOWN));
        assert!(close(pump_rod_y(1.0), ROD_UP));
    }

    #[test]
    fn wobble_and_dance_end_neutral() {
        let end = wobble_scale(1.0);
        assert!(end.abs_diff_eq(Vec3::ONE, 1e-5));
        let start = victory_pose(0.0);
        assert_eq!(start, GroupPose::NEUTRAL);
    }

    #[test]
    fn breathing_keeps_alpha_and_lightness_bounds() {
        let dark = breathing_color(Srgba::new(0.1, 0.1, 0.3, 1.0), 0.0, 0.15);
        assert_eq!(dark.alpha, 0.15);
        assert!(Hsla::from(dark).lightness >= 0.5 - 1e-4);

        let light = breathing_color(Srgba::WHITE, 1.0, 1.0);
        assert!(Hsla::from(light).lightness <= 0.85 + 1e-4);
    }

    #[test]
    fn bezier_hits_its_end_points() {
        let (a, b, c, d) = (Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE);
        assert_eq!(quadratic_bezier(a, b, c, 0.0), a);
        assert_eq!(quadratic_bezier(a, b, c, 1.0), c);
        assert!(cubic_bezier(a, b, c, d, 1.0).abs_diff_eq(d, 1e-6));
    }

    #[test]
    fn tube_segments_span_the_polyline() {
        let points = [Vec3::ZERO, Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0), Vec3::new(2.0, 2.0, 0.0)];
        let segments = tube_segments(&points);
        assert_eq!(segments.len(), 2);
        assert!(close(segments[0].length, 2.0));
        assert!(segments[0].center.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), 1e-6));
        let axis = segments[1].rotation * Vec3::Y;
        assert!(axis.abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn ray_sphere_hits_front_surface() {
        let hit = ray_hits_sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::ZERO, 1.0);
        assert!(close(hit.unwrap_or_default(), 4.0));
        assert_eq!(
            ray_hits_sphere(Vec3::new(0.0, 3.0, 5.0), Vec3::NEG_Z, Vec3::ZERO, 1.0),
            None
        );
        assert_eq!(
            ray_hits_sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::ZERO, 1.0),
            None
        );
    }
}
