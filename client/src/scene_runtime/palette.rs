//! Scene colors, as sRGB.

use bevy::color::Srgba;
use buddy_common::BodyPartSlot;

pub const fn hex_color(hex: u32) -> Srgba {
    Srgba::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    )
}

pub const HAPPY_SKY: Srgba = hex_color(0x87ceeb);
pub const STORMY_SKY: Srgba = hex_color(0x2c3e50);
pub const CLOUD_BRIGHT: Srgba = hex_color(0xffffff);
pub const CLOUD_STORMY: Srgba = hex_color(0x4a4a5a);
pub const CLOUD_GLOW_HAPPY: Srgba = hex_color(0xffffff);
pub const CLOUD_GLOW_STORMY: Srgba = hex_color(0x888899);

pub const GROUND: Srgba = hex_color(0x7ccd7c);
pub const POST: Srgba = hex_color(0xdeb887);
pub const HOOK: Srgba = hex_color(0xffd700);
pub const PUMP_BASE: Srgba = hex_color(0x555555);
pub const PUMP_CYLINDER: Srgba = hex_color(0xff6b6b);
pub const PUMP_ROD: Srgba = hex_color(0xcccccc);
pub const DARK_RUBBER: Srgba = hex_color(0x333333);
pub const STRING: Srgba = hex_color(0xaaaaaa);
pub const EYE: Srgba = hex_color(0x2d3436);

pub const SUN_LIGHT: Srgba = hex_color(0xfffacd);
pub const FILL_LIGHT: Srgba = hex_color(0xffb6c1);

pub const SPARKLE_COLORS: [Srgba; 5] = [
    hex_color(0xffd700),
    hex_color(0xff6b6b),
    hex_color(0x4ecdc4),
    hex_color(0xa8e6cf),
    hex_color(0xdda0dd),
];

pub fn body_part_color(slot: BodyPartSlot) -> Srgba {
    match slot {
        BodyPartSlot::Head => hex_color(0xff8a80),
        BodyPartSlot::Body => hex_color(0xa8e6cf),
        BodyPartSlot::LeftArm | BodyPartSlot::RightArm => hex_color(0xdda0dd),
        BodyPartSlot::LeftLeg | BodyPartSlot::RightLeg => hex_color(0xffdab9),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels_are_unpacked_in_rgb_order() {
        let color = hex_color(0xff8000);
        assert_eq!(color.red, 1.0);
        assert!((color.green - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(color.blue, 0.0);
        assert_eq!(color.alpha, 1.0);
    }
}
