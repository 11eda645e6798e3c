//! Palette catalog and HSB colors.
//!
//! The catalog is a fixed, versioned table. Entries must never be edited in place: a
//! given identifier is expected to produce the same colors for as long as
//! [`CATALOG_VERSION`] is unchanged.
//!
//! A few historical entries carry saturation or brightness above 100. They are kept
//! verbatim and saturate at 100 when converted.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Version of [`PALETTES`]. Bump when the table changes.
pub const CATALOG_VERSION: u32 = 1;

/// Colors per palette.
pub const PALETTE_LEN: usize = 4;

/// An ordered set of colors.
pub type Palette = [Hsba; PALETTE_LEN];

/// Color in hue (degrees, `0..360`), saturation and brightness (`0..100`), alpha (`0..1`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hsba {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub alpha: f32,
}

impl Hsba {
    pub const BLACK: Hsba = hsb(0, 0, 0);

    pub const fn new(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            brightness,
            alpha,
        }
    }

    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(self) -> [u8; 4] {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let v = (self.brightness / 100.0).clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_u8 = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        let a = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        [to_u8(r), to_u8(g), to_u8(b), a]
    }
}

/// Opaque color from integer HSB components.
pub const fn hsb(hue: u16, saturation: u8, brightness: u8) -> Hsba {
    Hsba::new(hue as f32, saturation as f32, brightness as f32, 1.0)
}

/// Look up a palette by index.
pub fn palette(index: usize) -> Option<&'static Palette> {
    PALETTES.get(index)
}

#[rustfmt::skip]
pub static PALETTES: [Palette; 88] = [
    [hsb(209, 74, 54), hsb(358, 79, 76), hsb(52, 99, 95), hsb(30, 100, 1)],
    [hsb(25, 99, 80), hsb(26, 87, 89), hsb(35, 98, 100), hsb(40, 85, 100)],
    [hsb(338, 23, 43), hsb(45, 28, 46), hsb(70, 42, 58), hsb(66, 52, 71)],
    [hsb(349, 13, 33), hsb(96, 4, 97), hsb(156, 27, 78), hsb(348, 68, 70)],
    [hsb(80, 2, 21), hsb(64, 18, 35), hsb(94, 54, 100), hsb(116, 48, 91)],
    [hsb(38, 6, 75), hsb(185, 33, 44), hsb(325, 27, 52), hsb(356, 47, 69)],
    [hsb(227, 66, 31), hsb(222, 73, 56), hsb(224, 48, 66), hsb(27, 19, 19)],
    [hsb(12, 29, 85), hsb(8, 28, 68), hsb(284, 75, 22), hsb(294, 97, 46)],
    [hsb(324, 34, 73), hsb(322, 28, 76), hsb(14, 23, 82), hsb(34, 27, 87)],
    [hsb(199, 91, 36), hsb(355, 80, 80), hsb(200, 24, 55), hsb(26, 37, 95)],
    [hsb(316, 26, 67), hsb(219, 40, 90), hsb(203, 70, 71), hsb(200, 98, 65)],
    [hsb(71, 35, 77), hsb(76, 32, 91), hsb(339, 69, 57), hsb(325, 74, 31)],
    [hsb(0, 1, 81), hsb(329, 37, 62), hsb(349, 7, 99), hsb(84, 29, 7)],
    [hsb(73, 53, 7), hsb(36, 75, 14), hsb(178, 100, 96), hsb(198, 9, 87)],
    [hsb(0, 0, 2), hsb(221, 100, 100), hsb(194, 77, 83), hsb(348, 69, 56)],
    [hsb(322, 91, 27), hsb(316, 96, 50), hsb(324, 28, 90), hsb(27, 19, 92)],
    [hsb(324, 39, 60), hsb(17, 63, 92), hsb(60, 74, 97), hsb(62, 52, 86)],
    [hsb(10, 15, 94), hsb(46, 11, 76), hsb(77, 9, 61), hsb(110, 25, 45)],
    [hsb(258, 5, 93), hsb(184, 13, 100), hsb(205, 35, 87), hsb(162, 56, 93)],
    [hsb(355, 65, 24), hsb(4, 87, 41), hsb(24, 100, 64), hsb(31, 75, 84)],
    [hsb(346, 70, 94), hsb(42, 60, 100), hsb(164, 97, 84), hsb(195, 90, 70)],
    [hsb(180, 1, 100), hsb(349, 92, 69), hsb(0, 100, 34), hsb(0, 100, 16)],
    [hsb(0, 0, 41), hsb(258, 27, 94), hsb(240, 38, 91), hsb(207, 60, 67)],
    [hsb(190, 21, 93), hsb(252, 7, 80), hsb(339, 15, 70), hsb(3, 30, 60)],
    [hsb(93, 13, 27), hsb(250, 41, 95), hsb(220, 26, 97), hsb(164, 38, 95)],
    [hsb(1, 95, 72), hsb(22, 94, 42), hsb(150, 1, 91), hsb(30, 2, 72)],
    [hsb(201, 60, 64), hsb(178, 57, 66), hsb(30, 4, 89), hsb(36, 38, 83)],
    [hsb(159, 15, 99), hsb(148, 30, 100), hsb(175, 16, 84), hsb(233, 8, 78)],
    [hsb(77, 22, 58), hsb(128, 38, 68), hsb(120, 26, 74), hsb(73, 25, 80)],
    [hsb(77, 3, 89), hsb(70, 6, 83), hsb(98, 4, 74), hsb(180, 9, 59)],
    [hsb(353, 39, 79), hsb(4, 52, 66), hsb(316, 63, 49), hsb(257, 77, 32)],
    [hsb(24, 87, 98), hsb(33, 87, 100), hsb(48, 59, 73), hsb(89, 45, 43)],
    [hsb(37, 46, 100), hsb(41, 57, 98), hsb(47, 81, 100), hsb(42, 81, 96)],
    [hsb(330, 54, 35), hsb(151, 45, 52), hsb(152, 55, 72), hsb(106, 20, 83)],
    [hsb(62, 146, 204), hsb(42, 98, 143), hsb(19, 41, 61), hsb(22, 50, 79)],
    [hsb(205, 247, 246), hsb(143, 184, 222), hsb(154, 148, 188), hsb(155, 80, 148)],
    [hsb(34, 46, 80), hsb(0, 121, 145), hsb(67, 154, 134), hsb(188, 216, 193)],
    [hsb(89, 79, 59), hsb(119, 98, 88), hsb(137, 98, 121), hsb(156, 124, 165)],
    [hsb(213, 223, 229), hsb(201, 177, 189), hsb(180, 149, 148), hsb(127, 145, 114)],
    [hsb(234, 122, 244), hsb(180, 62, 143), hsb(98, 0, 179), hsb(59, 0, 134)],
    [hsb(214, 195, 201), hsb(180, 144, 130), hsb(152, 71, 62), hsb(163, 124, 64)],
    [hsb(60, 22, 66), hsb(8, 99, 117), hsb(29, 211, 176), hsb(175, 252, 65)],
    [hsb(51, 12, 47), hsb(123, 40, 125), hsb(112, 103, 207), hsb(183, 192, 238)],
    [hsb(226, 26, 95), hsb(251, 58, 87), hsb(288, 100, 70), hsb(301, 100, 49)],
    [hsb(31, 38, 26), hsb(78, 49, 36), hsb(67, 7, 49), hsb(225, 4, 72)],
    [hsb(342, 22, 31), hsb(347, 8, 43), hsb(60, 8, 62), hsb(83, 15, 84)],
    [hsb(256, 46, 50), hsb(349, 28, 67), hsb(326, 53, 30), hsb(347, 60, 72)],
    [hsb(51, 22, 93), hsb(63, 34, 87), hsb(36, 47, 92), hsb(16, 78, 87)],
    [hsb(150, 1, 84), hsb(137, 18, 77), hsb(172, 13, 71), hsb(217, 12, 60)],
    [hsb(6, 19, 84), hsb(342, 22, 81), hsb(339, 34, 41), hsb(11, 34, 25)],
    [hsb(354, 62, 86), hsb(70, 6, 41), hsb(170, 15, 64), hsb(207, 41, 40)],
    [hsb(137, 14, 85), hsb(189, 23, 79), hsb(205, 22, 69), hsb(88, 16, 31)],
    [hsb(189, 68, 100), hsb(271, 98, 51), hsb(331, 77, 93), hsb(0, 35, 100)],
    [hsb(236, 39, 100), hsb(258, 19, 75), hsb(23, 25, 62), hsb(30, 62, 48)],
    [hsb(144, 23, 74), hsb(91, 26, 73), hsb(84, 48, 80), hsb(42, 50, 50)],
    [hsb(27, 97, 15), hsb(330, 100, 28), hsb(292, 76, 40), hsb(211, 67, 52)],
    [hsb(191, 24, 78), hsb(160, 14, 59), hsb(29, 20, 81), hsb(19, 18, 91)],
    [hsb(152, 100, 6), hsb(182, 50, 22), hsb(10, 8, 30), hsb(142, 4, 100)],
    [hsb(65, 5, 97), hsb(8, 76, 91), hsb(203, 12, 25), hsb(207, 68, 77)],
    [hsb(7, 66, 94), hsb(7, 52, 95), hsb(6, 38, 97), hsb(7, 25, 98)],
    [hsb(300, 100, 0), hsb(2, 91, 17), hsb(28, 100, 53), hsb(30, 98, 74)],
    [hsb(270, 2, 76), hsb(256, 9, 46), hsb(265, 19, 24), hsb(45, 71, 87)],
    [hsb(32, 100, 36), hsb(27, 57, 40), hsb(43, 27, 45), hsb(145, 13, 53)],
    [hsb(126, 83, 50), hsb(133, 59, 73), hsb(170, 32, 92), hsb(224, 30, 52)],
    [hsb(252, 24, 100), hsb(240, 26, 95), hsb(311, 17, 86), hsb(334, 33, 81)],
    [hsb(352, 6, 96), hsb(275, 12, 88), hsb(254, 20, 78), hsb(283, 24, 63)],
    [hsb(13, 13, 98), hsb(30, 10, 90), hsb(347, 22, 49), hsb(341, 32, 46)],
    [hsb(347, 28, 39), hsb(353, 31, 67), hsb(21, 38, 84), hsb(16, 47, 100)],
    [hsb(13, 24, 40), hsb(245, 21, 62), hsb(145, 35, 76), hsb(94, 42, 94)],
    [hsb(209, 87, 40), hsb(48, 19, 98), hsb(47, 61, 96), hsb(28, 68, 93)],
    [hsb(187, 38, 86), hsb(241, 54, 86), hsb(236, 83, 82), hsb(224, 76, 26)],
    [hsb(194, 98, 21), hsb(243, 49, 30), hsb(274, 49, 63), hsb(319, 29, 82)],
    [hsb(251, 32, 35), hsb(165, 17, 77), hsb(102, 16, 84), hsb(71, 18, 94)],
    [hsb(94, 30, 96), hsb(88, 24, 82), hsb(221, 19, 62), hsb(219, 65, 50)],
    [hsb(209, 59, 27), hsb(145, 20, 44), hsb(99, 34, 63), hsb(80, 30, 85)],
    [hsb(81, 29, 96), hsb(101, 36, 88), hsb(56, 42, 80), hsb(63, 52, 67)],
    [hsb(59, 49, 100), hsb(18, 56, 100), hsb(355, 69, 91), hsb(20, 62, 71)],
    [hsb(166, 14, 98), hsb(163, 24, 63), hsb(80, 67, 33), hsb(99, 47, 55)],
    [hsb(110, 83, 12), hsb(154, 100, 31), hsb(329, 43, 85), hsb(351, 26, 98)],
    [hsb(309, 82, 15), hsb(41, 40, 93), hsb(50, 32, 86), hsb(68, 16, 78)],
    [hsb(348, 38, 100), hsb(348, 12, 98), hsb(192, 96, 100), hsb(166, 44, 67)],
    [hsb(211, 79, 82), hsb(76, 98, 80), hsb(47, 99, 93), hsb(23, 100, 96)],
    [hsb(7, 50, 79), hsb(40, 40, 74), hsb(72, 28, 69), hsb(107, 47, 64)],
    [hsb(22, 64, 92), hsb(5, 65, 78), hsb(4, 79, 68), hsb(358, 82, 51)],
    [hsb(45, 100, 95), hsb(39, 100, 98), hsb(32, 98, 90), hsb(23, 100, 100)],
    [hsb(206, 28, 10), hsb(148, 37, 28), hsb(153, 93, 51), hsb(51, 31, 74)],
    [hsb(356, 82, 87), hsb(132, 28, 73), hsb(58, 24, 96), hsb(27, 51, 87)],
    [hsb(190, 82, 48), hsb(192, 60, 71), hsb(190, 36, 80), hsb(24, 4, 93)],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_complete() {
        assert_eq!(PALETTES.len(), 88);
        assert_eq!(PALETTES[0][0], hsb(209, 74, 54));
        assert_eq!(PALETTES[87][3], hsb(24, 4, 93));
        assert!(palette(88).is_none());
    }

    #[test]
    fn catalog_values_are_in_range() {
        for p in PALETTES.iter() {
            for c in p {
                assert!((0.0..360.0).contains(&c.hue));
                assert!(c.saturation >= 0.0);
                assert!(c.brightness >= 0.0);
                assert_eq!(c.alpha, 1.0);
            }
        }
    }

    #[test]
    fn rgb_conversion_hits_primaries() {
        assert_eq!(hsb(0, 100, 100).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(hsb(120, 100, 100).to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(hsb(240, 100, 100).to_rgba8(), [0, 0, 255, 255]);
        assert_eq!(hsb(0, 0, 97).to_rgba8(), [247, 247, 247, 255]);
        assert_eq!(Hsba::BLACK.with_alpha(0.3).to_rgba8(), [0, 0, 0, 77]);
        assert_eq!(hsb(0, 0, 250).to_rgba8(), [255, 255, 255, 255]);
    }
}
