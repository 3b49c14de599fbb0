//! Plasma colormap for the activation heatmaps.

use plotters::style::RGBColor;

/// Anchor colors of the matplotlib plasma map, evenly spaced over `0..=1`.
const PLASMA_ANCHORS: [(u8, u8, u8); 9] = [
    (13, 8, 135),
    (70, 3, 159),
    (114, 1, 168),
    (156, 23, 158),
    (189, 55, 134),
    (216, 87, 107),
    (237, 121, 83),
    (251, 159, 58),
    (240, 249, 33),
];

/// Maps a normalized value to a plasma color by linear interpolation between
/// the anchors. Values outside `0..=1` are clamped, non-finite values map to
/// the low end.
pub fn plasma(t: f32) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (PLASMA_ANCHORS.len() - 1) as f32;
    let idx = (scaled.floor() as usize).min(PLASMA_ANCHORS.len() - 2);
    let frac = scaled - idx as f32;
    let (r0, g0, b0) = PLASMA_ANCHORS[idx];
    let (r1, g1, b1) = PLASMA_ANCHORS[idx + 1];
    RGBColor(lerp(r0, r1, frac), lerp(g0, g1, frac), lerp(b0, b1, frac))
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_the_anchor_colors() {
        let RGBColor(r, g, b) = plasma(0.0);
        assert_eq!((r, g, b), (13, 8, 135));
        let RGBColor(r, g, b) = plasma(1.0);
        assert_eq!((r, g, b), (240, 249, 33));
    }

    #[test]
    fn midpoint_hits_the_central_anchor() {
        let RGBColor(r, g, b) = plasma(0.5);
        assert_eq!((r, g, b), (189, 55, 134));
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(plasma(-2.0).0, plasma(0.0).0);
        assert_eq!(plasma(5.0).2, plasma(1.0).2);
    }

    #[test]
    fn non_finite_values_map_to_the_low_end() {
        let RGBColor(r, g, b) = plasma(f32::NAN);
        assert_eq!((r, g, b), (13, 8, 135));
        let RGBColor(r, g, b) = plasma(f32::INFINITY);
        assert_eq!((r, g, b), (13, 8, 135));
    }

    #[test]
    fn interpolates_between_anchors() {
        // Halfway between the first two anchors.
        let RGBColor(r, g, b) = plasma(0.0625);
        assert_eq!((r, g, b), (42, 6, 147));
    }
}
