//! Sprite geometry and palettes
//!
//! Every sprite is a list of filled rectangles in a small local pixel
//! grid, scaled up at draw time with image smoothing off. Keeping the
//! geometry here, free of any canvas types, lets the shapes be checked
//! natively.

use crate::consts::GROUND_HEIGHT;
use crate::sim::TreeVariant;

/// One filled rectangle of a sprite, in sprite-local pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub color: &'static str,
}

const fn r(x: f64, y: f64, w: f64, h: f64, color: &'static str) -> SpriteRect {
    SpriteRect { x, y, w, h, color }
}

/// The player bitmap is authored on a 40x40 grid
pub const PLAYER_BASE_SIZE: f64 = 40.0;
/// The coin bitmap is authored on a 20x20 grid
pub const COIN_BASE_SIZE: f64 = 20.0;

const TURBAN_RED: &str = "#d92525";
const TURBAN_DARK: &str = "#a61c1c";
const SKIN: &str = "#f2c38f";
const BEARD: &str = "#b0b0b0";
const MUSTACHE: &str = "#8e8e8e";
const EYES: &str = "#3e6bff";
const BLACK: &str = "#000000";

/// The player: a turbaned, bearded face on a 40x40 grid
pub const PLAYER_PIXELS: &[SpriteRect] = &[
    // Turban
    r(4.0, 0.0, 32.0, 16.0, TURBAN_RED),
    r(0.0, 4.0, 40.0, 8.0, TURBAN_RED),
    r(14.0, 4.0, 12.0, 12.0, TURBAN_DARK),
    // Face
    r(8.0, 16.0, 24.0, 12.0, SKIN),
    // Beard
    r(8.0, 28.0, 24.0, 8.0, BEARD),
    r(4.0, 24.0, 32.0, 4.0, BEARD),
    // Eyes
    r(12.0, 20.0, 6.0, 6.0, EYES),
    r(22.0, 20.0, 6.0, 6.0, EYES),
    r(14.0, 22.0, 2.0, 2.0, BLACK),
    r(24.0, 22.0, 2.0, 2.0, BLACK),
    // Mustache
    r(10.0, 26.0, 20.0, 2.0, MUSTACHE),
    r(6.0, 24.0, 4.0, 2.0, MUSTACHE),
    r(30.0, 24.0, 4.0, 2.0, MUSTACHE),
];

const COIN_DARK_GOLD: &str = "#b1560f";
const COIN_GOLD: &str = "#f3a614";
const COIN_LIGHT_GOLD: &str = "#ffd52c";
const COIN_DARK_BROWN: &str = "#4e2a01";
const COIN_BROWN: &str = "#794c1d";

/// A gold coin with a square cutout, on a 20x20 grid
pub const COIN_PIXELS: &[SpriteRect] = &[
    // Outline
    r(7.0, 0.0, 6.0, 1.0, COIN_DARK_BROWN),
    r(6.0, 1.0, 8.0, 1.0, COIN_DARK_BROWN),
    r(5.0, 2.0, 10.0, 1.0, COIN_DARK_BROWN),
    r(4.0, 3.0, 12.0, 1.0, COIN_DARK_BROWN),
    r(3.0, 4.0, 14.0, 1.0, COIN_DARK_BROWN),
    r(3.0, 5.0, 1.0, 10.0, COIN_DARK_BROWN),
    r(2.0, 6.0, 1.0, 8.0, COIN_DARK_BROWN),
    r(1.0, 7.0, 1.0, 6.0, COIN_DARK_BROWN),
    r(0.0, 8.0, 1.0, 4.0, COIN_DARK_BROWN),
    r(1.0, 13.0, 1.0, 1.0, COIN_DARK_BROWN),
    r(2.0, 14.0, 1.0, 2.0, COIN_DARK_BROWN),
    r(3.0, 15.0, 1.0, 1.0, COIN_DARK_BROWN),
    r(4.0, 16.0, 12.0, 1.0, COIN_DARK_BROWN),
    r(5.0, 17.0, 10.0, 1.0, COIN_DARK_BROWN),
    r(6.0, 18.0, 8.0, 1.0, COIN_DARK_BROWN),
    r(7.0, 19.0, 6.0, 1.0, COIN_DARK_BROWN),
    r(16.0, 4.0, 1.0, 12.0, COIN_DARK_BROWN),
    r(17.0, 5.0, 1.0, 10.0, COIN_DARK_BROWN),
    r(18.0, 6.0, 1.0, 8.0, COIN_DARK_BROWN),
    r(19.0, 8.0, 1.0, 4.0, COIN_DARK_BROWN),
    // Rim
    r(7.0, 1.0, 6.0, 1.0, COIN_BROWN),
    r(6.0, 2.0, 1.0, 1.0, COIN_BROWN),
    r(13.0, 2.0, 1.0, 1.0, COIN_BROWN),
    r(5.0, 3.0, 1.0, 1.0, COIN_BROWN),
    r(14.0, 3.0, 1.0, 1.0, COIN_BROWN),
    r(4.0, 4.0, 1.0, 12.0, COIN_BROWN),
    r(15.0, 4.0, 1.0, 12.0, COIN_BROWN),
    r(5.0, 16.0, 1.0, 1.0, COIN_BROWN),
    r(14.0, 16.0, 1.0, 1.0, COIN_BROWN),
    r(6.0, 17.0, 1.0, 1.0, COIN_BROWN),
    r(13.0, 17.0, 1.0, 1.0, COIN_BROWN),
    r(7.0, 18.0, 6.0, 1.0, COIN_BROWN),
    // Body shading
    r(8.0, 1.0, 4.0, 1.0, COIN_DARK_GOLD),
    r(7.0, 2.0, 6.0, 1.0, COIN_DARK_GOLD),
    r(6.0, 3.0, 8.0, 1.0, COIN_DARK_GOLD),
    r(5.0, 4.0, 10.0, 1.0, COIN_DARK_GOLD),
    r(5.0, 5.0, 10.0, 10.0, COIN_DARK_GOLD),
    r(6.0, 15.0, 8.0, 1.0, COIN_DARK_GOLD),
    r(7.0, 16.0, 6.0, 1.0, COIN_DARK_GOLD),
    r(8.0, 17.0, 4.0, 1.0, COIN_DARK_GOLD),
    r(8.0, 2.0, 4.0, 1.0, COIN_GOLD),
    r(7.0, 3.0, 6.0, 1.0, COIN_GOLD),
    r(6.0, 4.0, 8.0, 1.0, COIN_GOLD),
    r(6.0, 5.0, 8.0, 9.0, COIN_GOLD),
    r(7.0, 14.0, 6.0, 1.0, COIN_GOLD),
    r(8.0, 15.0, 4.0, 1.0, COIN_GOLD),
    r(9.0, 16.0, 2.0, 1.0, COIN_GOLD),
    r(9.0, 3.0, 2.0, 1.0, COIN_LIGHT_GOLD),
    r(8.0, 4.0, 4.0, 1.0, COIN_LIGHT_GOLD),
    r(7.0, 5.0, 6.0, 1.0, COIN_LIGHT_GOLD),
    r(7.0, 6.0, 6.0, 7.0, COIN_LIGHT_GOLD),
    r(8.0, 13.0, 4.0, 1.0, COIN_LIGHT_GOLD),
    r(9.0, 14.0, 2.0, 1.0, COIN_LIGHT_GOLD),
    // Square cutout
    r(7.0, 8.0, 1.0, 4.0, COIN_BROWN),
    r(8.0, 7.0, 3.0, 1.0, COIN_BROWN),
    r(11.0, 8.0, 1.0, 4.0, COIN_BROWN),
    r(8.0, 11.0, 3.0, 1.0, COIN_BROWN),
];

/// Pipe palette
pub const PIPE_MAIN: &str = "#ff0000";
pub const PIPE_HIGHLIGHT: &str = "#ff6b6b";
pub const PIPE_SHADOW: &str = "#c40000";
pub const PIPE_DARK: &str = "#8b0000";
pub const PIPE_BLACK: &str = "#000000";

const TRUNK: &str = "#654321";
const LEAVES: &str = "#006400";
const LEAF_HIGHLIGHT: &str = "#228B22";

/// Sky, noise and ground palette for the pre-rendered background
pub const SKY_TOP: &str = "#87CEEB";
pub const SKY_BOTTOM: &str = "#e8f4e0";
pub const GROUND: &str = "#A0522D";
pub const GROUND_LIP: &str = "#228B22";

fn px(v: f64) -> f64 {
    v.floor()
}

/// A cloud blob: three stacked bars widening toward the middle.
/// Colorless; the caller picks the tint.
pub fn cloud_rects(x: f64, y: f64, size: f64) -> [(f64, f64, f64, f64); 3] {
    let x = px(x);
    let y = px(y);
    let s = px(size);
    let bar = px(s / 3.0);
    [
        (x, y, s, bar),
        (x - px(s / 4.0), y + bar, px(s * 1.5), bar),
        (x + px(s / 8.0), y + bar * 2.0, px(s * 0.8), bar),
    ]
}

/// A tree standing on the ground line: trunk, canopy, highlights
pub fn tree_rects(x: f64, size: f64, variant: TreeVariant, surface_height: f64) -> Vec<SpriteRect> {
    let ground_y = surface_height - GROUND_HEIGHT as f64;
    let x = px(x);
    let s = px(size);
    let top = ground_y - s;

    let trunk_w = px(s / 5.0);
    let trunk_h = px(s / 3.0);
    let trunk_x = x + px(s / 2.0) - px(trunk_w / 2.0);

    let mut rects = vec![r(trunk_x, top + s - trunk_h, trunk_w, trunk_h, TRUNK)];
    match variant {
        TreeVariant::Pine => {
            rects.extend([
                r(x, top + px(s * 0.6), s, px(s * 0.4), LEAVES),
                r(x + px(s * 0.1), top + px(s * 0.3), px(s * 0.8), px(s * 0.4), LEAVES),
                r(x + px(s * 0.2), top, px(s * 0.6), px(s * 0.4), LEAVES),
                r(x + px(s * 0.1), top + px(s * 0.6), px(s * 0.8), px(s * 0.1), LEAF_HIGHLIGHT),
                r(x + px(s * 0.2), top + px(s * 0.3), px(s * 0.6), px(s * 0.1), LEAF_HIGHLIGHT),
                r(x + px(s * 0.3), top, px(s * 0.4), px(s * 0.1), LEAF_HIGHLIGHT),
            ]);
        }
        TreeVariant::Round => {
            rects.extend([
                r(x, top + px(s * 0.2), s, px(s * 0.8), LEAVES),
                r(x + px(s * 0.2), top, px(s * 0.6), s, LEAVES),
                r(x + px(s * 0.1), top + px(s * 0.1), px(s * 0.8), px(s * 0.2), LEAF_HIGHLIGHT),
                r(x + px(s * 0.3), top + px(s * 0.4), px(s * 0.4), px(s * 0.2), LEAF_HIGHLIGHT),
            ]);
        }
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_grid(pixels: &[SpriteRect], size: f64) {
        for rect in pixels {
            assert!(rect.x >= 0.0 && rect.x + rect.w <= size, "{rect:?}");
            assert!(rect.y >= 0.0 && rect.y + rect.h <= size, "{rect:?}");
            assert!(rect.w > 0.0 && rect.h > 0.0, "{rect:?}");
        }
    }

    #[test]
    fn test_player_fits_its_grid() {
        within_grid(PLAYER_PIXELS, PLAYER_BASE_SIZE);
    }

    #[test]
    fn test_coin_fits_its_grid() {
        within_grid(COIN_PIXELS, COIN_BASE_SIZE);
    }

    #[test]
    fn test_cloud_widest_bar_in_middle() {
        let [top, middle, bottom] = cloud_rects(100.0, 50.0, 60.0);
        assert!(middle.2 > top.2);
        assert!(middle.2 > bottom.2);
        assert!(middle.0 < top.0);
        // Three bars stack without gaps
        assert_eq!(top.1 + top.3, middle.1);
        assert_eq!(middle.1 + middle.3, bottom.1);
    }

    #[test]
    fn test_tree_stands_on_ground_line() {
        for variant in [TreeVariant::Pine, TreeVariant::Round] {
            let rects = tree_rects(200.0, 50.0, variant, 640.0);
            let ground_y = 640.0 - GROUND_HEIGHT as f64;
            for rect in &rects {
                assert!(rect.y >= ground_y - 50.0, "{rect:?}");
                assert!(rect.y + rect.h <= ground_y, "{rect:?}");
            }
            // Trunk comes first and touches the ground
            let trunk = rects[0];
            assert_eq!(trunk.y + trunk.h, ground_y);
        }
    }

    #[test]
    fn test_tree_variants_differ() {
        let pine = tree_rects(0.0, 40.0, TreeVariant::Pine, 640.0);
        let round = tree_rects(0.0, 40.0, TreeVariant::Round, 640.0);
        assert_ne!(pine, round);
    }
}
