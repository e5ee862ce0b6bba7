use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Mix, Srgb};

// ---------------------------------------------------------------------------
// Fixed chart colours
// ---------------------------------------------------------------------------

pub const LIGHT_CORAL: Color32 = Color32::from_rgb(240, 128, 128);
pub const SKY_BLUE: Color32 = Color32::from_rgb(135, 206, 235);
pub const CASUAL_BLUE: Color32 = Color32::from_rgb(0, 0, 255);
pub const REGISTERED_RED: Color32 = Color32::from_rgb(255, 0, 0);

/// Pie colours, weekend slice first.
pub const WORKING_DAY_COLORS: [Color32; 2] = [LIGHT_CORAL, SKY_BLUE];

// ---------------------------------------------------------------------------
// Viridis
// ---------------------------------------------------------------------------

/// Viridis sampled at every tenth of its range.
const VIRIDIS_ANCHORS: [(u8, u8, u8); 11] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x24, 0x75),
    (0x41, 0x44, 0x87),
    (0x35, 0x5f, 0x8d),
    (0x2a, 0x78, 0x8e),
    (0x21, 0x91, 0x8c),
    (0x22, 0xa8, 0x84),
    (0x44, 0xbf, 0x70),
    (0x7a, 0xd1, 0x51),
    (0xbd, 0xdf, 0x26),
    (0xfd, 0xe7, 0x25),
];

fn to_color32(rgb: Srgb<f32>) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

fn anchor(idx: usize) -> Srgb<f32> {
    let (r, g, b) = VIRIDIS_ANCHORS[idx];
    Srgb::new(r, g, b).into_format()
}

/// Colour at position `t` (clamped to 0..=1) along the viridis scale.
pub fn viridis_at(t: f32) -> Color32 {
    let last = VIRIDIS_ANCHORS.len() - 1;
    let scaled = t.clamp(0.0, 1.0) * last as f32;
    let idx = (scaled.floor() as usize).min(last - 1);
    let frac = scaled - idx as f32;
    to_color32(anchor(idx).mix(anchor(idx + 1), frac))
}

/// `n` viridis colours, dark to bright.
///
/// Samples the interior of the scale at `(i + 1) / (n + 1)` so neither the
/// darkest nor the brightest end is used.
pub fn viridis(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| viridis_at((i + 1) as f32 / (n + 1) as f32))
        .collect()
}

// ---------------------------------------------------------------------------
// Category → colour
// ---------------------------------------------------------------------------

/// Assigns viridis colours to category labels in the order given.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    pub fn viridis<'a>(labels: impl ExactSizeIterator<Item = &'a str>) -> Self {
        let palette = viridis(labels.len());
        let mapping = labels
            .zip(palette)
            .map(|(label, c)| (label.to_string(), c))
            .collect();
        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}
