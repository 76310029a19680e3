use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

/// Colour for a normalized heatmap weight: cold blue at 0, hot red at 1.
pub fn heat_color(weight: f64) -> Color32 {
    let w = weight.clamp(0.0, 1.0) as f32;
    let hue = 240.0 * (1.0 - w);
    hsl_to_color32(Hsl::new(hue, 0.85, 0.5))
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of a categorical column (age brackets, industries)
/// to stable distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map over the given labels; colour follows the
    /// label's position in the iteration order.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let palette = generate_palette(labels.len());
        let mapping: BTreeMap<String, Color32> =
            labels.into_iter().zip(palette.into_iter()).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colors() {
        let colors = generate_palette(12);
        assert_eq!(colors.len(), 12);
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn heat_color_is_defined_at_the_extremes() {
        // 0 → blue-ish, 1 → red-ish
        let cold = heat_color(0.0);
        let hot = heat_color(1.0);
        assert!(cold.b() > cold.r());
        assert!(hot.r() > hot.b());
        // out-of-range weights clamp instead of wrapping the hue
        assert_eq!(heat_color(1.5), hot);
        assert_eq!(heat_color(-0.5), cold);
    }

    #[test]
    fn unknown_label_falls_back_to_default() {
        let cm = ColorMap::new(["20-24", "25-29"]);
        assert_eq!(cm.color_for("65+"), Color32::GRAY);
        assert_ne!(cm.color_for("20-24"), cm.color_for("25-29"));
    }
}
