use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::RoofCategory;

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
            let hsl = Hsl::new(hue, 0.65, 0.50);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: roof category → Color32
// ---------------------------------------------------------------------------

/// One fixed colour per roof category so the KPI swatches, every chart, and
/// every legend agree.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<RoofCategory, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn roof_default() -> Self {
        let palette = generate_palette(RoofCategory::ALL.len());
        let mapping: BTreeMap<RoofCategory, Color32> =
            RoofCategory::ALL.into_iter().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, cat: RoofCategory) -> Color32 {
        self.mapping.get(&cat).copied().unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(4).len(), 4);
    }

    #[test]
    fn categories_get_distinct_colours() {
        let map = ColorMap::roof_default();
        assert_ne!(
            map.color_for(RoofCategory::Indoor),
            map.color_for(RoofCategory::Outdoor)
        );
    }
}
