//! Nearest-color palette mapping.

use serde::{Deserialize, Serialize};

use super::{Palette, Rgb};
use crate::decode::Raster;

/// Color distance used for nearest-entry search.
///
/// Both metrics are exact integer squared distances, so comparisons are
/// total and reproducible across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Plain squared Euclidean distance in RGB.
    #[default]
    Euclidean,
    /// Squared distance weighted 3:6:1 (R:G:B) to favor perceived brightness.
    Weighted,
}

impl DistanceMetric {
    /// Squared distance between two colors.
    #[inline]
    pub fn distance(self, a: Rgb, b: Rgb) -> u32 {
        let dr = a.r as i32 - b.r as i32;
        let dg = a.g as i32 - b.g as i32;
        let db = a.b as i32 - b.b as i32;
        let (wr, wg, wb) = match self {
            DistanceMetric::Euclidean => (1, 1, 1),
            DistanceMetric::Weighted => (3, 6, 1),
        };
        (wr * dr * dr + wg * dg * dg + wb * db * db) as u32
    }
}

/// Find the palette entry closest to `color`.
///
/// Ties resolve to the entry declared first.
pub fn nearest_color(palette: &Palette, color: Rgb, metric: DistanceMetric) -> Rgb {
    let mut colors = palette.colors().iter().copied();
    // Palettes are validated non-empty on construction
    let mut best = colors.next().unwrap_or(color);
    let mut best_distance = metric.distance(color, best);

    for candidate in colors {
        if best_distance == 0 {
            break;
        }
        let d = metric.distance(color, candidate);
        if d < best_distance {
            best = candidate;
            best_distance = d;
        }
    }
    best
}

/// Replace every pixel's RGB with its nearest palette entry.
///
/// Alpha passes through unchanged. With `palette == None` the raster is
/// returned as-is.
pub fn map_to_palette(raster: Raster, palette: Option<&Palette>, metric: DistanceMetric) -> Raster {
    let Some(palette) = palette else {
        return raster;
    };

    let (width, height) = raster.dimensions();
    let pixels = raster
        .into_pixels()
        .into_iter()
        .map(|px| nearest_color(palette, Rgb::from_rgba(px), metric).with_alpha(px[3]))
        .collect();

    log::debug!(
        "Mapped {}x{} raster onto palette '{}' ({} colors, {:?})",
        width,
        height,
        palette.name(),
        palette.colors().len(),
        metric
    );

    Raster::from_parts(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteRegistry;

    fn black_white() -> Palette {
        Palette::new("bw", vec![Rgb::BLACK, Rgb::WHITE]).unwrap()
    }

    fn single_pixel(px: [u8; 4]) -> Raster {
        Raster::new(1, 1, vec![px]).unwrap()
    }

    #[test]
    fn test_distance_euclidean() {
        let d = DistanceMetric::Euclidean.distance(Rgb::new(0, 0, 0), Rgb::new(3, 4, 0));
        assert_eq!(d, 25);
        assert_eq!(
            DistanceMetric::Euclidean.distance(Rgb::BLACK, Rgb::WHITE),
            3 * 255 * 255
        );
    }

    #[test]
    fn test_distance_weighted() {
        let d = DistanceMetric::Weighted.distance(Rgb::new(1, 1, 1), Rgb::new(0, 0, 0));
        assert_eq!(d, 10);
        assert_eq!(
            DistanceMetric::Weighted.distance(Rgb::BLACK, Rgb::WHITE),
            10 * 255 * 255
        );
    }

    #[test]
    fn test_gray_boundary_127_vs_128() {
        let palette = black_white();
        let metric = DistanceMetric::Euclidean;
        assert_eq!(nearest_color(&palette, Rgb::new(127, 127, 127), metric), Rgb::BLACK);
        assert_eq!(nearest_color(&palette, Rgb::new(128, 128, 128), metric), Rgb::WHITE);
    }

    #[test]
    fn test_channel_sum_threshold() {
        // Black iff r + g + b <= 382
        let palette = black_white();
        let metric = DistanceMetric::Euclidean;
        assert_eq!(nearest_color(&palette, Rgb::new(255, 127, 0), metric), Rgb::BLACK);
        assert_eq!(nearest_color(&palette, Rgb::new(255, 128, 0), metric), Rgb::WHITE);
    }

    #[test]
    fn test_tie_goes_to_first_entry() {
        let palette = Palette::new(
            "tie",
            vec![Rgb::new(0, 0, 10), Rgb::new(0, 0, 0), Rgb::new(0, 0, 20)],
        )
        .unwrap();
        // (0,0,10) is the exact match
        assert_eq!(
            nearest_color(&palette, Rgb::new(0, 0, 10), DistanceMetric::Euclidean),
            Rgb::new(0, 0, 10)
        );
        // (0,0,5) is equidistant from the first two entries
        assert_eq!(
            nearest_color(&palette, Rgb::new(0, 0, 5), DistanceMetric::Euclidean),
            Rgb::new(0, 0, 10)
        );
        // (0,0,15) is equidistant from the first and last entries
        assert_eq!(
            nearest_color(&palette, Rgb::new(0, 0, 15), DistanceMetric::Euclidean),
            Rgb::new(0, 0, 10)
        );
    }

    #[test]
    fn test_alpha_passes_through() {
        let result = map_to_palette(
            single_pixel([200, 210, 220, 37]),
            Some(&black_white()),
            DistanceMetric::Euclidean,
        );
        assert_eq!(result.pixel(0, 0), [255, 255, 255, 37]);
    }

    #[test]
    fn test_none_palette_is_identity() {
        let raster = Raster::new(2, 1, vec![[1, 2, 3, 4], [5, 6, 7, 8]]).unwrap();
        let result = map_to_palette(raster.clone(), None, DistanceMetric::Euclidean);
        assert_eq!(result, raster);
    }

    #[test]
    fn test_metrics_can_disagree() {
        let palette = Palette::new("pair", vec![Rgb::new(0, 40, 0), Rgb::new(0, 0, 50)]).unwrap();
        // Euclidean: 40² = 1600 vs 50² = 2500
        assert_eq!(
            nearest_color(&palette, Rgb::BLACK, DistanceMetric::Euclidean),
            Rgb::new(0, 40, 0)
        );
        // Weighted: 6·40² = 9600 vs 1·50² = 2500
        assert_eq!(
            nearest_color(&palette, Rgb::BLACK, DistanceMetric::Weighted),
            Rgb::new(0, 0, 50)
        );
    }

    #[test]
    fn test_gameboy_mapping() {
        let registry = PaletteRegistry::builtin();
        let gameboy = registry.get("gameboy").unwrap();
        let raster = Raster::new(2, 1, vec![[0, 0, 0, 255], [255, 255, 255, 255]]).unwrap();
        let result = map_to_palette(raster, Some(gameboy), DistanceMetric::Euclidean);
        assert_eq!(result.pixel(0, 0), [15, 56, 15, 255]);
        assert_eq!(result.pixel(1, 0), [155, 188, 15, 255]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
