//! Biome palette, height-to-biome mapping and per-pixel shading.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An opaque RGB triple, as the pixel buffer takes it
pub type Rgb = (u8, u8, u8);

/// Per-channel amount removed from the ocean color to get deep ocean
pub const DEEP_OCEAN_OFFSET: u8 = 60;

/// Extra brightness given to beaches so they read even on the night side
pub const BEACH_BOOST: f32 = 0.2;

/// Darken a color by subtracting a fixed amount from each channel, floored at 0
#[inline]
pub fn darken(color: Rgb, amount: u8) -> Rgb {
    (
        color.0.saturating_sub(amount),
        color.1.saturating_sub(amount),
        color.2.saturating_sub(amount),
    )
}

/// Scale each channel by `multiplier`, truncating and clamping to 255
#[inline]
pub fn shade(color: Rgb, multiplier: f32) -> Rgb {
    let channel = |c: u8| (c as f32 * multiplier).min(255.0) as u8;
    (channel(color.0), channel(color.1), channel(color.2))
}

/// Terrain category selected from a normalised height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    DeepOcean,
    Ocean,
    Beach,
    Forest,
    Mountain,
}

impl Biome {
    /// Half-open buckets, lower bound inclusive
    pub fn from_height(h: f32) -> Self {
        if h < 0.35 {
            Self::DeepOcean
        } else if h < 0.50 {
            Self::Ocean
        } else if h < 0.52 {
            Self::Beach
        } else if h < 0.65 {
            Self::Forest
        } else {
            Self::Mountain
        }
    }

    /// Multiplier applied to the base color for a given light brightness
    #[inline]
    pub fn shading_multiplier(self, brightness: f32) -> f32 {
        match self {
            Self::Beach => (brightness + BEACH_BOOST).min(1.0),
            _ => brightness,
        }
    }
}

/// Six colors for one run: generated once at startup, never changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub ocean: Rgb,
    pub deep_ocean: Rgb,
    pub beach: Rgb,
    pub forest: Rgb,
    pub mountain: Rgb,
    pub cloud: Rgb,
}

impl ColorPalette {
    /// Build a palette, deriving deep ocean from the ocean color
    pub fn new(ocean: Rgb, beach: Rgb, forest: Rgb, mountain: Rgb, cloud: Rgb) -> Self {
        Self {
            ocean,
            deep_ocean: darken(ocean, DEEP_OCEAN_OFFSET),
            beach,
            forest,
            mountain,
            cloud,
        }
    }

    /// Five independent uniformly random colors plus the derived deep ocean
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut random_color = || -> Rgb { (rng.gen(), rng.gen(), rng.gen()) };
        let ocean = random_color();
        let beach = random_color();
        let forest = random_color();
        let mountain = random_color();
        let cloud = random_color();
        Self::new(ocean, beach, forest, mountain, cloud)
    }

    #[inline]
    pub fn base_color(&self, biome: Biome) -> Rgb {
        match biome {
            Biome::DeepOcean => self.deep_ocean,
            Biome::Ocean => self.ocean,
            Biome::Beach => self.beach,
            Biome::Forest => self.forest,
            Biome::Mountain => self.mountain,
        }
    }

    /// Shaded terrain color for a height under the given brightness
    #[inline]
    pub fn terrain_color(&self, h: f32, brightness: f32) -> Rgb {
        let biome = Biome::from_height(h);
        shade(self.base_color(biome), biome.shading_multiplier(brightness))
    }

    /// Shaded cloud color; clouds get no beach-style boost
    #[inline]
    pub fn cloud_color(&self, brightness: f32) -> Rgb {
        shade(self.cloud, brightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_palette() -> ColorPalette {
        ColorPalette::new(
            (30, 90, 200),
            (240, 220, 160),
            (40, 160, 60),
            (130, 110, 90),
            (250, 250, 255),
        )
    }

    #[test]
    fn test_biome_buckets() {
        assert_eq!(Biome::from_height(0.0), Biome::DeepOcean);
        assert_eq!(Biome::from_height(0.349), Biome::DeepOcean);
        assert_eq!(Biome::from_height(0.4), Biome::Ocean);
        assert_eq!(Biome::from_height(0.51), Biome::Beach);
        assert_eq!(Biome::from_height(0.6), Biome::Forest);
        assert_eq!(Biome::from_height(0.9), Biome::Mountain);
        assert_eq!(Biome::from_height(1.0), Biome::Mountain);
    }

    #[test]
    fn test_boundaries_select_upper_bucket() {
        assert_eq!(Biome::from_height(0.35), Biome::Ocean);
        assert_eq!(Biome::from_height(0.50), Biome::Beach);
        assert_eq!(Biome::from_height(0.52), Biome::Forest);
        assert_eq!(Biome::from_height(0.65), Biome::Mountain);
    }

    #[test]
    fn test_shade_truncates_and_clamps() {
        assert_eq!(shade((255, 100, 3), 0.5), (127, 50, 1));
        assert_eq!(shade((255, 255, 255), 1.0), (255, 255, 255));
        assert_eq!(shade((200, 0, 10), 0.1), (20, 0, 1));
    }

    #[test]
    fn test_beach_boost_diverges_near_full_brightness() {
        let palette = test_palette();
        let beach_h = 0.51;
        let forest_h = 0.6;
        let b = 0.85;
        // Beach: min(0.85 + 0.2, 1.0) = 1.0
        assert_eq!(palette.terrain_color(beach_h, b), palette.beach);
        assert_eq!(palette.terrain_color(forest_h, b), shade(palette.forest, b));
        assert_ne!(palette.terrain_color(forest_h, b), palette.forest);
        for b in [0.9_f32, 0.95, 1.0] {
            assert_eq!(palette.terrain_color(beach_h, b), palette.beach);
            assert_eq!(palette.terrain_color(forest_h, b), shade(palette.forest, b));
        }
    }

    #[test]
    fn test_beach_boost_at_ambient() {
        assert!((Biome::Beach.shading_multiplier(0.1) - 0.3).abs() < 1e-6);
        assert_eq!(Biome::Ocean.shading_multiplier(0.1), 0.1);
        assert_eq!(Biome::Mountain.shading_multiplier(0.7), 0.7);
    }

    #[test]
    fn test_cloud_has_no_boost() {
        let palette = test_palette();
        assert_eq!(palette.cloud_color(0.5), shade(palette.cloud, 0.5));
    }

    #[test]
    fn test_deep_ocean_derivation() {
        let palette = ColorPalette::new((10, 60, 61), (0, 0, 0), (0, 0, 0), (0, 0, 0), (0, 0, 0));
        assert_eq!(palette.deep_ocean, (0, 0, 1));

        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..500 {
            let p = ColorPalette::generate(&mut rng);
            let expected = |c: u8| c.saturating_sub(DEEP_OCEAN_OFFSET);
            assert_eq!(p.deep_ocean.0, expected(p.ocean.0));
            assert_eq!(p.deep_ocean.1, expected(p.ocean.1));
            assert_eq!(p.deep_ocean.2, expected(p.ocean.2));
        }
    }

    #[test]
    fn test_generate_is_seed_deterministic() {
        let a = ColorPalette::generate(&mut StdRng::seed_from_u64(7));
        let b = ColorPalette::generate(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
