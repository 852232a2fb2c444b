//! Startup constants.
//!
//! Nothing here is read from the command line, a file or the
//! environment. `Settings::default()` is the configuration of every run;
//! tests build their own to shrink buffers or pin radii.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::display::{INTERNAL_HEIGHT, INTERNAL_WIDTH, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error::{Error, Result};
use crate::noise::NoiseConfig;

pub const WINDOW_TITLE: &str = "Rotating Earth with Perlin Noise and Day-Night Cycle";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub title: String,
    pub internal_width: u32,
    pub internal_height: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,

    pub star_count: usize,
    /// Vertical star speed in internal pixels per frame
    pub star_speed: (f32, f32),
    pub star_size: i32,

    pub planet_radius: RangeInclusive<i32>,
    /// Added to the planet radius to get the cloud radius
    pub cloud_radius_offset: RangeInclusive<i32>,
    pub seed_range: RangeInclusive<u32>,

    /// Radians per frame
    pub rotation_speed_y: f32,
    pub rotation_speed_x: f32,

    pub terrain_noise: NoiseConfig,
    pub cloud_noise: NoiseConfig,
    pub cloud_threshold: f32,
    pub cloud_drift_speed: f32,
    pub cloud_alpha: f32,

    /// Pixel stride of the sphere passes; 1 samples every pixel
    pub render_step: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            internal_width: INTERNAL_WIDTH,
            internal_height: INTERNAL_HEIGHT,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            target_fps: 60,
            star_count: 300,
            star_speed: (0.05, 0.2),
            star_size: 1,
            planet_radius: 30..=50,
            cloud_radius_offset: 5..=10,
            seed_range: 900..=1000,
            rotation_speed_y: 0.02,
            rotation_speed_x: 0.01,
            terrain_noise: NoiseConfig::TERRAIN,
            cloud_noise: NoiseConfig::CLOUDS,
            cloud_threshold: 0.6,
            cloud_drift_speed: 0.25,
            cloud_alpha: 0.5,
            render_step: 1,
        }
    }
}

impl Settings {
    /// Reject constants the renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::InvalidSettings(msg));

        if self.internal_width == 0 || self.internal_height == 0 {
            return fail(format!(
                "internal resolution {}x{} is empty",
                self.internal_width, self.internal_height
            ));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return fail("window size is empty".to_string());
        }
        if self.target_fps == 0 {
            return fail("target_fps must be positive".to_string());
        }
        if self.render_step == 0 {
            return fail("render_step must be at least 1".to_string());
        }
        if self.planet_radius.is_empty() || *self.planet_radius.start() < 0 {
            return fail(format!("bad planet radius range {:?}", self.planet_radius));
        }
        if self.cloud_radius_offset.is_empty() || *self.cloud_radius_offset.start() <= 0 {
            return fail(format!(
                "cloud radius offset {:?} must be strictly positive",
                self.cloud_radius_offset
            ));
        }
        if self.seed_range.is_empty() {
            return fail(format!("empty seed range {:?}", self.seed_range));
        }
        if !(0.0..=1.0).contains(&self.cloud_threshold) {
            return fail(format!("cloud threshold {} outside [0, 1]", self.cloud_threshold));
        }
        if !(0.0..=1.0).contains(&self.cloud_alpha) {
            return fail(format!("cloud alpha {} outside [0, 1]", self.cloud_alpha));
        }
        let (lo, hi) = self.star_speed;
        if !(lo >= 0.0 && lo < hi) {
            return fail(format!("bad star speed range {}..{}", lo, hi));
        }
        if self.terrain_noise.octaves == 0 || self.cloud_noise.octaves == 0 {
            return fail("noise needs at least one octave".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.internal_width * 3, settings.window_width);
        assert_eq!(settings.internal_height * 3, settings.window_height);
    }

    #[test]
    fn test_zero_render_step_rejected() {
        let settings = Settings {
            render_step: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::InvalidSettings(_))));
    }

    #[test]
    fn test_cloud_must_be_outside_planet() {
        let settings = Settings {
            cloud_radius_offset: 0..=4,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_threshold_range() {
        let settings = Settings {
            cloud_threshold: 1.5,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"cloud_threshold\":0.6"));
        assert!(json.contains("\"render_step\":1"));
    }
}
