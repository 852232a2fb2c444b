//! Frame orchestration.
//!
//! [`Orchestrator`] exclusively owns the planet, cloud and star state and
//! the pixel buffer. Each tick advances the state and renders one complete
//! frame; [`run`] drives ticks against a screen until it reports a
//! termination request.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::clouds::{render_clouds, CloudState};
use crate::diagnostics::HeightHistogram;
use crate::display::PixelBuffer;
use crate::error::Result;
use crate::lighting::Light;
use crate::math3d::Rotation;
use crate::noise::FractalPerlin;
use crate::palette::ColorPalette;
use crate::planet::{render_terrain, PlanetState};
use crate::settings::Settings;
use crate::starfield::Starfield;
use crate::timing::FrameLimiter;

/// Frames between periodic timing logs
const LOG_EVERY: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Terminal: no further frames are produced
    Shutdown,
}

/// Receives each completed frame (upscaling and presentation live behind it)
pub trait FrameSink {
    fn present(&mut self, buffer: &PixelBuffer) -> Result<()>;
}

/// Source of the single input the renderer consumes
pub trait EventSource {
    /// Drain pending input; true if termination was requested
    fn termination_requested(&mut self) -> bool;
}

pub struct Orchestrator {
    settings: Settings,
    planet: PlanetState,
    clouds: CloudState,
    palette: ColorPalette,
    light: Light,
    terrain_noise: FractalPerlin,
    cloud_noise: FractalPerlin,
    starfield: Starfield,
    buffer: PixelBuffer,
    state: RunState,
    frames: u64,
    histogram: Option<HeightHistogram>,
}

impl Orchestrator {
    /// Draw every random startup value from `rng` and build the scene.
    ///
    /// The noise seed, radii, palette and star seed are drawn in that
    /// order, so a seeded `rng` reproduces a run exactly.
    pub fn new<R: Rng + ?Sized>(settings: Settings, rng: &mut R) -> Result<Self> {
        settings.validate()?;

        let seed = rng.gen_range(settings.seed_range.clone());
        let radius = rng.gen_range(settings.planet_radius.clone());
        let cloud_radius = radius + rng.gen_range(settings.cloud_radius_offset.clone());
        let palette = ColorPalette::generate(rng);
        let star_seed: u64 = rng.gen();

        let planet = PlanetState::new(radius, settings.terrain_noise, seed);
        let clouds = CloudState::new(
            cloud_radius,
            settings.cloud_noise,
            settings.cloud_threshold,
            settings.cloud_drift_speed,
            settings.cloud_alpha,
        );
        let starfield = Starfield::new(
            settings.star_count,
            settings.internal_width,
            settings.internal_height,
            settings.star_speed,
            settings.star_size,
            star_seed,
        );

        info!(seed, radius, cloud_radius, ?palette, "planet generated");

        Ok(Self {
            terrain_noise: FractalPerlin::new(&settings.terrain_noise, seed),
            cloud_noise: FractalPerlin::new(&settings.cloud_noise, seed),
            buffer: PixelBuffer::with_size(settings.internal_width, settings.internal_height),
            settings,
            planet,
            clouds,
            palette,
            light: Light::default(),
            starfield,
            state: RunState::Running,
            frames: 0,
            histogram: None,
        })
    }

    /// Replace the generated palette (fixed-palette snapshots)
    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Collect a terrain height histogram while rendering
    pub fn with_diagnostics(mut self) -> Self {
        self.histogram = Some(HeightHistogram::new());
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn planet(&self) -> &PlanetState {
        &self.planet
    }

    pub fn clouds(&self) -> &CloudState {
        &self.clouds
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn histogram(&self) -> Option<&HeightHistogram> {
        self.histogram.as_ref()
    }

    /// Pin the planet orientation (snapshots, tests)
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.planet.set_rotation(rotation);
    }

    /// Pin the cloud drift clock (snapshots, tests)
    pub fn set_cloud_elapsed(&mut self, elapsed: f32) {
        self.clouds.set_elapsed(elapsed);
    }

    /// Termination request: Running -> Shutdown
    pub fn shutdown(&mut self) {
        if self.state == RunState::Running {
            info!(frames = self.frames, "shutting down");
            self.state = RunState::Shutdown;
        }
    }

    /// One frame: advance state, then render. `None` once shut down.
    pub fn tick(&mut self, dt: f32) -> Option<&PixelBuffer> {
        if !self.is_running() {
            return None;
        }
        self.advance(dt);
        self.render();
        self.frames += 1;
        Some(&self.buffer)
    }

    /// Advance rotation by the fixed per-frame deltas, the cloud clock by
    /// `dt` seconds, and the stars by one step
    pub fn advance(&mut self, dt: f32) {
        self.planet
            .advance(self.settings.rotation_speed_y, self.settings.rotation_speed_x);
        self.clouds.advance(dt);
        self.starfield.update();
    }

    /// Render the current state into the buffer, overwriting all of it
    pub fn render(&mut self) {
        let center = (
            (self.buffer.width() / 2) as i32,
            (self.buffer.height() / 2) as i32,
        );
        let step = self.settings.render_step;

        self.buffer.clear(0, 0, 0);
        self.starfield.draw(&mut self.buffer);

        render_terrain(
            &mut self.buffer,
            center,
            &self.planet,
            &self.terrain_noise,
            &self.palette,
            &self.light,
            step,
            self.histogram.as_mut(),
        );

        render_clouds(
            &mut self.buffer,
            center,
            &self.planet.rotation(),
            &self.clouds,
            &self.cloud_noise,
            &self.palette,
            &self.light,
            step,
        );
    }
}

/// Drive frames until the screen reports a termination request.
///
/// Per frame: poll input, advance and render, present, then wait out the
/// rest of the frame interval. A presentation failure is fatal.
pub fn run<S>(
    orchestrator: &mut Orchestrator,
    screen: &mut S,
    limiter: &mut FrameLimiter,
) -> Result<()>
where
    S: EventSource + FrameSink + ?Sized,
{
    let mut dt = 0.0;
    let mut last_overrun_warning: Option<u64> = None;

    while orchestrator.is_running() {
        if screen.termination_requested() {
            orchestrator.shutdown();
            break;
        }

        if let Some(buffer) = orchestrator.tick(dt) {
            screen.present(buffer)?;
        }

        dt = limiter.finish_frame();

        let frame = orchestrator.frames();
        if limiter.overran()
            && last_overrun_warning.map_or(true, |at| frame - at >= LOG_EVERY)
        {
            warn!(
                frame,
                busy_ms = limiter.last_busy().as_secs_f32() * 1000.0,
                "frame overran its budget"
            );
            last_overrun_warning = Some(frame);
        }
        if frame % LOG_EVERY == 0 {
            debug!(
                frame,
                fps = limiter.avg_fps(),
                frame_ms = limiter.avg_frame_time_ms(),
                "timing"
            );
        }
    }

    Ok(())
}
