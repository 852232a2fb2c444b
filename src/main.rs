use pixel_planet::display::{Display, InputEvent, RenderTarget};
use pixel_planet::logging::init_logging;
use pixel_planet::timing::FrameLimiter;
use pixel_planet::{run, Error, EventSource, FrameSink, Orchestrator, PixelBuffer, Settings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, Level};

/// FPS averaging window, in frames
const FPS_SAMPLES: usize = 60;

/// The SDL window as the frame loop sees it: input in, frames out
struct Screen<'a> {
    display: Display,
    target: RenderTarget<'a>,
}

impl FrameSink for Screen<'_> {
    fn present(&mut self, buffer: &PixelBuffer) -> pixel_planet::Result<()> {
        self.display.present(&mut self.target, buffer)
    }
}

impl EventSource for Screen<'_> {
    fn termination_requested(&mut self) -> bool {
        self.display
            .poll_events()
            .iter()
            .any(|event| matches!(event, InputEvent::Quit))
    }
}

fn start() -> Result<(), Error> {
    let settings = Settings::default();
    if let Ok(json) = serde_json::to_string(&settings) {
        debug!(settings = %json, "effective settings");
    }

    let mut rng = StdRng::from_entropy();
    let mut orchestrator = Orchestrator::new(settings.clone(), &mut rng)?;
    if tracing::enabled!(Level::DEBUG) {
        orchestrator = orchestrator.with_diagnostics();
    }

    info!(
        width = settings.internal_width,
        height = settings.internal_height,
        window_width = settings.window_width,
        window_height = settings.window_height,
        fps = settings.target_fps,
        "pixel-planet starting"
    );

    let (display, texture_creator) =
        Display::open(&settings.title, settings.window_width, settings.window_height)?;
    let target = RenderTarget::with_size(
        &texture_creator,
        settings.internal_width,
        settings.internal_height,
    )?;
    let mut screen = Screen { display, target };

    let mut limiter = FrameLimiter::new(settings.target_fps, FPS_SAMPLES);
    let result = run(&mut orchestrator, &mut screen, &mut limiter);

    if let Some(histogram) = orchestrator.histogram() {
        debug!(heights = %histogram.to_json(), "terrain height histogram");
    }
    info!(frames = orchestrator.frames(), fps = limiter.avg_fps(), "stopped");

    result
}

fn main() -> Result<(), Error> {
    init_logging();

    start().map_err(|e| {
        error!("{}", e);
        e
    })
}
