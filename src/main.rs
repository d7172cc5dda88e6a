//! Headless showroom driver.
//!
//! Loads a model, then runs the frame loop against a render step that only
//! logs what would be drawn. Useful to check camera re-sync and blink timing
//! of a scene without a GPU.
//!
//! ```text
//! showroom [config.json] [seconds]
//! ```

use std::thread;
use std::time::Duration;

use showroom::config::StageConfig;
use showroom::scene::{Camera, Scene};
use showroom::utils::{Clock, OrbitInput};
use showroom::{RenderStep, Session, ViewerConfig, Viewport};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Default)]
struct LogRenderStep {
    frames: u64,
}

impl RenderStep for LogRenderStep {
    fn setup(&mut self, stage: &StageConfig) {
        if let Some(env) = &stage.environment_path {
            log::info!("Environment map: {}", env.display());
        }
        log::info!(
            "Stage: sun towards {:?}, {} area light(s), {}x{} floor at y={}",
            stage.sky.sun_direction(),
            stage.area_lights.len(),
            stage.floor.width,
            stage.floor.depth,
            stage.floor.height
        );
    }

    fn render(&mut self, scene: Option<&Scene>, camera: &Camera) {
        self.frames += 1;
        if self.frames % 60 == 0 {
            log::info!(
                "frame {}: {} node(s) through '{}' at {:?}",
                self.frames,
                scene.map_or(0, Scene::len),
                camera.name,
                camera.position
            );
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::info!("Viewport resized to {width}x{height}");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ViewerConfig::from_json_file(path)?,
        None => ViewerConfig::default(),
    };
    let seconds: f32 = args.next().map_or(Ok(10.0), |s| s.parse())?;

    let load = showroom::assets::load_model(config.model_path.clone());
    let mut session = Session::new(
        config,
        Some(Viewport::new(1280, 720)),
        LogRenderStep::default(),
        load,
    )?;

    let input = OrbitInput {
        screen_height: 720.0,
        ..OrbitInput::default()
    };

    let mut clock = Clock::new();
    let mut elapsed = 0.0;
    while elapsed < seconds {
        let dt = clock.tick();
        elapsed += dt;

        let report = session.frame(dt, &input);
        if report.camera_looped {
            log::info!("Camera clip looped at frame {:?}", report.frame);
        }

        thread::sleep(FRAME_INTERVAL);
    }

    log::info!(
        "Ran {} frame(s) in {elapsed:.1}s, scene ready: {}",
        session.renderer().frames,
        session.is_ready()
    );
    Ok(())
}
