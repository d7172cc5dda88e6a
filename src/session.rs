//! Viewer Session
//!
//! [`Session`] owns everything the frame loop touches. Creating it has the
//! [`RenderStep`] build the static stage once; after that it runs one frame per
//! [`Session::frame`] call:
//!
//! 1. Poll the pending load; on arrival, build the ready scene (dress meshes,
//!    resolve blink targets, pick the embedded camera, start the director).
//! 2. Advance the director by `dt`.
//! 3. Convert the mixer time to a frame index and apply blink colors.
//! 4. Drive the default camera with the orbit controls if no embedded camera
//!    exists.
//! 5. Resolve the active camera and hand the frame to the [`RenderStep`].
//!
//! Until the load completes the session is [`SessionState::Loading`]: steps 2
//! and 3 do not run, and the render step only draws the static stage.

use std::time::Duration;

use crate::animation::{AnimationDirector, classify};
use crate::assets::{LoadPoll, LoadedAsset, PendingLoad};
use crate::config::{StageConfig, ViewerConfig};
use crate::effects::{BlinkEngine, frame_index};
use crate::errors::{Result, ShowroomError};
use crate::scene::{Camera, HasCameraCapability, HasMeshCapability, NodeHandle, Scene, SceneGraph};
use crate::utils::{FpsCounter, OrbitControls, OrbitInput};

/// The host display region the viewer draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1 for a collapsed viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// The rendering engine's side of the frame.
pub trait RenderStep {
    /// Builds the static stage (background, sky, area lights, floor, bloom).
    /// Called exactly once, when the session is created.
    fn setup(&mut self, _stage: &StageConfig) {}

    /// Draws one frame. `scene` is `None` while the model is still loading,
    /// in which case only the static stage (sky, floor, lights) is drawn.
    fn render(&mut self, scene: Option<&Scene>, camera: &Camera);

    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Which camera a frame was drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveCamera {
    /// The camera embedded in the loaded scene.
    Embedded(NodeHandle),
    /// The viewer's own orbiting camera.
    Default,
}

/// State of a fully loaded scene.
#[derive(Debug)]
pub struct ReadyScene {
    pub scene: Scene,
    /// `None` when the model has no animation at all.
    pub director: Option<AnimationDirector>,
    embedded_camera: Option<NodeHandle>,
}

impl ReadyScene {
    /// Decided once at load; never changes afterwards.
    #[must_use]
    pub fn active_camera(&self) -> ActiveCamera {
        self.embedded_camera
            .map_or(ActiveCamera::Default, ActiveCamera::Embedded)
    }
}

#[derive(Debug)]
pub enum SessionState {
    /// Waiting for the loader. `None` once the loader has failed: the session
    /// then idles for good.
    Loading(Option<PendingLoad>),
    Ready(Box<ReadyScene>),
}

/// Per-frame summary, mostly for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Blink frame index, when a director is running.
    pub frame: Option<i64>,
    pub camera: ActiveCamera,
    /// The camera clip wrapped during this frame.
    pub camera_looped: bool,
}

pub struct Session<R: RenderStep> {
    config: ViewerConfig,
    viewport: Viewport,
    state: SessionState,

    blink: BlinkEngine<NodeHandle>,
    default_camera: Camera,
    controls: OrbitControls,
    stats: FpsCounter,

    renderer: R,
}

impl<R: RenderStep> Session<R> {
    /// Sets up the session around a load already in flight.
    ///
    /// Fails when the host has no display region to mount into, or when the
    /// configuration is invalid.
    pub fn new(
        config: ViewerConfig,
        mount: Option<Viewport>,
        mut renderer: R,
        load: PendingLoad,
    ) -> Result<Self> {
        config.validate()?;
        let viewport = mount.ok_or(ShowroomError::MountPointMissing)?;

        renderer.setup(&config.stage);
        log::info!(
            "Stage ready: {} area light(s), bloom {}",
            config.stage.area_lights.len(),
            if config.stage.bloom.enabled { "on" } else { "off" }
        );

        let camera_config = config.default_camera;
        let mut default_camera = Camera::new_perspective(
            camera_config.lens.fov,
            viewport.aspect(),
            camera_config.lens.near,
            camera_config.lens.far,
        )
        .with_name("DefaultCamera");
        default_camera.position = camera_config.position;
        default_camera.look_at(camera_config.target, glam::Vec3::Y);

        let controls =
            OrbitControls::new(camera_config.position, camera_config.target, config.orbit);
        let blink = BlinkEngine::new(config.blink_targets.clone());

        Ok(Self {
            config,
            viewport,
            state: SessionState::Loading(Some(load)),
            blink,
            default_camera,
            controls,
            stats: FpsCounter::new(),
            renderer,
        })
    }

    /// Runs one frame. `dt` is the wall-clock delta in seconds.
    pub fn frame(&mut self, dt: f32, input: &OrbitInput) -> FrameReport {
        self.poll_load();

        let mut report = FrameReport {
            frame: None,
            camera: ActiveCamera::Default,
            camera_looped: false,
        };

        if let SessionState::Ready(ready) = &mut self.state {
            if let Some(director) = ready.director.as_mut() {
                report.camera_looped = director.tick(dt);
                let frame = frame_index(director.elapsed(), self.config.fps);
                self.blink.update(&mut ready.scene, frame);
                report.frame = Some(frame);
            }
            report.camera = ready.active_camera();
        }

        if report.camera == ActiveCamera::Default {
            self.controls.update(&mut self.default_camera, input, dt);
        }

        match &self.state {
            SessionState::Ready(ready) => {
                let embedded = match report.camera {
                    ActiveCamera::Embedded(handle) => ready.scene.node(handle),
                    ActiveCamera::Default => None,
                };
                let camera = embedded
                    .and_then(HasCameraCapability::camera)
                    .unwrap_or(&self.default_camera);
                self.renderer.render(Some(&ready.scene), camera);
            }
            SessionState::Loading(_) => self.renderer.render(None, &self.default_camera),
        }

        let delta = Duration::try_from_secs_f32(dt.max(0.0)).unwrap_or_default();
        if let Some(fps) = self.stats.record(delta) {
            log::debug!("{fps:.1} fps");
        }

        report
    }

    /// Propagates a host resize to both cameras and the render step.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        let aspect = self.viewport.aspect();

        self.default_camera.set_aspect(aspect);
        if let SessionState::Ready(ready) = &mut self.state {
            if let Some(camera) = ready
                .embedded_camera
                .and_then(|handle| ready.scene.node_mut(handle))
                .and_then(HasCameraCapability::camera_mut)
            {
                camera.set_aspect(aspect);
            }
        }

        self.renderer.resize(width, height);
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn ready(&self) -> Option<&ReadyScene> {
        match &self.state {
            SessionState::Ready(ready) => Some(&**ready),
            SessionState::Loading(_) => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready().is_some()
    }

    #[must_use]
    pub fn active_camera(&self) -> ActiveCamera {
        self.ready()
            .map_or(ActiveCamera::Default, ReadyScene::active_camera)
    }

    #[must_use]
    pub fn blink(&self) -> &BlinkEngine<NodeHandle> {
        &self.blink
    }

    #[must_use]
    pub fn default_camera(&self) -> &Camera {
        &self.default_camera
    }

    #[must_use]
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn poll_load(&mut self) {
        let SessionState::Loading(Some(pending)) = &self.state else {
            return;
        };

        match pending.poll() {
            LoadPoll::Pending => {}
            LoadPoll::Ready(Ok(asset)) => {
                let ready = self.build_ready_scene(asset);
                self.state = SessionState::Ready(Box::new(ready));
            }
            LoadPoll::Ready(Err(err)) => {
                log::error!("Model failed to load, staying idle: {err}");
                self.state = SessionState::Loading(None);
            }
        }
    }

    fn build_ready_scene(&mut self, asset: LoadedAsset) -> ReadyScene {
        let LoadedAsset { mut scene, clips } = asset;
        let dressing = self.config.model_dressing;

        let mut embedded_camera = None;
        for handle in scene.traverse() {
            let Some(node) = scene.node_mut(handle) else {
                continue;
            };
            if node.is_camera() {
                embedded_camera = Some(handle);
            }
            if let Some(material) = node.material_mut() {
                material.env_map_intensity = dressing.env_map_intensity;
                node.set_shadows(dressing.cast_shadow, dressing.receive_shadow);
            }
        }

        if let Some(camera) = embedded_camera
            .and_then(|handle| scene.node_mut(handle))
            .and_then(HasCameraCapability::camera_mut)
        {
            let lens = self.config.embedded_camera;
            camera.set_lens(lens.fov, lens.near, lens.far);
            camera.set_aspect(self.viewport.aspect());
            self.controls.enabled = false;
        }

        let resolved = self.blink.resolve(&scene, self.config.resting_color);

        let director = if clips.is_empty() {
            None
        } else {
            let mode = self.config.camera_mode;
            Some(AnimationDirector::start(classify(clips), mode))
        };

        log::info!(
            "Scene ready: {} node(s), camera-driven: {}, embedded camera: {}, blink targets: {}/{}",
            scene.len(),
            director
                .as_ref()
                .is_some_and(AnimationDirector::is_camera_driven),
            embedded_camera.is_some(),
            resolved,
            self.blink.entries().len()
        );

        ReadyScene {
            scene,
            director,
            embedded_camera,
        }
    }
}
