//! Asset loading.
//!
//! Loading is the only asynchronous boundary of the viewer. A load runs on a
//! background thread and delivers exactly one [`LoadedAsset`] (or an error)
//! over a channel. The frame loop polls [`PendingLoad`] without blocking.

#[cfg(feature = "gltf")]
pub mod gltf_loader;

use std::sync::Arc;

use crate::animation::AnimationClip;
use crate::errors::{Result, ShowroomError};
use crate::scene::Scene;

#[cfg(feature = "gltf")]
pub use gltf_loader::load_gltf;

/// Everything the viewer needs from a loaded model.
#[derive(Debug, Default)]
pub struct LoadedAsset {
    pub scene: Scene,
    /// Clips in file order.
    pub clips: Vec<Arc<AnimationClip>>,
}

/// Outcome of one [`PendingLoad::poll`].
#[derive(Debug)]
pub enum LoadPoll {
    /// Nothing delivered yet.
    Pending,
    Ready(Result<LoadedAsset>),
}

/// Handle on a load in flight.
#[derive(Debug)]
pub struct PendingLoad {
    rx: flume::Receiver<Result<LoadedAsset>>,
}

impl PendingLoad {
    /// Runs `load` on a background thread.
    pub fn spawn<F>(label: &str, load: F) -> Self
    where
        F: FnOnce() -> Result<LoadedAsset> + Send + 'static,
    {
        let (tx, rx) = flume::bounded(1);
        let spawned = std::thread::Builder::new()
            .name(format!("load:{label}"))
            .spawn(move || {
                // The receiver may already be gone if the session was dropped.
                let _ = tx.send(load());
            });

        if let Err(err) = spawned {
            log::error!("Failed to spawn loader thread for '{label}': {err}");
        }

        Self { rx }
    }

    /// A load whose result is already known.
    #[must_use]
    pub fn ready(result: Result<LoadedAsset>) -> Self {
        let (tx, rx) = flume::bounded(1);
        let _ = tx.send(result);
        Self { rx }
    }

    /// Non-blocking check for the result.
    #[must_use]
    pub fn poll(&self) -> LoadPoll {
        match self.rx.try_recv() {
            Ok(result) => LoadPoll::Ready(result),
            Err(flume::TryRecvError::Empty) => LoadPoll::Pending,
            Err(flume::TryRecvError::Disconnected) => {
                LoadPoll::Ready(Err(ShowroomError::LoaderDisconnected))
            }
        }
    }

    /// Blocks until the load completes.
    pub fn wait(self) -> Result<LoadedAsset> {
        self.rx
            .recv()
            .unwrap_or_else(|_| Err(ShowroomError::LoaderDisconnected))
    }
}

/// Starts loading the model at `path` on a background thread.
#[cfg(feature = "gltf")]
pub fn load_model(path: impl Into<std::path::PathBuf>) -> PendingLoad {
    let path = path.into();
    let label = path.display().to_string();
    PendingLoad::spawn(&label, move || load_gltf(&path))
}
