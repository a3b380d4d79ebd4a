use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::{
    error::{ShotforgeError, ShotforgeResult},
    model::{EngineId, FileFormat, FrameRange, Resolution, SampleCounts},
};

/// Full value of the shared render environment.
///
/// The orchestrator never mutates ambient state piecemeal: it captures one of
/// these, applies a derived copy, and restores the original.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvState {
    pub engine: EngineId,
    pub samples: SampleCounts,
    pub resolution: Resolution,
    pub active_camera: Option<String>,
    pub active_layer: Option<String>,
    pub output_path: PathBuf,
    pub file_format: FileFormat,
    pub frames: FrameRange,
}

impl Default for EnvState {
    fn default() -> Self {
        Self {
            engine: EngineId::default(),
            samples: SampleCounts::default(),
            resolution: Resolution::default(),
            active_camera: None,
            active_layer: None,
            output_path: PathBuf::new(),
            file_format: FileFormat::default(),
            frames: FrameRange::default(),
        }
    }
}

/// The process-wide render environment collaborator.
///
/// Implementations bridge to whatever actually owns the shared render state.
/// [`MemoryEnv`] is the stock in-process implementation.
pub trait RenderEnv {
    fn state(&self) -> EnvState;
    fn apply(&mut self, state: &EnvState) -> ShotforgeResult<()>;
    /// Points the environment's render output at `path` (set per pass).
    fn set_output_path(&mut self, path: &Path) -> ShotforgeResult<()>;
    /// Whether `name` is a layer the environment can switch to.
    fn has_layer(&self, name: &str) -> bool;
}

/// Scoped acquisition of the render environment.
///
/// Captures a snapshot on entry; [`restore`](EnvScope::restore) must be called
/// exactly once on the way out and surfaces restoration failure as
/// [`ShotforgeError::Environment`]. If the scope is dropped without an
/// explicit restore (a panic unwinding through the job), a best-effort
/// restore runs from `Drop` and failures are logged.
pub struct EnvScope<'a> {
    env: &'a mut dyn RenderEnv,
    snapshot: EnvState,
    restored: bool,
}

impl<'a> EnvScope<'a> {
    pub fn enter(env: &'a mut dyn RenderEnv) -> Self {
        let snapshot = env.state();
        Self {
            env,
            snapshot,
            restored: false,
        }
    }

    pub fn env(&mut self) -> &mut dyn RenderEnv {
        self.env
    }

    pub fn env_ref(&self) -> &dyn RenderEnv {
        self.env
    }

    /// The environment state captured at scope entry.
    pub fn snapshot(&self) -> &EnvState {
        &self.snapshot
    }

    /// Restores the entry snapshot. Consumes the scope; restoration is
    /// attempted exactly once even if it fails.
    pub fn restore(mut self) -> ShotforgeResult<()> {
        self.restored = true;
        self.env.apply(&self.snapshot).map_err(|e| {
            ShotforgeError::environment(format!("failed to restore render environment: {e}"))
        })
    }
}

impl Drop for EnvScope<'_> {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(e) = self.env.apply(&self.snapshot) {
                tracing::warn!("best-effort environment restore on drop failed: {e}");
            }
        }
    }
}

/// In-process [`RenderEnv`] holding the state as a plain value, with a
/// declared set of known layers.
#[derive(Clone, Debug, Default)]
pub struct MemoryEnv {
    state: EnvState,
    layers: BTreeSet<String>,
}

impl MemoryEnv {
    pub fn new(state: EnvState) -> Self {
        Self {
            state,
            layers: BTreeSet::new(),
        }
    }

    pub fn with_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers.extend(layers.into_iter().map(Into::into));
        self
    }

    pub fn add_layer(&mut self, name: impl Into<String>) {
        self.layers.insert(name.into());
    }

    /// Direct read access, mainly for assertions in tests and embedders.
    pub fn current(&self) -> &EnvState {
        &self.state
    }
}

impl RenderEnv for MemoryEnv {
    fn state(&self) -> EnvState {
        self.state.clone()
    }

    fn apply(&mut self, state: &EnvState) -> ShotforgeResult<()> {
        self.state = state.clone();
        Ok(())
    }

    fn set_output_path(&mut self, path: &Path) -> ShotforgeResult<()> {
        self.state.output_path = path.to_path_buf();
        Ok(())
    }

    fn has_layer(&self, name: &str) -> bool {
        self.layers.contains(name)
    }
}
