use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context as _;
use parking_lot::Mutex;

use crate::{
    engine::RenderEngine,
    env::{EnvScope, RenderEnv},
    error::{ShotforgeError, ShotforgeResult},
    model::{Camera, Group, MasterSettings},
    paths::resolve_output_dir_with,
    resolve::{ResolvedConfig, resolve},
    store::ConfigStore,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    /// Render the resolved frame range instead of a single still.
    pub animation: bool,
    /// Render to a transient surface; no output paths, no file writes.
    pub preview: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobOutcome {
    /// Every pass succeeded.
    Success,
    /// At least one pass succeeded and at least one failed.
    Partial,
    /// No pass succeeded, or setup failed before any render attempt.
    Failure,
}

/// Result of one pass attempt within a job.
#[derive(Clone, Debug)]
pub struct PassReport {
    /// Pass name; `None` for the anonymous single render.
    pub name: Option<String>,
    /// Target the engine was pointed at; `None` if the pass failed before a
    /// target was derived, or in preview mode.
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

impl PassReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of one `render` invocation.
#[derive(Clone, Debug)]
pub struct JobReport {
    pub camera: String,
    pub outcome: JobOutcome,
    pub passes: Vec<PassReport>,
    /// Error that prevented any render attempt (environment apply failure).
    /// Kept separate from per-pass errors.
    pub setup_error: Option<String>,
    pub duration: Duration,
}

/// Result of a batch (`render_all` / `render_group`) invocation.
#[derive(Clone, Debug)]
pub struct BatchReport {
    pub jobs: Vec<JobReport>,
    pub cameras_total: usize,
    /// Jobs that produced at least one successful pass.
    pub cameras_rendered: usize,
}

/// Drives render jobs through the snapshot/apply/render/restore lifecycle.
///
/// The render environment is process-wide shared mutable state, so the
/// orchestrator holds a job lock for the full duration of each `render` call:
/// there is exactly one in-flight job at a time, and master-settings counters
/// are written while the lock is held. A stuck engine call blocks the
/// orchestrator indefinitely; there is no timeout or cancellation.
pub struct RenderOrchestrator {
    job_lock: Mutex<()>,
    /// Destination used when a pass's output directory cannot be created.
    fallback_dir: PathBuf,
}

impl Default for RenderOrchestrator {
    fn default() -> Self {
        Self::new("renders")
    }
}

impl RenderOrchestrator {
    pub fn new(fallback_dir: impl Into<PathBuf>) -> Self {
        Self {
            job_lock: Mutex::new(()),
            fallback_dir: fallback_dir.into(),
        }
    }

    /// Renders one camera.
    ///
    /// Sequence: resolve settings, snapshot the environment, apply the
    /// resolved configuration, run the pass sequence (each pass's failure is
    /// recorded and the job continues), restore the snapshot, then update the
    /// master render totals for successful or partial jobs.
    ///
    /// Restoration runs on every path out of the apply/render phase. A
    /// restoration failure is returned as [`ShotforgeError::Environment`],
    /// distinct from per-pass errors, because the shared environment may be
    /// left inconsistent.
    #[tracing::instrument(skip(self, store, env, engine), fields(camera = camera_name))]
    pub fn render(
        &self,
        store: &mut dyn ConfigStore,
        env: &mut dyn RenderEnv,
        engine: &mut dyn RenderEngine,
        camera_name: &str,
        opts: &RenderOptions,
    ) -> ShotforgeResult<JobReport> {
        let _job = self.job_lock.lock();
        let started = Instant::now();

        let camera = store
            .camera(camera_name)
            .cloned()
            .ok_or_else(|| ShotforgeError::unknown_camera(camera_name))?;
        let cfg = resolve(&camera, store);
        if cfg.degraded {
            tracing::warn!(
                group = camera.group.as_deref().unwrap_or_default(),
                "camera references a missing group; resolving as ungrouped"
            );
        }
        let group = camera.group.as_deref().and_then(|g| store.group(g)).cloned();
        let master = store.master().clone();

        let mut scope = EnvScope::enter(env);
        let mut desired = desired_state(&scope, &camera, &cfg, opts);
        if let Some(layer) = &cfg.layer {
            if scope.env_ref().has_layer(layer) {
                desired.active_layer = Some(layer.clone());
            } else {
                tracing::warn!(
                    layer = %layer,
                    "resolved layer not present in environment; keeping current layer"
                );
            }
        }

        let mut setup_error = None;
        let mut passes = Vec::new();
        match scope.env().apply(&desired) {
            Ok(()) => {
                if opts.preview {
                    let error = engine.render_preview(&cfg).err().map(|e| e.to_string());
                    passes.push(PassReport {
                        name: None,
                        output: None,
                        error,
                    });
                } else {
                    for pass_name in pass_sequence(&camera) {
                        passes.push(self.render_one_pass(
                            engine,
                            scope.env(),
                            &camera,
                            group.as_ref(),
                            &master,
                            &cfg,
                            opts.animation,
                            pass_name,
                        ));
                    }
                }
            }
            Err(e) => {
                setup_error = Some(format!("failed to apply render environment: {e}"));
            }
        }

        let outcome = job_outcome(&passes, setup_error.is_some());
        scope.restore()?;

        let elapsed = started.elapsed();
        if matches!(outcome, JobOutcome::Success | JobOutcome::Partial) {
            let totals = &mut store.master_mut().totals;
            totals.render_count += 1;
            totals.last_render_secs = elapsed.as_secs_f64();
            totals.total_render_secs += elapsed.as_secs_f64();
        }

        Ok(JobReport {
            camera: camera.name,
            outcome,
            passes,
            setup_error,
            duration: elapsed,
        })
    }

    /// Renders every camera in the store, one serialized job per camera.
    pub fn render_all(
        &self,
        store: &mut dyn ConfigStore,
        env: &mut dyn RenderEnv,
        engine: &mut dyn RenderEngine,
        opts: &RenderOptions,
    ) -> ShotforgeResult<BatchReport> {
        let names: Vec<String> = store.cameras().iter().map(|c| c.name.clone()).collect();
        self.render_batch(store, env, engine, names, opts)
    }

    /// Renders every camera referencing `group_name`. An unknown or empty
    /// group yields an empty batch, not an error.
    pub fn render_group(
        &self,
        store: &mut dyn ConfigStore,
        env: &mut dyn RenderEnv,
        engine: &mut dyn RenderEngine,
        group_name: &str,
        opts: &RenderOptions,
    ) -> ShotforgeResult<BatchReport> {
        let names: Vec<String> = store
            .cameras()
            .iter()
            .filter(|c| c.group.as_deref() == Some(group_name))
            .map(|c| c.name.clone())
            .collect();
        self.render_batch(store, env, engine, names, opts)
    }

    fn render_batch(
        &self,
        store: &mut dyn ConfigStore,
        env: &mut dyn RenderEnv,
        engine: &mut dyn RenderEngine,
        names: Vec<String>,
        opts: &RenderOptions,
    ) -> ShotforgeResult<BatchReport> {
        let mut jobs = Vec::with_capacity(names.len());
        for name in &names {
            jobs.push(self.render(store, env, engine, name, opts)?);
        }
        let cameras_rendered = jobs
            .iter()
            .filter(|j| j.outcome != JobOutcome::Failure)
            .count();
        Ok(BatchReport {
            cameras_total: names.len(),
            cameras_rendered,
            jobs,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn render_one_pass(
        &self,
        engine: &mut dyn RenderEngine,
        env: &mut dyn RenderEnv,
        camera: &Camera,
        group: Option<&Group>,
        master: &MasterSettings,
        cfg: &ResolvedConfig,
        animation: bool,
        pass_name: Option<String>,
    ) -> PassReport {
        let dir = resolve_output_dir_with(camera, group, master, animation, pass_name.as_deref());
        let dir = match ensure_output_dir(&dir, &self.fallback_dir) {
            Ok(dir) => dir,
            Err(e) => {
                return PassReport {
                    name: pass_name,
                    output: None,
                    error: Some(e.to_string()),
                };
            }
        };

        let suffix = pass_name
            .as_deref()
            .map(|p| format!("_{p}"))
            .unwrap_or_default();
        let stem = format!("{}_{}{}", camera.filename, camera.name, suffix);
        let target = if animation {
            dir.join(stem)
        } else {
            dir.join(format!("{stem}.{}", camera.file_format.extension()))
        };

        tracing::debug!(
            pass = pass_name.as_deref().unwrap_or("<anonymous>"),
            target = %target.display(),
            "rendering pass"
        );

        let result = env.set_output_path(&target).and_then(|()| {
            if animation {
                engine.render_animation(cfg, &target)
            } else {
                engine.render_still(cfg, &target)
            }
        });

        if let Err(e) = &result {
            tracing::warn!(
                pass = pass_name.as_deref().unwrap_or("<anonymous>"),
                "pass failed: {e}"
            );
        }

        PassReport {
            name: pass_name,
            output: Some(target),
            error: result.err().map(|e| e.to_string()),
        }
    }
}

/// Derives the environment to apply for this job from the entry snapshot.
fn desired_state(
    scope: &EnvScope<'_>,
    camera: &Camera,
    cfg: &ResolvedConfig,
    opts: &RenderOptions,
) -> crate::env::EnvState {
    let mut desired = scope.snapshot().clone();
    desired.engine = cfg.engine;
    if let Some(samples) = cfg.samples {
        desired.samples.set_for(cfg.engine, samples);
    }
    desired.resolution = cfg.resolution;
    desired.active_camera = Some(camera.name.clone());
    desired.frames = cfg.frames;
    if !opts.preview {
        desired.file_format = camera.file_format;
    }
    desired
}

/// Enabled pass names in order, or the single anonymous pass.
fn pass_sequence(camera: &Camera) -> Vec<Option<String>> {
    if camera.use_passes {
        camera
            .enabled_passes()
            .map(|p| Some(p.name.clone()))
            .collect()
    } else {
        vec![None]
    }
}

fn job_outcome(passes: &[PassReport], setup_failed: bool) -> JobOutcome {
    if setup_failed || passes.is_empty() {
        return JobOutcome::Failure;
    }
    let failed = passes.iter().filter(|p| p.error.is_some()).count();
    if failed == 0 {
        JobOutcome::Success
    } else if failed == passes.len() {
        JobOutcome::Failure
    } else {
        JobOutcome::Partial
    }
}

fn ensure_output_dir(dir: &Path, fallback: &Path) -> ShotforgeResult<PathBuf> {
    match std::fs::create_dir_all(dir) {
        Ok(()) => Ok(dir.to_path_buf()),
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                fallback = %fallback.display(),
                "failed to create output directory ({e}); using fallback"
            );
            std::fs::create_dir_all(fallback).with_context(|| {
                format!(
                    "failed to create fallback output directory '{}'",
                    fallback.display()
                )
            })?;
            Ok(fallback.to_path_buf())
        }
    }
}
