use crate::{
    model::{Camera, EngineId, FrameRange, Group, MasterSettings, Resolution},
    store::ConfigStore,
};

/// The tier a resolved field-group was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Tier {
    Camera,
    Group,
    Master,
}

/// Winning tier per field-group, recorded so callers and tests can observe
/// where each effective value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldSources {
    pub render: Tier,
    pub resolution: Tier,
    pub layer: Tier,
    pub frames: Tier,
}

/// The effective render configuration for one camera after applying
/// camera > group > master precedence independently per field-group.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub engine: EngineId,
    /// Sample count for the resolved engine; `None` when the engine has no
    /// sample control.
    pub samples: Option<u32>,
    pub resolution: Resolution,
    /// Resolved active layer. There is no master default; `None` means the
    /// environment keeps its current layer.
    pub layer: Option<String>,
    pub frames: FrameRange,
    pub sources: FieldSources,
    /// True when the camera names a group that no longer exists. Resolution
    /// silently fell back to ungrouped behavior; this flag makes the
    /// degradation observable instead of guessable.
    pub degraded: bool,
}

/// One precedence chain for every field-group, so the resolver and the
/// statistics aggregator can never drift apart.
fn tiered<'a, T>(camera: Option<&'a T>, group: Option<&'a T>, master: &'a T) -> (&'a T, Tier) {
    if let Some(v) = camera {
        (v, Tier::Camera)
    } else if let Some(v) = group {
        (v, Tier::Group)
    } else {
        (master, Tier::Master)
    }
}

/// Resolves the effective configuration for `camera` against the store.
///
/// A dangling group reference is not an error: group-tier overrides are
/// skipped and the result is marked [`degraded`](ResolvedConfig::degraded).
pub fn resolve(camera: &Camera, store: &dyn ConfigStore) -> ResolvedConfig {
    let group = camera.group.as_deref().and_then(|name| store.group(name));
    let degraded = camera.group.is_some() && group.is_none();
    let mut cfg = resolve_with(camera, group, store.master());
    cfg.degraded = degraded;
    cfg
}

/// Pure resolution against an explicit group record and master settings.
///
/// `group` is the camera's group if it exists; pass `None` for ungrouped
/// cameras (or dangling references, which behave identically here).
pub fn resolve_with(
    camera: &Camera,
    group: Option<&Group>,
    master: &MasterSettings,
) -> ResolvedConfig {
    let (render, render_tier) = tiered(
        camera.overrides.render.as_ref(),
        group.and_then(|g| g.overrides.render.as_ref()),
        &master.render,
    );
    // Sample count follows the resolved engine, not the override source.
    let samples = render.samples.for_engine(render.engine);

    let (resolution, resolution_tier) = tiered(
        camera.overrides.resolution.as_ref(),
        group.and_then(|g| g.overrides.resolution.as_ref()),
        &master.resolution,
    );

    // No master-tier layer exists; master here means "leave the environment's
    // current layer alone".
    let (layer, layer_tier) = match (
        camera.overrides.layer.as_ref(),
        group.and_then(|g| g.overrides.layer.as_ref()),
    ) {
        (Some(layer), _) => (Some(layer.clone()), Tier::Camera),
        (None, Some(layer)) => (Some(layer.clone()), Tier::Group),
        (None, None) => (None, Tier::Master),
    };

    // Groups carry no frame range; precedence collapses to camera > master.
    let (frames, frames_tier) = tiered(camera.overrides.frames.as_ref(), None, &master.frames);

    ResolvedConfig {
        engine: render.engine,
        samples,
        resolution: *resolution,
        layer,
        frames: *frames,
        sources: FieldSources {
            render: render_tier,
            resolution: resolution_tier,
            layer: layer_tier,
            frames: frames_tier,
        },
        degraded: false,
    }
}
