use std::collections::BTreeMap;

use crate::{
    model::{EngineId, Equipment, ShotSize, ShotType},
    resolve::resolve_with,
    store::ConfigStore,
};

/// Name of the synthetic bucket for cameras without a group.
pub const UNGROUPED: &str = "ungrouped";

/// Aggregated, read-only view over every camera and group in the store.
///
/// Frequency tables are seeded with every known tag at zero; "show only
/// non-zero" is a presentation decision left to callers.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub total_cameras: usize,
    pub total_groups: usize,
    /// Camera count per declared group plus the [`UNGROUPED`] bucket.
    /// Dangling group references count under the referenced name, mirroring
    /// the per-camera back-reference scan.
    pub cameras_by_group: BTreeMap<String, usize>,
    /// Usage count per engine, computed from each camera's *resolved* engine
    /// (same precedence chain the settings resolver applies).
    pub engines: BTreeMap<EngineId, usize>,
    pub shot_sizes: BTreeMap<ShotSize, usize>,
    pub shot_types: BTreeMap<ShotType, usize>,
    pub equipment: BTreeMap<Equipment, usize>,
    /// Frames that a full batch render would produce, summed over each
    /// camera's resolved frame range.
    pub total_frames: u64,
    pub render_count: u64,
    pub last_render_secs: f64,
    pub total_render_secs: f64,
    /// `total_render_secs / render_count`, or 0 when nothing rendered yet.
    pub average_render_secs: f64,
}

/// Scans the store and produces grouped counts and derived metrics.
pub fn aggregate(store: &dyn ConfigStore) -> Stats {
    let master = store.master();

    let mut cameras_by_group = BTreeMap::new();
    for group in store.groups() {
        cameras_by_group.insert(group.name.clone(), 0usize);
    }
    cameras_by_group.insert(UNGROUPED.to_string(), 0);

    let mut engines: BTreeMap<EngineId, usize> =
        EngineId::ALL.iter().map(|e| (*e, 0)).collect();
    let mut shot_sizes: BTreeMap<ShotSize, usize> =
        ShotSize::ALL.iter().map(|s| (*s, 0)).collect();
    let mut shot_types: BTreeMap<ShotType, usize> =
        ShotType::ALL.iter().map(|t| (*t, 0)).collect();
    let mut equipment: BTreeMap<Equipment, usize> =
        Equipment::ALL.iter().map(|e| (*e, 0)).collect();

    let cameras = store.cameras();
    let mut total_frames = 0u64;

    for camera in &cameras {
        let bucket = match &camera.group {
            Some(name) => name.clone(),
            None => UNGROUPED.to_string(),
        };
        *cameras_by_group.entry(bucket).or_insert(0) += 1;

        let group = camera.group.as_deref().and_then(|name| store.group(name));
        let cfg = resolve_with(camera, group, master);
        *engines.entry(cfg.engine).or_insert(0) += 1;
        total_frames += cfg.frames.frame_count();

        *shot_sizes.entry(camera.info.size).or_insert(0) += 1;
        *shot_types.entry(camera.info.shot_type).or_insert(0) += 1;
        *equipment.entry(camera.info.equipment).or_insert(0) += 1;
    }

    let totals = master.totals;
    let average_render_secs = if totals.render_count > 0 {
        totals.total_render_secs / totals.render_count as f64
    } else {
        0.0
    };

    Stats {
        total_cameras: cameras.len(),
        total_groups: store.groups().len(),
        cameras_by_group,
        engines,
        shot_sizes,
        shot_types,
        equipment,
        total_frames,
        render_count: totals.render_count,
        last_render_secs: totals.last_render_secs,
        total_render_secs: totals.total_render_secs,
        average_render_secs,
    }
}
