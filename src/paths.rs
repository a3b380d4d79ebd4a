use std::path::{Path, PathBuf};

use crate::{
    model::{Camera, Group, MasterSettings},
    store::ConfigStore,
};

/// Reduces a camera or group name to a filesystem-safe path segment.
///
/// Keeps alphanumeric characters, spaces, underscores and hyphens, trims the
/// result, then replaces spaces with underscores. Idempotent: sanitizing an
/// already-sanitized segment is a no-op. Distinct names can sanitize to the
/// same segment (`"Shot A"` and `"Shot_A"` both become `Shot_A`); collisions
/// are tolerated, not resolved.
pub fn sanitize_segment(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    kept.trim().replace(' ', "_")
}

/// Derives the output directory for one render of `camera`.
///
/// Layout: `base / group-segment / camera-segment / mode [/ pass]`, where the
/// base directory follows camera > group > master precedence (an override
/// must be set *and* non-empty to win), the group segment is the sanitized
/// group reference or the literal `ungrouped`, and mode is `animation` or
/// `stills`. Pass names are appended verbatim. Deterministic: identical
/// inputs always produce an identical path.
pub fn resolve_output_dir(
    camera: &Camera,
    store: &dyn ConfigStore,
    animation: bool,
    pass_name: Option<&str>,
) -> PathBuf {
    let group = camera.group.as_deref().and_then(|name| store.group(name));
    resolve_output_dir_with(camera, group, store.master(), animation, pass_name)
}

/// Pure form of [`resolve_output_dir`] against explicit records.
pub fn resolve_output_dir_with(
    camera: &Camera,
    group: Option<&Group>,
    master: &MasterSettings,
    animation: bool,
    pass_name: Option<&str>,
) -> PathBuf {
    let base = camera
        .overrides
        .output_dir
        .as_deref()
        .filter(|p| non_empty(p))
        .or_else(|| {
            group
                .and_then(|g| g.overrides.output_dir.as_deref())
                .filter(|p| non_empty(p))
        })
        .unwrap_or(&master.output_dir);

    let mut out = base.to_path_buf();

    // The folder segment uses the camera's group reference string even when
    // the group record itself is gone; only the base-dir override above needs
    // the record.
    match &camera.group {
        Some(name) => out.push(sanitize_segment(name)),
        None => out.push("ungrouped"),
    }

    out.push(sanitize_segment(&camera.name));
    out.push(if animation { "animation" } else { "stills" });

    if let Some(pass) = pass_name {
        out.push(pass);
    }

    out
}

fn non_empty(path: &Path) -> bool {
    !path.as_os_str().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryConfigStore;

    fn fixture() -> MemoryConfigStore {
        let mut store = MemoryConfigStore::new();
        store.master_mut().output_dir = PathBuf::from("root");
        store.insert_group(Group::new("Ext"));
        let mut camera = Camera::new("Shot A");
        camera.group = Some("Ext".to_string());
        store.insert_camera(camera);
        store
    }

    #[test]
    fn still_path_matches_layout() {
        let store = fixture();
        let camera = store.camera("Shot A").unwrap();
        assert_eq!(
            resolve_output_dir(camera, &store, false, None),
            PathBuf::from("root/Ext/Shot_A/stills")
        );
    }

    #[test]
    fn animation_pass_path_matches_layout() {
        let store = fixture();
        let camera = store.camera("Shot A").unwrap();
        assert_eq!(
            resolve_output_dir(camera, &store, true, Some("depth")),
            PathBuf::from("root/Ext/Shot_A/animation/depth")
        );
    }

    #[test]
    fn ungrouped_camera_uses_literal_segment() {
        let mut store = fixture();
        store.insert_camera(Camera::new("Loose"));
        let camera = store.camera("Loose").unwrap();
        assert_eq!(
            resolve_output_dir(camera, &store, false, None),
            PathBuf::from("root/ungrouped/Loose/stills")
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let store = fixture();
        let camera = store.camera("Shot A").unwrap();
        let a = resolve_output_dir(camera, &store, true, Some("depth"));
        let b = resolve_output_dir(camera, &store, true, Some("depth"));
        assert_eq!(a, b);
    }

    #[test]
    fn sanitize_strips_and_replaces() {
        assert_eq!(sanitize_segment("Shot A"), "Shot_A");
        assert_eq!(sanitize_segment("Shot/A:01?"), "ShotA01");
        assert_eq!(sanitize_segment("  padded  "), "padded");
        assert_eq!(sanitize_segment("keep-this_name7"), "keep-this_name7");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for name in ["Shot A", "Shot/A:01?", "  padded  ", "plain"] {
            let once = sanitize_segment(name);
            assert_eq!(sanitize_segment(&once), once);
        }
    }

    #[test]
    fn camera_override_wins_over_group_and_master() {
        let mut store = fixture();
        store.group_mut("Ext").unwrap().overrides.output_dir = Some(PathBuf::from("group_base"));
        store.camera_mut("Shot A").unwrap().overrides.output_dir =
            Some(PathBuf::from("cam_base"));

        let camera = store.camera("Shot A").unwrap();
        assert_eq!(
            resolve_output_dir(camera, &store, false, None),
            PathBuf::from("cam_base/Ext/Shot_A/stills")
        );
    }

    #[test]
    fn group_override_wins_over_master() {
        let mut store = fixture();
        store.group_mut("Ext").unwrap().overrides.output_dir = Some(PathBuf::from("group_base"));

        let camera = store.camera("Shot A").unwrap();
        assert_eq!(
            resolve_output_dir(camera, &store, false, None),
            PathBuf::from("group_base/Ext/Shot_A/stills")
        );
    }

    #[test]
    fn empty_override_falls_through() {
        let mut store = fixture();
        store.camera_mut("Shot A").unwrap().overrides.output_dir = Some(PathBuf::new());

        let camera = store.camera("Shot A").unwrap();
        assert_eq!(
            resolve_output_dir(camera, &store, false, None),
            PathBuf::from("root/Ext/Shot_A/stills")
        );
    }

    #[test]
    fn dangling_group_still_names_the_folder() {
        let mut store = fixture();
        store.remove_group("Ext");

        let camera = store.camera("Shot A").unwrap();
        assert_eq!(
            resolve_output_dir(camera, &store, false, None),
            PathBuf::from("root/Ext/Shot_A/stills")
        );
    }
}
