use std::path::PathBuf;

use shotforge::{
    Camera, ConfigStore, EngineId, EngineSettings, FrameRange, Group, MemoryConfigStore,
    Resolution, SampleCounts, Tier, resolve, resolve_output_dir,
};

fn fixture() -> MemoryConfigStore {
    let mut store = MemoryConfigStore::new();
    store.master_mut().output_dir = PathBuf::from("root");
    store.master_mut().frames = FrameRange { start: 1, end: 10 };
    store.insert_group(Group::new("Ext"));

    let mut camera = Camera::new("Shot A");
    camera.group = Some("Ext".to_string());
    store.insert_camera(camera);
    store
}

#[test]
fn fully_inherited_camera_matches_master_on_every_field() {
    let store = fixture();
    let cfg = resolve(store.camera("Shot A").unwrap(), &store);
    let master = store.master();

    assert_eq!(cfg.engine, master.render.engine);
    assert_eq!(cfg.samples, master.render.samples.for_engine(master.render.engine));
    assert_eq!(cfg.resolution, master.resolution);
    assert_eq!(cfg.layer, None);
    assert_eq!(cfg.frames, master.frames);
    assert!(!cfg.degraded);
}

#[test]
fn camera_override_holds_even_when_group_also_overrides() {
    let mut store = fixture();
    store.group_mut("Ext").unwrap().overrides.render = Some(EngineSettings {
        engine: EngineId::Workbench,
        samples: SampleCounts::default(),
    });
    store.group_mut("Ext").unwrap().overrides.resolution = Some(Resolution {
        width: 4096,
        height: 1716,
        percentage: 100,
    });
    let camera = store.camera_mut("Shot A").unwrap();
    camera.overrides.render = Some(EngineSettings {
        engine: EngineId::Eevee,
        samples: SampleCounts {
            cycles: 1,
            eevee: 24,
        },
    });
    camera.overrides.resolution = Some(Resolution {
        width: 1280,
        height: 720,
        percentage: 50,
    });

    let cfg = resolve(store.camera("Shot A").unwrap(), &store);
    assert_eq!(cfg.engine, EngineId::Eevee);
    assert_eq!(cfg.samples, Some(24));
    assert_eq!(cfg.resolution.width, 1280);
    assert_eq!(cfg.sources.render, Tier::Camera);
    assert_eq!(cfg.sources.resolution, Tier::Camera);
}

#[test]
fn group_tier_fills_fields_the_camera_inherits() {
    let mut store = fixture();
    store.group_mut("Ext").unwrap().overrides.layer = Some("fg".to_string());
    store.group_mut("Ext").unwrap().overrides.render = Some(EngineSettings {
        engine: EngineId::Eevee,
        samples: SampleCounts {
            cycles: 128,
            eevee: 48,
        },
    });

    let cfg = resolve(store.camera("Shot A").unwrap(), &store);
    assert_eq!(cfg.engine, EngineId::Eevee);
    assert_eq!(cfg.samples, Some(48));
    assert_eq!(cfg.layer.as_deref(), Some("fg"));
    assert_eq!(cfg.sources.layer, Tier::Group);
    // Frames ignore the group tier entirely.
    assert_eq!(cfg.frames, store.master().frames);
    assert_eq!(cfg.sources.frames, Tier::Master);
}

#[test]
fn deleted_group_degrades_to_master_with_flag() {
    let mut store = fixture();
    store.group_mut("Ext").unwrap().overrides.render = Some(EngineSettings {
        engine: EngineId::Eevee,
        samples: SampleCounts::default(),
    });
    store.remove_group("Ext");

    let cfg = resolve(store.camera("Shot A").unwrap(), &store);
    assert!(cfg.degraded);
    assert_eq!(cfg.engine, store.master().render.engine);
    assert_eq!(cfg.sources.render, Tier::Master);
}

#[test]
fn spec_paths_for_grouped_camera() {
    let store = fixture();
    let camera = store.camera("Shot A").unwrap();

    assert_eq!(
        resolve_output_dir(camera, &store, false, None),
        PathBuf::from("root/Ext/Shot_A/stills")
    );
    assert_eq!(
        resolve_output_dir(camera, &store, true, Some("depth")),
        PathBuf::from("root/Ext/Shot_A/animation/depth")
    );
}

#[test]
fn ungrouped_path_contains_literal_segment() {
    let mut store = fixture();
    store.insert_camera(Camera::new("Loose Shot"));
    let camera = store.camera("Loose Shot").unwrap();

    let path = resolve_output_dir(camera, &store, false, None);
    assert!(path.iter().any(|seg| seg == "ungrouped"));
    assert_eq!(path, PathBuf::from("root/ungrouped/Loose_Shot/stills"));
}
