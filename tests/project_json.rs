use std::path::PathBuf;

use shotforge::{
    Camera, ConfigStore, EngineId, EngineSettings, FrameRange, Group, MemoryConfigStore,
    PassType, RenderPass, SampleCounts, resolve,
};

fn sample_project() -> MemoryConfigStore {
    let mut store = MemoryConfigStore::new();
    store.master_mut().output_dir = PathBuf::from("renders");
    store.master_mut().frames = FrameRange { start: 1, end: 120 };

    let mut group = Group::new("Ext");
    group.overrides.render = Some(EngineSettings {
        engine: EngineId::Eevee,
        samples: SampleCounts {
            cycles: 128,
            eevee: 32,
        },
    });
    group.notes = "exterior day".to_string();
    store.insert_group(group);

    let mut camera = Camera::new("Shot A");
    camera.group = Some("Ext".to_string());
    camera.use_passes = true;
    camera.add_pass(RenderPass::new("beauty", PassType::Beauty));
    camera.add_pass(RenderPass::new("depth", PassType::Depth));
    camera.overrides.frames = Some(FrameRange { start: 10, end: 60 });
    store.insert_camera(camera);

    store.insert_camera(Camera::new("Shot B"));
    store
}

#[test]
fn project_roundtrip_preserves_resolution_behavior() {
    let store = sample_project();
    let json = store.to_json_string().unwrap();
    let restored = MemoryConfigStore::from_json_str(&json).unwrap();

    let before = resolve(store.camera("Shot A").unwrap(), &store);
    let after = resolve(restored.camera("Shot A").unwrap(), &restored);
    assert_eq!(before, after);
    assert_eq!(after.engine, EngineId::Eevee);
    assert_eq!(after.frames, FrameRange { start: 10, end: 60 });

    assert_eq!(restored.camera_count(), 2);
    assert_eq!(restored.group_count(), 1);
    let passes: Vec<_> = restored
        .camera("Shot A")
        .unwrap()
        .passes
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(passes, vec!["beauty", "depth"]);
}

#[test]
fn malformed_project_is_rejected() {
    assert!(MemoryConfigStore::from_json_str("{not json").is_err());

    // Well-formed JSON with an invalid record is rejected by validation.
    let mut store = sample_project();
    store.camera_mut("Shot B").unwrap().overrides.frames =
        Some(FrameRange { start: 50, end: 10 });
    let json = store.to_json_string().unwrap();
    assert!(MemoryConfigStore::from_json_str(&json).is_err());
}
