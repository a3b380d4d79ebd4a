use std::collections::BTreeMap;

use crate::{
    error::{ShotforgeError, ShotforgeResult},
    model::{Camera, Group, MasterSettings},
};

/// Read/write access to the configuration records the core operates on.
///
/// Camera and group lifecycle (creation, duplication, deletion in a host
/// scene) belongs to the embedding application; the core only reads records
/// and writes the master render totals.
pub trait ConfigStore {
    fn camera(&self, name: &str) -> Option<&Camera>;
    fn group(&self, name: &str) -> Option<&Group>;
    /// All cameras, in a stable enumeration order.
    fn cameras(&self) -> Vec<&Camera>;
    fn groups(&self) -> Vec<&Group>;
    fn master(&self) -> &MasterSettings;
    fn master_mut(&mut self) -> &mut MasterSettings;
}

/// In-memory [`ConfigStore`] keyed by name, with JSON persistence.
///
/// `BTreeMap` keeps enumeration order stable across runs, which makes batch
/// render order and serialized project files deterministic.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct MemoryConfigStore {
    cameras: BTreeMap<String, Camera>,
    groups: BTreeMap<String, Group>,
    master: MasterSettings,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_master(master: MasterSettings) -> Self {
        Self {
            master,
            ..Self::default()
        }
    }

    /// Inserts or replaces a camera, keyed by its name.
    pub fn insert_camera(&mut self, camera: Camera) -> Option<Camera> {
        self.cameras.insert(camera.name.clone(), camera)
    }

    pub fn remove_camera(&mut self, name: &str) -> Option<Camera> {
        self.cameras.remove(name)
    }

    pub fn camera_mut(&mut self, name: &str) -> Option<&mut Camera> {
        self.cameras.get_mut(name)
    }

    /// Inserts or replaces a group, keyed by its name. Member cameras keep
    /// their back-references; removing a group leaves them dangling, which
    /// resolution treats as ungrouped.
    pub fn insert_group(&mut self, group: Group) -> Option<Group> {
        self.groups.insert(group.name.clone(), group)
    }

    pub fn remove_group(&mut self, name: &str) -> Option<Group> {
        self.groups.remove(name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.get_mut(name)
    }

    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Cameras referencing `group_name`, in enumeration order.
    pub fn cameras_in_group(&self, group_name: &str) -> Vec<&Camera> {
        self.cameras
            .values()
            .filter(|c| c.group.as_deref() == Some(group_name))
            .collect()
    }

    pub fn ungrouped_cameras(&self) -> Vec<&Camera> {
        self.cameras.values().filter(|c| c.group.is_none()).collect()
    }

    pub fn to_json_string(&self) -> ShotforgeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ShotforgeError::validation(format!("serialize project: {e}")))
    }

    /// Parses a project file and validates every record in it.
    pub fn from_json_str(s: &str) -> ShotforgeResult<Self> {
        let store: Self = serde_json::from_str(s)
            .map_err(|e| ShotforgeError::validation(format!("parse project: {e}")))?;
        store.validate()?;
        Ok(store)
    }

    pub fn validate(&self) -> ShotforgeResult<()> {
        self.master.validate()?;
        for camera in self.cameras.values() {
            camera.validate()?;
        }
        for group in self.groups.values() {
            group.validate()?;
        }
        Ok(())
    }
}

impl ConfigStore for MemoryConfigStore {
    fn camera(&self, name: &str) -> Option<&Camera> {
        self.cameras.get(name)
    }

    fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    fn cameras(&self) -> Vec<&Camera> {
        self.cameras.values().collect()
    }

    fn groups(&self) -> Vec<&Group> {
        self.groups.values().collect()
    }

    fn master(&self) -> &MasterSettings {
        &self.master
    }

    fn master_mut(&mut self) -> &mut MasterSettings {
        &mut self.master
    }
}
