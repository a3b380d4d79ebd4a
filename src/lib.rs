#![forbid(unsafe_code)]

pub mod engine;
pub mod env;
pub mod error;
pub mod guide;
pub mod model;
pub mod orchestrate;
pub mod paths;
pub mod resolve;
pub mod stats;
pub mod store;

pub use engine::RenderEngine;
pub use env::{EnvScope, EnvState, MemoryEnv, RenderEnv};
pub use error::{ShotforgeError, ShotforgeResult};
pub use model::{
    Camera, CameraOverrides, EngineId, EngineSettings, Equipment, FileFormat, FrameRange, Group,
    GroupOverrides, MasterSettings, PassType, RenderPass, RenderTotals, Resolution, SampleCounts,
    ShotInfo, ShotSize, ShotType,
};
pub use orchestrate::{
    BatchReport, JobOutcome, JobReport, PassReport, RenderOptions, RenderOrchestrator,
};
pub use paths::{resolve_output_dir, resolve_output_dir_with, sanitize_segment};
pub use resolve::{FieldSources, ResolvedConfig, Tier, resolve, resolve_with};
pub use stats::{Stats, UNGROUPED, aggregate};
pub use store::{ConfigStore, MemoryConfigStore};
