use std::path::PathBuf;

use crate::error::{ShotforgeError, ShotforgeResult};

/// Render engine identifiers understood by the host environment.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub enum EngineId {
    #[default]
    Cycles,
    Eevee,
    Workbench,
}

impl EngineId {
    pub const ALL: [EngineId; 3] = [EngineId::Cycles, EngineId::Eevee, EngineId::Workbench];
}

/// Per-engine sample counts. Workbench has no sample control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SampleCounts {
    pub cycles: u32,
    pub eevee: u32,
}

impl Default for SampleCounts {
    fn default() -> Self {
        Self {
            cycles: 128,
            eevee: 64,
        }
    }
}

impl SampleCounts {
    pub fn for_engine(&self, engine: EngineId) -> Option<u32> {
        match engine {
            EngineId::Cycles => Some(self.cycles),
            EngineId::Eevee => Some(self.eevee),
            EngineId::Workbench => None,
        }
    }

    pub fn set_for(&mut self, engine: EngineId, samples: u32) {
        match engine {
            EngineId::Cycles => self.cycles = samples,
            EngineId::Eevee => self.eevee = samples,
            EngineId::Workbench => {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    /// Percentage of the full resolution actually rendered, 1..=100.
    pub percentage: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            percentage: 100,
        }
    }
}

impl Resolution {
    pub fn validate(&self) -> ShotforgeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ShotforgeError::validation(
                "resolution width/height must be > 0",
            ));
        }
        if self.percentage == 0 || self.percentage > 100 {
            return Err(ShotforgeError::validation(
                "resolution percentage must be in 1..=100",
            ));
        }
        Ok(())
    }
}

/// Inclusive frame range: rendering frame `start` through frame `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: u32,
    pub end: u32,
}

impl Default for FrameRange {
    fn default() -> Self {
        Self { start: 1, end: 250 }
    }
}

impl FrameRange {
    pub fn new(start: u32, end: u32) -> ShotforgeResult<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> ShotforgeResult<()> {
        if self.start > self.end {
            return Err(ShotforgeError::validation(format!(
                "frame range start {} exceeds end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }

    pub fn frame_count(&self) -> u64 {
        u64::from(self.end - self.start) + 1
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub enum FileFormat {
    #[default]
    Png,
    Jpeg,
    OpenExr,
    Tiff,
}

impl FileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Png => "png",
            FileFormat::Jpeg => "jpg",
            FileFormat::OpenExr => "exr",
            FileFormat::Tiff => "tif",
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub enum PassType {
    #[default]
    Beauty,
    Diffuse,
    Specular,
    Shadow,
    AmbientOcclusion,
    Depth,
    Normal,
    Mist,
    Emission,
    Environment,
    Custom,
}

/// One named output channel. The name is used verbatim as a path segment and
/// filename suffix; duplicate names are permitted but discouraged.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderPass {
    pub name: String,
    pub pass_type: PassType,
    pub enabled: bool,
}

impl RenderPass {
    pub fn new(name: impl Into<String>, pass_type: PassType) -> Self {
        Self {
            name: name.into(),
            pass_type,
            enabled: true,
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub enum ShotSize {
    ExtremeWide,
    #[default]
    Wide,
    Full,
    Mid,
    MediumClose,
    Close,
    ExtremeClose,
    Other,
}

impl ShotSize {
    pub const ALL: [ShotSize; 8] = [
        ShotSize::ExtremeWide,
        ShotSize::Wide,
        ShotSize::Full,
        ShotSize::Mid,
        ShotSize::MediumClose,
        ShotSize::Close,
        ShotSize::ExtremeClose,
        ShotSize::Other,
    ];
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub enum ShotType {
    #[default]
    Static,
    Pan,
    Tilt,
    Dolly,
    Truck,
    Pedestal,
    Zoom,
    HandHeld,
    Crane,
    Steadicam,
    Aerial,
    Other,
}

impl ShotType {
    pub const ALL: [ShotType; 12] = [
        ShotType::Static,
        ShotType::Pan,
        ShotType::Tilt,
        ShotType::Dolly,
        ShotType::Truck,
        ShotType::Pedestal,
        ShotType::Zoom,
        ShotType::HandHeld,
        ShotType::Crane,
        ShotType::Steadicam,
        ShotType::Aerial,
        ShotType::Other,
    ];
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub enum Equipment {
    #[default]
    Tripod,
    ShoulderRig,
    Gimbal,
    DollyTrack,
    Slider,
    Crane,
    Steadicam,
    Drone,
    Handheld,
    Virtual,
    Other,
}

impl Equipment {
    pub const ALL: [Equipment; 11] = [
        Equipment::Tripod,
        Equipment::ShoulderRig,
        Equipment::Gimbal,
        Equipment::DollyTrack,
        Equipment::Slider,
        Equipment::Crane,
        Equipment::Steadicam,
        Equipment::Drone,
        Equipment::Handheld,
        Equipment::Virtual,
        Equipment::Other,
    ];
}

/// Descriptive shot metadata. Carried through unchanged; never consulted by
/// settings resolution.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShotInfo {
    pub size: ShotSize,
    pub shot_type: ShotType,
    pub movement: String,
    pub equipment: Equipment,
    pub equipment_notes: String,
    pub notes: String,
}

/// The engine + per-engine sample counts field-group, resolved as one unit so
/// the sample count always comes from the same tier as the engine choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EngineSettings {
    pub engine: EngineId,
    pub samples: SampleCounts,
}

/// Per-camera overrides. `None` inherits from the group (where the group
/// carries the field) or from master settings.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraOverrides {
    pub render: Option<EngineSettings>,
    pub resolution: Option<Resolution>,
    pub output_dir: Option<PathBuf>,
    pub layer: Option<String>,
    pub frames: Option<FrameRange>,
}

/// Per-group overrides. Groups carry no frame range.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupOverrides {
    pub render: Option<EngineSettings>,
    pub resolution: Option<Resolution>,
    pub output_dir: Option<PathBuf>,
    pub layer: Option<String>,
}

/// A configured shot entity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    pub name: String,
    /// Group membership by name. `None` is the first-class "ungrouped" state;
    /// a name that no longer resolves to a group degrades to the same
    /// behavior for resolution purposes.
    pub group: Option<String>,
    pub overrides: CameraOverrides,
    pub passes: Vec<RenderPass>,
    /// When false, exactly one anonymous render occurs per invocation
    /// regardless of the pass list contents.
    pub use_passes: bool,
    /// Base filename for render output.
    pub filename: String,
    pub file_format: FileFormat,
    pub info: ShotInfo,
    /// Presentation-only color; no resolution effect.
    pub color: [f32; 4],
}

impl Camera {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: None,
            overrides: CameraOverrides::default(),
            passes: Vec::new(),
            use_passes: false,
            filename: "shot".to_string(),
            file_format: FileFormat::default(),
            info: ShotInfo::default(),
            color: [0.91, 0.33, 0.13, 1.0],
        }
    }

    pub fn validate(&self) -> ShotforgeResult<()> {
        if self.name.trim().is_empty() {
            return Err(ShotforgeError::validation("camera name must be non-empty"));
        }
        if let Some(res) = &self.overrides.resolution {
            res.validate()?;
        }
        if let Some(frames) = &self.overrides.frames {
            frames.validate()?;
        }
        Ok(())
    }

    /// Enabled passes in render order.
    pub fn enabled_passes(&self) -> impl Iterator<Item = &RenderPass> {
        self.passes.iter().filter(|p| p.enabled)
    }

    pub fn add_pass(&mut self, pass: RenderPass) {
        self.passes.push(pass);
    }

    /// Removes the pass at `index`; out-of-range indices are ignored.
    pub fn remove_pass(&mut self, index: usize) {
        if index < self.passes.len() {
            self.passes.remove(index);
        }
    }

    /// Swaps the pass at `index` one slot earlier. Returns the new index.
    pub fn move_pass_up(&mut self, index: usize) -> usize {
        if index > 0 && index < self.passes.len() {
            self.passes.swap(index, index - 1);
            index - 1
        } else {
            index
        }
    }

    /// Swaps the pass at `index` one slot later. Returns the new index.
    pub fn move_pass_down(&mut self, index: usize) -> usize {
        if index + 1 < self.passes.len() {
            self.passes.swap(index, index + 1);
            index + 1
        } else {
            index
        }
    }
}

/// A named collection of cameras sharing optional overrides. Membership is a
/// back-reference on each [`Camera`], not ownership.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Group {
    pub name: String,
    pub overrides: GroupOverrides,
    /// Presentation-only color; no resolution effect.
    pub color: [f32; 4],
    pub notes: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overrides: GroupOverrides::default(),
            color: [0.91, 0.33, 0.13, 1.0],
            notes: String::new(),
        }
    }

    pub fn validate(&self) -> ShotforgeResult<()> {
        if self.name.trim().is_empty() {
            return Err(ShotforgeError::validation("group name must be non-empty"));
        }
        if let Some(res) = &self.overrides.resolution {
            res.validate()?;
        }
        Ok(())
    }
}

/// Running render totals, maintained by the orchestrator.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderTotals {
    /// Incremented once per job, not per pass.
    pub render_count: u64,
    pub last_render_secs: f64,
    pub total_render_secs: f64,
}

/// Process-wide defaults used when no camera or group override applies.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MasterSettings {
    pub frames: FrameRange,
    pub output_dir: PathBuf,
    pub resolution: Resolution,
    pub render: EngineSettings,
    pub totals: RenderTotals,
}

impl Default for MasterSettings {
    fn default() -> Self {
        Self {
            frames: FrameRange::default(),
            output_dir: PathBuf::from("renders"),
            resolution: Resolution::default(),
            render: EngineSettings::default(),
            totals: RenderTotals::default(),
        }
    }
}

impl MasterSettings {
    pub fn validate(&self) -> ShotforgeResult<()> {
        self.frames.validate()?;
        self.resolution.validate()?;
        Ok(())
    }
}
