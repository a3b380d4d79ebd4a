use std::path::Path;

use crate::{error::ShotforgeResult, resolve::ResolvedConfig};

/// The render engine collaborator: invoked synchronously, once per pass.
///
/// `output_file` for stills is the full target file path (extension
/// included); `output_pattern` for animations is the directory/stem the
/// engine derives per-frame filenames from. Errors are opaque to the
/// orchestrator, which records them per pass and continues.
pub trait RenderEngine {
    fn render_still(&mut self, config: &ResolvedConfig, output_file: &Path)
    -> ShotforgeResult<()>;

    fn render_animation(
        &mut self,
        config: &ResolvedConfig,
        output_pattern: &Path,
    ) -> ShotforgeResult<()>;

    /// Renders to a transient surface; no output path is involved.
    fn render_preview(&mut self, config: &ResolvedConfig) -> ShotforgeResult<()>;
}
