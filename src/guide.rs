//! # Shotforge guide
//!
//! A standalone walkthrough of the architecture and public API, for anyone
//! integrating the crate or extending it.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Camera`](crate::Camera): a configured shot entity with optional per-field overrides
//! - [`Group`](crate::Group): a named collection of cameras sharing optional overrides
//! - [`MasterSettings`](crate::MasterSettings): process-wide defaults and running render totals
//! - [`ResolvedConfig`](crate::ResolvedConfig): the effective configuration after precedence
//! - [`ConfigStore`](crate::ConfigStore): where records live ([`MemoryConfigStore`](crate::MemoryConfigStore) is the stock impl)
//! - [`RenderEnv`](crate::RenderEnv): the shared render environment collaborator
//! - [`RenderEngine`](crate::RenderEngine): the thing that actually produces pixels
//! - [`RenderOrchestrator`](crate::RenderOrchestrator): owns the job lifecycle
//!
//! ## Three-tier resolution
//!
//! Every resolvable field-group (engine+samples, resolution, active layer,
//! frame range, output location) follows camera > group > master precedence,
//! independently per field-group: a camera may override resolution while
//! inheriting its engine from the group. One generic helper implements the
//! chain, and both [`resolve`](crate::resolve()) and
//! [`aggregate`](crate::aggregate) go through it, so the resolver and the
//! statistics can never disagree about what a camera would render with.
//!
//! Missing references never error. A camera whose group was deleted resolves
//! exactly like an ungrouped camera and the result is marked
//! [`degraded`](crate::ResolvedConfig::degraded) so callers can detect it.
//!
//! ## The job lifecycle
//!
//! [`RenderOrchestrator::render`](crate::RenderOrchestrator::render) treats
//! the shared environment as a scoped acquisition:
//!
//! 1. take the job lock (one in-flight job, always)
//! 2. snapshot the environment ([`EnvScope`](crate::EnvScope))
//! 3. apply the resolved configuration
//! 4. run the pass sequence, continuing past individual pass failures
//! 5. restore the snapshot — unconditionally, exactly once
//! 6. update the master render totals (once per job, not per pass)
//!
//! The job outcome is an explicit aggregate
//! ([`JobOutcome`](crate::JobOutcome): success / partial / failure plus a
//! [`PassReport`](crate::PassReport) per pass), not best-effort logging.
//! A restoration failure surfaces as
//! [`ShotforgeError::Environment`](crate::ShotforgeError::Environment),
//! distinct from pass errors, because it means the environment may be left
//! inconsistent.
//!
//! ## Output layout
//!
//! [`resolve_output_dir`](crate::resolve_output_dir) derives
//! `base / group / camera / {stills,animation} [/ pass]`, with group and
//! camera names sanitized to filesystem-safe segments
//! ([`sanitize_segment`](crate::sanitize_segment)). The base directory
//! follows the same camera > group > master precedence as everything else.
//! Paths are deterministic: identical inputs always yield identical strings.
//!
//! ## What this crate is not
//!
//! There is no rasterizer here, no viewport, no UI, and no scene/object
//! lifecycle. Those belong to the embedding application; this crate decides
//! what a render job should look like and drives it through collaborator
//! traits.
