//! Headless backend implementations
//!
//! Recording and null collaborators for tests, tooling, and windowless runs.

use super::{AudioBackend, InputSampler, RenderBackend, SpatialParams};
use crate::assets::{AssetError, ClipData, MeshData, ProgramData, ResourceLoader};
use crate::foundation::math::{Mat4, Vec3, Vec4};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    /// Backend id of the drawn mesh.
    pub mesh: u64,

    /// Backend id of the program used.
    pub program: u64,

    /// Submitted tint.
    pub color: Vec4,

    /// Submitted world matrix.
    pub world: Mat4,
}

/// Records draw submissions instead of touching a graphics API.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Every submission since creation (or the last `clear`), in order.
    pub submissions: Vec<DrawRecord>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all recorded submissions.
    pub fn clear(&mut self) {
        self.submissions.clear();
    }
}

impl RenderBackend for RecordingRenderer {
    fn draw(&mut self, mesh: &MeshData, program: &ProgramData, color: Vec4, world: &Mat4) {
        log::trace!("draw mesh={} program={}", mesh.raw, program.raw);
        self.submissions.push(DrawRecord {
            mesh: mesh.raw,
            program: program.raw,
            color,
            world: *world,
        });
    }
}

/// Discards audio submissions.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn update_source(&mut self, _clip: &ClipData, _params: &SpatialParams) {}
}

/// Records audio submissions for inspection.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    /// Every `(clip id, params)` update since creation, in order.
    pub updates: Vec<(u64, SpatialParams)>,
}

impl RecordingAudio {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioBackend for RecordingAudio {
    fn update_source(&mut self, clip: &ClipData, params: &SpatialParams) {
        self.updates.push((clip.raw, *params));
    }
}

/// Reports a fixed direction every frame.
#[derive(Debug, Clone, Copy)]
pub struct FixedInput {
    /// Direction returned by every sample.
    pub direction: Vec3,
}

impl FixedInput {
    /// An input that never reports movement.
    pub fn idle() -> Self {
        Self {
            direction: Vec3::zeros(),
        }
    }

    /// An input stuck in one direction.
    pub fn new(direction: Vec3) -> Self {
        Self { direction }
    }
}

impl InputSampler for FixedInput {
    fn sample(&mut self) -> Vec3 {
        self.direction
    }
}

/// Hands out sequential resource ids without touching the filesystem.
#[derive(Debug, Default)]
pub struct StubLoader {
    next_raw: u64,
}

impl StubLoader {
    fn next(&mut self) -> u64 {
        self.next_raw += 1;
        self.next_raw
    }
}

impl ResourceLoader for StubLoader {
    fn load_mesh(&mut self, _path: &str) -> Result<MeshData, AssetError> {
        Ok(MeshData {
            raw: self.next(),
            index_count: 36,
        })
    }

    fn load_program(
        &mut self,
        _vertex_path: &str,
        _fragment_path: &str,
    ) -> Result<ProgramData, AssetError> {
        Ok(ProgramData { raw: self.next() })
    }

    fn load_clip(&mut self, _path: &str) -> Result<ClipData, AssetError> {
        Ok(ClipData { raw: self.next() })
    }
}

/// Fails every load, for exercising degraded paths.
#[derive(Debug, Default)]
pub struct FailingLoader;

impl FailingLoader {
    fn fail<T>(path: &str) -> Result<T, AssetError> {
        Err(AssetError::LoadFailed {
            path: path.to_owned(),
            reason: "loader disabled".to_owned(),
        })
    }
}

impl ResourceLoader for FailingLoader {
    fn load_mesh(&mut self, path: &str) -> Result<MeshData, AssetError> {
        Self::fail(path)
    }

    fn load_program(
        &mut self,
        vertex_path: &str,
        _fragment_path: &str,
    ) -> Result<ProgramData, AssetError> {
        Self::fail(vertex_path)
    }

    fn load_clip(&mut self, path: &str) -> Result<ClipData, AssetError> {
        Self::fail(path)
    }
}
