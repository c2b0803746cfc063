//! Resource loading and caching
//!
//! The cache owns mesh, shader-program, and audio-clip data keyed by load
//! path; entities refer to resources through non-owning slotmap handles. A
//! failed load surfaces to the caller at init time; a dangling handle later
//! simply makes the owning entity absent from submission.

use std::collections::HashMap;

use slotmap::SlotMap;
use thiserror::Error;

slotmap::new_key_type! {
    /// Non-owning handle to a mesh owned by the cache.
    pub struct MeshHandle;

    /// Non-owning handle to a shader program owned by the cache.
    pub struct ProgramHandle;

    /// Non-owning handle to an audio clip owned by the cache.
    pub struct ClipHandle;
}

/// Asset subsystem errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// The backing loader could not produce the resource.
    #[error("failed to load `{path}`: {reason}")]
    LoadFailed {
        /// Offending load path.
        path: String,
        /// Loader-reported cause.
        reason: String,
    },
}

/// Mesh record produced by the loader backend.
///
/// `raw` is the backend's buffer identifier; the core never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshData {
    /// Backend identifier for the uploaded buffers.
    pub raw: u64,
    /// Number of indices to draw.
    pub index_count: u32,
}

/// Shader program record produced by the loader backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramData {
    /// Backend identifier for the linked program.
    pub raw: u64,
}

/// Audio clip record produced by the loader backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipData {
    /// Backend identifier for the decoded clip.
    pub raw: u64,
}

/// Backend that materializes resources from paths.
///
/// Implementations wrap the actual file/GPU/audio-device work; the core only
/// sees the returned records.
pub trait ResourceLoader {
    /// Load (or upload) a mesh.
    ///
    /// # Errors
    /// `LoadFailed` when the path cannot be materialized.
    fn load_mesh(&mut self, path: &str) -> Result<MeshData, AssetError>;

    /// Compile and link a shader program from a vertex/fragment pair.
    ///
    /// # Errors
    /// `LoadFailed` when either stage cannot be materialized.
    fn load_program(&mut self, vertex_path: &str, fragment_path: &str)
        -> Result<ProgramData, AssetError>;

    /// Load an audio clip.
    ///
    /// # Errors
    /// `LoadFailed` when the path cannot be materialized.
    fn load_clip(&mut self, path: &str) -> Result<ClipData, AssetError>;
}

/// Path-keyed cache owning every loaded resource.
///
/// Repeated loads of the same path return the cached handle instead of going
/// back to the loader, so structurally shared resources (one cube mesh, many
/// cubes) are loaded once. The cache, not the entity, owns each resource's
/// lifetime.
#[derive(Debug, Default)]
pub struct AssetCache {
    meshes: SlotMap<MeshHandle, MeshData>,
    mesh_paths: HashMap<String, MeshHandle>,
    programs: SlotMap<ProgramHandle, ProgramData>,
    program_paths: HashMap<(String, String), ProgramHandle>,
    clips: SlotMap<ClipHandle, ClipData>,
    clip_paths: HashMap<String, ClipHandle>,
}

impl AssetCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a mesh through `loader`, reusing the cached copy for a repeated
    /// path.
    ///
    /// # Errors
    /// Propagates the loader's `LoadFailed`.
    pub fn load_mesh(
        &mut self,
        loader: &mut dyn ResourceLoader,
        path: &str,
    ) -> Result<MeshHandle, AssetError> {
        if let Some(&handle) = self.mesh_paths.get(path) {
            return Ok(handle);
        }
        let data = loader.load_mesh(path)?;
        let handle = self.meshes.insert(data);
        self.mesh_paths.insert(path.to_owned(), handle);
        log::debug!("loaded mesh `{path}`");
        Ok(handle)
    }

    /// Load a shader program, cached by its vertex/fragment path pair.
    ///
    /// # Errors
    /// Propagates the loader's `LoadFailed`.
    pub fn load_program(
        &mut self,
        loader: &mut dyn ResourceLoader,
        vertex_path: &str,
        fragment_path: &str,
    ) -> Result<ProgramHandle, AssetError> {
        let key = (vertex_path.to_owned(), fragment_path.to_owned());
        if let Some(&handle) = self.program_paths.get(&key) {
            return Ok(handle);
        }
        let data = loader.load_program(vertex_path, fragment_path)?;
        let handle = self.programs.insert(data);
        self.program_paths.insert(key, handle);
        log::debug!("linked program `{vertex_path}` + `{fragment_path}`");
        Ok(handle)
    }

    /// Load an audio clip, cached by path.
    ///
    /// # Errors
    /// Propagates the loader's `LoadFailed`.
    pub fn load_clip(
        &mut self,
        loader: &mut dyn ResourceLoader,
        path: &str,
    ) -> Result<ClipHandle, AssetError> {
        if let Some(&handle) = self.clip_paths.get(path) {
            return Ok(handle);
        }
        let data = loader.load_clip(path)?;
        let handle = self.clips.insert(data);
        self.clip_paths.insert(path.to_owned(), handle);
        log::debug!("loaded clip `{path}`");
        Ok(handle)
    }

    /// Resolve a mesh handle; `None` for a handle that never loaded.
    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle)
    }

    /// Resolve a program handle.
    pub fn program(&self, handle: ProgramHandle) -> Option<&ProgramData> {
        self.programs.get(handle)
    }

    /// Resolve a clip handle.
    pub fn clip(&self, handle: ClipHandle) -> Option<&ClipData> {
        self.clips.get(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Loader handing out sequential ids and counting calls.
    #[derive(Default)]
    struct CountingLoader {
        loads: usize,
    }

    impl ResourceLoader for CountingLoader {
        fn load_mesh(&mut self, _path: &str) -> Result<MeshData, AssetError> {
            self.loads += 1;
            Ok(MeshData {
                raw: self.loads as u64,
                index_count: 36,
            })
        }

        fn load_program(
            &mut self,
            _vertex_path: &str,
            _fragment_path: &str,
        ) -> Result<ProgramData, AssetError> {
            self.loads += 1;
            Ok(ProgramData {
                raw: self.loads as u64,
            })
        }

        fn load_clip(&mut self, _path: &str) -> Result<ClipData, AssetError> {
            self.loads += 1;
            Ok(ClipData {
                raw: self.loads as u64,
            })
        }
    }

    struct BrokenLoader;

    impl ResourceLoader for BrokenLoader {
        fn load_mesh(&mut self, path: &str) -> Result<MeshData, AssetError> {
            Err(AssetError::LoadFailed {
                path: path.to_owned(),
                reason: "corrupt file".to_owned(),
            })
        }

        fn load_program(
            &mut self,
            vertex_path: &str,
            _fragment_path: &str,
        ) -> Result<ProgramData, AssetError> {
            Err(AssetError::LoadFailed {
                path: vertex_path.to_owned(),
                reason: "compile error".to_owned(),
            })
        }

        fn load_clip(&mut self, path: &str) -> Result<ClipData, AssetError> {
            Err(AssetError::LoadFailed {
                path: path.to_owned(),
                reason: "unsupported codec".to_owned(),
            })
        }
    }

    #[test]
    fn test_repeated_path_reuses_cached_resource() {
        let mut cache = AssetCache::new();
        let mut loader = CountingLoader::default();

        let first = cache.load_mesh(&mut loader, "meshes/cube.obj").unwrap();
        let second = cache.load_mesh(&mut loader, "meshes/cube.obj").unwrap();

        assert_eq!(first, second);
        assert_eq!(loader.loads, 1);
    }

    #[test]
    fn test_distinct_paths_get_distinct_handles() {
        let mut cache = AssetCache::new();
        let mut loader = CountingLoader::default();

        let cube = cache.load_mesh(&mut loader, "meshes/cube.obj").unwrap();
        let sphere = cache.load_mesh(&mut loader, "meshes/sphere.obj").unwrap();

        assert_ne!(cube, sphere);
        assert_eq!(loader.loads, 2);
    }

    #[test]
    fn test_program_cached_by_path_pair() {
        let mut cache = AssetCache::new();
        let mut loader = CountingLoader::default();

        let a = cache.load_program(&mut loader, "v.glsl", "f.glsl").unwrap();
        let b = cache.load_program(&mut loader, "v.glsl", "f.glsl").unwrap();
        let c = cache.load_program(&mut loader, "v.glsl", "other.glsl").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_load_failure_propagates_and_caches_nothing() {
        let mut cache = AssetCache::new();

        let result = cache.load_mesh(&mut BrokenLoader, "meshes/cube.obj");
        assert!(matches!(result, Err(AssetError::LoadFailed { .. })));

        // A later attempt with a working loader succeeds; the failure was not
        // cached.
        let mut loader = CountingLoader::default();
        assert!(cache.load_mesh(&mut loader, "meshes/cube.obj").is_ok());
    }

    #[test]
    fn test_default_handle_is_dangling() {
        let cache = AssetCache::new();
        assert!(cache.mesh(MeshHandle::default()).is_none());
        assert!(cache.program(ProgramHandle::default()).is_none());
        assert!(cache.clip(ClipHandle::default()).is_none());
    }
}
