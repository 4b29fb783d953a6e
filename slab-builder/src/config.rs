use serde::{Deserialize, Serialize};

/// Configuration of the slab builder
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BuilderConfig {
    /// Size of the thread pool the meshes are generated on. If undefined, rayon's global pool is used
    pub mesh_threads: Option<usize>,
    /// Include the generated meshes in the output
    pub export_meshes: bool,
    /// Reject parts which overlap an already placed part of the same usage-type
    pub world_rejects_overlaps: bool,
    /// Drop catalog parts without usable dimensions at import
    pub skip_unusable_parts: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            mesh_threads: None,
            export_meshes: true,
            world_rejects_overlaps: false,
            skip_unusable_parts: false,
        }
    }
}
