//! Global configuration options.

use std::sync::{OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Index, DEFAULT_MAX_SIZE};

/// Global configuration options for the `zarrs_json_binding` crate.
///
/// Retrieve the global [`Config`] with [`global_config`] and modify it with [`global_config_mut`].
///
/// Rank constraints are never part of the global configuration, they are scoped to a single binding pass.
///
/// ## Shape Max Size
/// > default: [`DEFAULT_MAX_SIZE`]
///
/// The upper bound of each element of a [`ShapeVector`](crate::dimension_indexed::ShapeVector) created with [`ShapeVector::new`](crate::dimension_indexed::ShapeVector::new).
///
/// ## Chunk Shape Max Size
/// > default: [`DEFAULT_MAX_SIZE`]
///
/// The upper bound of each element of a [`ChunkShapeVector`](crate::dimension_indexed::ChunkShapeVector) created with [`ChunkShapeVector::new`](crate::dimension_indexed::ChunkShapeVector::new).
#[derive(Debug)]
pub struct Config {
    shape_max_size: Index,
    chunk_shape_max_size: Index,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shape_max_size: DEFAULT_MAX_SIZE,
            chunk_shape_max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl Config {
    /// Get the [shape max size](#shape-max-size) configuration.
    #[must_use]
    pub fn shape_max_size(&self) -> Index {
        self.shape_max_size
    }

    /// Set the [shape max size](#shape-max-size) configuration.
    pub fn set_shape_max_size(&mut self, max_size: Index) {
        self.shape_max_size = max_size;
    }

    /// Get the [chunk shape max size](#chunk-shape-max-size) configuration.
    #[must_use]
    pub fn chunk_shape_max_size(&self) -> Index {
        self.chunk_shape_max_size
    }

    /// Set the [chunk shape max size](#chunk-shape-max-size) configuration.
    pub fn set_chunk_shape_max_size(&mut self, max_size: Index) {
        self.chunk_shape_max_size = max_size;
    }
}

static CONFIG: OnceLock<RwLock<Config>> = OnceLock::new();

/// Returns a reference to the global configuration.
///
/// # Panics
/// This function panics if the underlying lock has been poisoned and might panic if the global config is already held by the current thread.
pub fn global_config() -> RwLockReadGuard<'static, Config> {
    CONFIG
        .get_or_init(|| RwLock::new(Config::default()))
        .read()
        .unwrap()
}

/// Returns a mutable reference to the global configuration.
///
/// # Panics
/// This function panics if the underlying lock has been poisoned and might panic if the global config is already held by the current thread.
pub fn global_config_mut() -> RwLockWriteGuard<'static, Config> {
    CONFIG
        .get_or_init(|| RwLock::new(Config::default()))
        .write()
        .unwrap()
}
