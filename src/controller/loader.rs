use super::{Controller, ControllerRef};
use crate::registry::ControllerRegistry;
use crate::runtime_config::RouterConfig;
use dashmap::DashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Builds a fresh controller instance with no arguments.
pub type ControllerFactory = Arc<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// Why a controller reference did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadMiss {
    /// No controller source file at the resolved path.
    MissingFile(PathBuf),
    /// The source file exists but nothing is registered under its name.
    Unregistered {
        path: PathBuf,
        qualified_name: String,
    },
}

impl fmt::Display for LoadMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadMiss::MissingFile(path) => {
                write!(f, "controller file '{}' does not exist", path.display())
            }
            LoadMiss::Unregistered {
                path,
                qualified_name,
            } => write!(
                f,
                "controller file '{}' exists but no factory is registered for '{}'",
                path.display(),
                qualified_name
            ),
        }
    }
}

/// Resolves controller references to factories, once per source path.
///
/// The existence of the source file is checked on every resolution, so a
/// removed file stops the route from firing. The factory lookup behind it
/// happens once per path and is shared by all threads; concurrent first
/// resolutions of the same path store exactly one entry.
pub struct ControllerLoader {
    controller_dir: PathBuf,
    extension: String,
    registry: ControllerRegistry,
    loaded: DashMap<PathBuf, ControllerFactory>,
}

impl ControllerLoader {
    /// Create a loader rooted at `controller_dir`.
    ///
    /// `extension` may be given with or without the leading dot.
    pub fn new(
        controller_dir: impl Into<PathBuf>,
        extension: &str,
        registry: ControllerRegistry,
    ) -> Self {
        let extension = match extension {
            "" => String::new(),
            ext if ext.starts_with('.') => ext.to_string(),
            ext => format!(".{ext}"),
        };
        Self {
            controller_dir: controller_dir.into(),
            extension,
            registry,
            loaded: DashMap::new(),
        }
    }

    /// Create a loader from the controller settings of a [`RouterConfig`].
    pub fn from_config(config: &RouterConfig, registry: ControllerRegistry) -> Self {
        Self::new(
            config.controller_dir.clone(),
            &config.controller_extension,
            registry,
        )
    }

    #[must_use]
    pub fn controller_dir(&self) -> &Path {
        &self.controller_dir
    }

    #[must_use]
    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    /// Number of distinct controller files loaded so far.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// `controller_dir / namespace / (name + extension)`
    #[must_use]
    pub fn source_path(&self, reference: &ControllerRef) -> PathBuf {
        let mut path = self.controller_dir.clone();
        for segment in reference
            .namespace_path()
            .split('/')
            .filter(|s| !s.is_empty())
        {
            path.push(segment);
        }
        path.push(format!("{}{}", reference.controller_name(), self.extension));
        path
    }

    /// Resolve a reference to its controller factory.
    ///
    /// # Errors
    ///
    /// [`LoadMiss::MissingFile`] when the source file is absent,
    /// [`LoadMiss::Unregistered`] when it exists but has no factory.
    pub fn load(&self, reference: &ControllerRef) -> Result<ControllerFactory, LoadMiss> {
        let path = self.source_path(reference);

        if !path.is_file() {
            debug!(
                controller = %reference,
                path = %path.display(),
                "Controller file not found"
            );
            return Err(LoadMiss::MissingFile(path));
        }

        if let Some(factory) = self.loaded.get(&path) {
            return Ok(Arc::clone(factory.value()));
        }

        let qualified_name = reference.qualified_name();
        let Some(factory) = self.registry.get(&qualified_name) else {
            return Err(LoadMiss::Unregistered {
                path,
                qualified_name,
            });
        };

        // entry() holds the shard lock, so only one thread inserts per path
        let entry = self.loaded.entry(path).or_insert_with(|| {
            info!(
                controller = %qualified_name,
                "Controller loaded"
            );
            factory
        });
        Ok(Arc::clone(entry.value()))
    }
}

impl fmt::Debug for ControllerLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerLoader")
            .field("controller_dir", &self.controller_dir)
            .field("extension", &self.extension)
            .field("registered", &self.registry.len())
            .field("loaded", &self.loaded.len())
            .finish()
    }
}
