//! Loader for level packs authored as YAML resource files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::{LevelError, Result};
use super::resource::{
    Level, LevelPackSpec, Resource, ResourceHeader, ResourceKind, API_VERSION,
};

/// A parsed resource file, either kind.
#[derive(Debug, Clone)]
pub enum AnyResource {
    Level(Resource<Level>),
    LevelPack(Resource<LevelPackSpec>),
}

impl AnyResource {
    /// Consumes the resource, returning the levels it defines.
    pub fn into_levels(self) -> Vec<Level> {
        match self {
            AnyResource::Level(r) => vec![r.spec],
            AnyResource::LevelPack(r) => r.spec.levels,
        }
    }
}

/// Loads level resources from a pack directory.
pub struct PackLoader {
    pack_dir: PathBuf,
}

impl PackLoader {
    /// Creates a loader for the given directory.
    pub fn new(pack_dir: impl Into<PathBuf>) -> Self {
        Self {
            pack_dir: pack_dir.into(),
        }
    }

    /// Returns the pack directory path.
    pub fn pack_dir(&self) -> &Path {
        &self.pack_dir
    }

    /// Loads every level resource under the pack directory.
    ///
    /// Scans for `*.yaml`/`*.yml` files (hidden files and directories are
    /// skipped), rejects duplicate level ids, and returns the levels sorted
    /// by id.
    pub fn load(&self) -> Result<Vec<Level>> {
        if !self.pack_dir.exists() {
            return Err(LevelError::PackDirNotFound(self.pack_dir.clone()));
        }

        let mut levels: Vec<Level> = Vec::new();
        let mut seen: HashMap<u32, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&self.pack_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            // Skip hidden files and anything inside hidden directories.
            if let Ok(relative) = path.strip_prefix(&self.pack_dir) {
                let hidden = relative.components().any(|c| {
                    c.as_os_str()
                        .to_str()
                        .map(|s| s.starts_with('.'))
                        .unwrap_or(false)
                });
                if hidden {
                    continue;
                }
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "yaml" && ext != "yml" {
                continue;
            }

            let resource = self.load_file(path)?;
            for level in resource.into_levels() {
                if seen.contains_key(&level.id) {
                    return Err(LevelError::DuplicateLevelId {
                        id: level.id,
                        path: path.to_path_buf(),
                    });
                }
                seen.insert(level.id, path.to_path_buf());
                levels.push(level);
            }
        }

        if levels.is_empty() {
            return Err(LevelError::EmptyPack);
        }

        levels.sort_by_key(|l| l.id);

        log::info!(
            "Loaded {} level(s) from {}",
            levels.len(),
            self.pack_dir.display()
        );

        Ok(levels)
    }

    /// Loads a single resource file.
    pub fn load_file(&self, path: &Path) -> Result<AnyResource> {
        let content = fs::read_to_string(path).map_err(|e| LevelError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        parse_resource(&content, path)
    }
}

/// Parses a resource from YAML content.
///
/// The header is parsed first to determine the kind, then the whole document
/// is parsed against the matching spec type.
pub fn parse_resource(content: &str, path: &Path) -> Result<AnyResource> {
    let header: ResourceHeader =
        serde_yaml::from_str(content).map_err(|e| LevelError::ParseYaml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if header.api_version != API_VERSION {
        return Err(LevelError::InvalidApiVersion {
            version: header.api_version,
            expected: API_VERSION.to_string(),
        });
    }

    match header.kind {
        ResourceKind::Level => {
            let resource: Resource<Level> =
                serde_yaml::from_str(content).map_err(|e| LevelError::ParseYaml {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
            Ok(AnyResource::Level(resource))
        }
        ResourceKind::LevelPack => {
            let resource: Resource<LevelPackSpec> =
                serde_yaml::from_str(content).map_err(|e| LevelError::ParseYaml {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
            Ok(AnyResource::LevelPack(resource))
        }
    }
}
