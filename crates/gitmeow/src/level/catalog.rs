//! The level catalog: the built-in pack plus optional custom packs.

use std::path::Path;
use std::sync::LazyLock;

use super::error::Result;
use super::loader::PackLoader;
use super::resource::{Level, LevelPackSpec, Resource};
use super::validation::PackValidator;

// The built-in pack ships inside the binary. It is static data; parse
// failure here is a build defect, caught by the catalog tests.
static BUILTIN: LazyLock<Vec<Level>> = LazyLock::new(|| {
    let pack: Resource<LevelPackSpec> =
        serde_yaml::from_str(include_str!("packs/builtin.yaml"))
            .expect("built-in level pack parses");
    pack.spec.levels
});

/// An ordered, validated set of levels.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// Returns the built-in catalog.
    pub fn builtin() -> Self {
        Self {
            levels: BUILTIN.clone(),
        }
    }

    /// Builds a catalog from pre-loaded levels, running the validator.
    pub fn from_levels(mut levels: Vec<Level>) -> Result<Self> {
        levels.sort_by_key(|l| l.id);
        PackValidator::new().validate(&levels)?;
        Ok(Self { levels })
    }

    /// Loads and validates a custom pack directory as a full catalog.
    pub fn load_dir(pack_dir: impl AsRef<Path>) -> Result<Self> {
        let levels = PackLoader::new(pack_dir.as_ref()).load()?;
        Self::from_levels(levels)
    }

    /// Returns all levels, sorted by id.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Returns the level with the given id.
    pub fn get(&self, id: u32) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns true if the catalog holds no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The highest level id.
    pub fn last_id(&self) -> u32 {
        self.levels.last().map(|l| l.id).unwrap_or(0)
    }
}
