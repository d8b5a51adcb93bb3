//! Level definitions, packs, and the per-level session engine.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod resource;
pub mod session;
pub mod validation;

pub use catalog::LevelCatalog;
pub use error::LevelError;
pub use loader::PackLoader;
pub use resource::{
    CommandPattern, CompletionRule, Level, LevelPackSpec, ObjectMeta, Resource, ResourceKind,
    API_VERSION,
};
pub use session::{LevelSession, SubmitOutcome};
pub use validation::PackValidator;
