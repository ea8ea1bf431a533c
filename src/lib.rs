pub mod assets;
pub mod cli;
pub mod document;
pub mod error;
pub mod graph;
pub mod overlay;
pub mod primitives;
pub mod renderer;
pub mod scene;
pub mod source;
pub mod viewer;

pub use assets::{flattened_file_name, AssetLoader};
pub use document::{NodeDescriptor, NodeEntry, NodeKind, SceneDocument};
pub use error::{NodeError, StartupError};
pub use graph::{instantiate, BuildReport, NodeBuilt, NodeOutcome};
pub use overlay::{OverlayState, StatusOverlay};
pub use scene::Scene;
