// document.rs - Scene document parsing and shape validation
use serde::{Deserialize, Deserializer};

use crate::error::StartupError;

/// The fetched scene description: an ordered list of node entries.
/// Order is instantiation order.
#[derive(Debug, Clone)]
pub struct SceneDocument {
    pub nodes: Vec<NodeEntry>,
}

impl SceneDocument {
    /// Parses and validates a raw document body.
    ///
    /// A body that is not JSON at all is a `Parse` error; JSON that is
    /// missing the `nodes` array (or where `nodes` is not an array) is a
    /// `Validation` error. An empty `nodes` array is valid and produces an
    /// empty scene.
    ///
    /// Elements of `nodes` deserialize individually: one element that does
    /// not match the descriptor shape becomes `NodeEntry::Malformed` and
    /// fails only that node at instantiation time, never the document.
    pub fn parse(body: &[u8]) -> Result<Self, StartupError> {
        let value: serde_json::Value = serde_json::from_slice(body)?;

        let serde_json::Value::Object(mut document) = value else {
            return Err(StartupError::Validation(
                "document root is not an object".to_owned(),
            ));
        };
        let Some(serde_json::Value::Array(elements)) = document.remove("nodes") else {
            return Err(StartupError::Validation(
                "document must contain a `nodes` array".to_owned(),
            ));
        };

        Ok(Self {
            nodes: elements.into_iter().map(NodeEntry::from_value).collect(),
        })
    }
}

/// One element of the `nodes` array. Malformed elements keep their id and
/// decode error so instantiation can report them in document order alongside
/// the well-formed nodes.
#[derive(Debug, Clone)]
pub enum NodeEntry {
    Node(NodeDescriptor),
    Malformed { id: String, message: String },
}

impl NodeEntry {
    fn from_value(value: serde_json::Value) -> Self {
        let id = value
            .get("id")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_owned();
        match serde_json::from_value(value) {
            Ok(node) => Self::Node(node),
            Err(err) => Self::Malformed {
                id,
                message: err.to_string(),
            },
        }
    }

    pub fn descriptor(&self) -> Option<&NodeDescriptor> {
        match self {
            Self::Node(node) => Some(node),
            Self::Malformed { .. } => None,
        }
    }

    /// Display label for logging: the entry id, or a positional label when
    /// the id is missing.
    pub fn label(&self, index: usize) -> String {
        let id = match self {
            Self::Node(node) => node.id.as_str(),
            Self::Malformed { id, .. } => id.as_str(),
        };
        if id.is_empty() {
            format!("node #{index}")
        } else {
            id.to_owned()
        }
    }
}

/// One entry in the scene document.
///
/// Descriptors are read-only and transient: parsed once, consumed during
/// instantiation, never persisted. Fields that the original viewer tolerated
/// being absent are optional here so that their absence fails the single
/// node, not the whole document.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDescriptor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub transform: Option<NodeTransform>,
    #[serde(default = "flag_default", deserialize_with = "flag_literal_false")]
    pub enabled: bool,
    #[serde(default = "flag_default", deserialize_with = "flag_literal_false")]
    pub visible: bool,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// The closed `kind` tag. Values outside the four known kinds (and a
/// missing tag) map to `Unknown`, which instantiation skips silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Camera,
    Light,
    Mesh,
    Model,
    #[serde(other)]
    #[default]
    Unknown,
}

/// Descriptor transform. `position` is required by the instantiation of
/// every kind that reads the transform; `rotation` and `scaling` default to
/// zero rotation and unit scale.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeTransform {
    #[serde(default)]
    pub position: Option<[f32; 3]>,
    #[serde(default)]
    pub rotation: Option<[f32; 3]>,
    #[serde(default)]
    pub scaling: Option<[f32; 3]>,
}

fn flag_default() -> bool {
    true
}

/// Only the literal JSON `false` disables; any other value (`null`, `0`,
/// strings, objects) counts as enabled, matching the document contract.
fn flag_literal_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(!matches!(value, serde_json::Value::Bool(false)))
}
