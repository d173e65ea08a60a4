//! In-memory model of a scene description document.
//!
//! Only the parts the animation pipeline reads are modeled. Field names follow
//! the glTF 1.x JSON layout, where every collection is an id-keyed object.
//! Unknown fields are ignored.

use std::collections::BTreeMap;

use kinema_core::{AccessorDescriptor, BufferViewDescriptor, SchemaVersion};
use rustc_hash::FxHashMap;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub asset: Option<Asset>,
    #[serde(default)]
    pub accessors: FxHashMap<String, AccessorDescriptor>,
    #[serde(default)]
    pub buffer_views: FxHashMap<String, BufferViewDescriptor>,
    #[serde(default)]
    pub nodes: FxHashMap<String, NodeDescription>,
    /// Sorted by id, which fixes the registration order of resolved units.
    #[serde(default)]
    pub animations: BTreeMap<String, AnimationDescription>,
}

impl Document {
    pub fn from_json_slice(json: &[u8]) -> kinema_core::Result<Self> {
        Ok(serde_json::from_slice(json)?)
    }

    pub fn from_json_str(json: &str) -> kinema_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Declared schema version, `1.0.0` when the document does not say.
    #[must_use]
    pub fn version(&self) -> SchemaVersion {
        self.asset
            .as_ref()
            .and_then(|asset| asset.version.as_deref())
            .map(SchemaVersion::parse)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NodeDescription {
    #[serde(default)]
    pub name: Option<String>,
}

/// One animation: channels bound to samplers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnimationDescription {
    #[serde(default)]
    pub channels: Vec<ChannelDescription>,
    #[serde(default)]
    pub samplers: FxHashMap<String, SamplerDescription>,
    /// Legacy documents: symbolic parameter name to accessor id.
    #[serde(default)]
    pub parameters: Option<FxHashMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelDescription {
    pub sampler: String,
    pub target: ChannelTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelTarget {
    /// Target node id. Also accepted as `node`.
    #[serde(alias = "node")]
    pub id: String,
    pub path: String,
}

/// Input/output references are parameter names in legacy documents and
/// accessor ids in newer ones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SamplerDescription {
    pub input: String,
    pub output: String,
    #[serde(default)]
    pub interpolation: Option<String>,
}

impl ChannelDescription {
    #[must_use]
    pub fn new(
        sampler: impl Into<String>,
        node: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            sampler: sampler.into(),
            target: ChannelTarget {
                id: node.into(),
                path: path.into(),
            },
        }
    }
}

impl SamplerDescription {
    #[must_use]
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            interpolation: None,
        }
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolation: impl Into<String>) -> Self {
        self.interpolation = Some(interpolation.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_legacy_layout() {
        let doc = Document::from_json_str(
            r#"{
                "animations": {
                    "walk": {
                        "channels": [{ "sampler": "s0", "target": { "id": "hip", "path": "rotation" } }],
                        "samplers": { "s0": { "input": "TIME", "output": "rot" } },
                        "parameters": { "TIME": "acc_t", "rot": "acc_r" }
                    }
                },
                "nodes": { "hip": { "name": "Hip" } },
                "extensionsUsed": []
            }"#,
        )
        .unwrap();

        let walk = &doc.animations["walk"];
        assert_eq!(walk.channels[0].target.id, "hip");
        assert_eq!(walk.samplers["s0"].interpolation, None);
        assert_eq!(walk.parameters.as_ref().unwrap()["TIME"], "acc_t");
        assert_eq!(doc.version(), SchemaVersion::new(1, 0, 0));
    }

    #[test]
    fn node_alias_and_version() {
        let doc = Document::from_json_str(
            r#"{
                "asset": { "version": "1.1" },
                "animations": {
                    "a": {
                        "channels": [{ "sampler": "s", "target": { "node": "n", "path": "scale" } }]
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(doc.animations["a"].channels[0].target.id, "n");
        assert_eq!(doc.version(), SchemaVersion::new(1, 1, 0));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Document::from_json_str("{ \"animations\": 3 }").is_err());
    }
}
