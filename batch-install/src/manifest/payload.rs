//! Install manifest resolution

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::app::inputs::Inputs;
use crate::errors::{ConfigErrorKind, InstallError};
use crate::filesys::file::File;
use crate::models::batch::Payload;

/// Manifest file looked up in the workspace when no filename is given
pub const DEFAULT_MANIFEST_FILENAME: &str = "now_batch_manifest.json";

/// Where the manifest comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// A JSON file inside the workspace
    File { path: PathBuf },

    /// A JSON string passed in through the workflow inputs
    Inline { text: String },
}

impl ManifestSource {
    /// Resolve a source selector (`"file"` or `"workflow"`) without touching the filesystem
    pub fn resolve(
        selector: &str,
        workspace: Option<&Path>,
        inputs: &Inputs,
    ) -> Result<Self, ConfigErrorKind> {
        match selector {
            "file" => {
                let workspace = workspace.ok_or(ConfigErrorKind::NoWorkspace)?;
                let filename = inputs
                    .get_config_value("filename")
                    .unwrap_or(DEFAULT_MANIFEST_FILENAME);
                Ok(ManifestSource::File {
                    path: workspace.join(filename),
                })
            }
            "workflow" => Ok(ManifestSource::Inline {
                text: inputs
                    .get_config_value("manifest")
                    .unwrap_or_default()
                    .to_string(),
            }),
            _ => Err(ConfigErrorKind::WrongSource),
        }
    }

    /// Load and parse the manifest
    pub async fn load(&self) -> Result<Payload, InstallError> {
        match self {
            ManifestSource::File { path } => {
                debug!("Reading manifest from {}", path.display());
                File::new(path).read_json().await.map_err(|e| {
                    debug!("Unable to load manifest {}: {}", path.display(), e);
                    ConfigErrorKind::MissingPayload.into()
                })
            }
            ManifestSource::Inline { text } => serde_json::from_str(text).map_err(|e| {
                debug!("Unable to parse inline manifest: {}", e);
                ConfigErrorKind::MissingPayload.into()
            }),
        }
    }
}

/// Builds the request payload from one of the supported sources
pub struct PayloadBuilder<'a> {
    workspace: Option<&'a Path>,
    inputs: &'a Inputs,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new(workspace: Option<&'a Path>, inputs: &'a Inputs) -> Self {
        Self { workspace, inputs }
    }

    /// Build the payload for the given source selector
    pub async fn build(&self, selector: &str) -> Result<Payload, InstallError> {
        let source = ManifestSource::resolve(selector, self.workspace, self.inputs)?;
        source.load().await
    }
}
