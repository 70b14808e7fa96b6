use std::path::{Path, PathBuf};

use crate::data::LoadError;

/// An opaque serialized blob (trained classifier or feature scaler). The
/// scoring path never reads the bytes; the prediction view only reports that
/// the files are present.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl Artifact {
    fn read(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Artifact {
            path: path.to_path_buf(),
            bytes,
        })
    }

    pub fn describe(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        format!("{name} ({} bytes)", self.bytes.len())
    }
}

#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub model: Artifact,
    pub scaler: Artifact,
}

pub fn load_artifacts(model_path: &Path, scaler_path: &Path) -> Result<ModelArtifacts, LoadError> {
    Ok(ModelArtifacts {
        model: Artifact::read(model_path)?,
        scaler: Artifact::read(scaler_path)?,
    })
}
