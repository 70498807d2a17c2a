use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::Bytes;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact {0} not found")]
    NotFound(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Artifact {0} has no bytecode")]
    EmptyBytecode(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BytecodeField {
    // hardhat
    Hex(Bytes),
    // foundry
    Object { object: Bytes },
}

#[derive(Deserialize)]
struct ArtifactFile {
    bytecode: BytecodeField,
}

/// Creation bytecode of compiled contracts, looked up by contract name.
///
/// Hardhat and Foundry output directories are both supported: every `*.json`
/// file below the root is indexed by its file stem, so `Bridge.sol/Bridge.json`
/// is found as `Bridge`. The first file found for a name wins.
#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    index: HashMap<String, PathBuf>,
    preloaded: HashMap<String, Bytes>,
}

impl ArtifactStore {
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let mut index = HashMap::new();
        index_dir(root.as_ref(), &mut index)?;
        log::info!(
            "Indexed {} artifacts under {:?}",
            index.len(),
            root.as_ref()
        );
        Ok(Self {
            index,
            preloaded: HashMap::new(),
        })
    }

    /// Registers bytecode directly, taking precedence over indexed files.
    pub fn with_bytecode(mut self, name: &str, bytecode: Bytes) -> Self {
        self.preloaded.insert(name.to_string(), bytecode);
        self
    }

    pub fn bytecode(&self, name: &str) -> Result<Bytes, ArtifactError> {
        if let Some(bytecode) = self.preloaded.get(name) {
            return non_empty(name, bytecode.clone());
        }
        let path = self
            .index
            .get(name)
            .ok_or_else(|| ArtifactError::NotFound(name.to_string()))?;
        let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        let artifact: ArtifactFile =
            serde_json::from_str(&content).map_err(|e| ArtifactError::Parse {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        let bytecode = match artifact.bytecode {
            BytecodeField::Hex(bytes) => bytes,
            BytecodeField::Object { object } => object,
        };
        non_empty(name, bytecode)
    }
}

fn non_empty(name: &str, bytecode: Bytes) -> Result<Bytes, ArtifactError> {
    if bytecode.is_empty() {
        return Err(ArtifactError::EmptyBytecode(name.to_string()));
    }
    Ok(bytecode)
}

fn index_dir(dir: &Path, index: &mut HashMap<String, PathBuf>) -> Result<(), ArtifactError> {
    let io_error = |source| ArtifactError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(io_error)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error)?;
    entries.sort();
    for path in entries {
        if path.is_dir() {
            index_dir(&path, index)?;
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        // hardhat writes a `.dbg.json` next to every artifact
        if file_name.ends_with(".dbg.json") {
            continue;
        }
        let Some(name) = file_name.strip_suffix(".json") else {
            continue;
        };
        if index.contains_key(name) {
            log::debug!("Ignoring duplicate artifact {:?}", path);
            continue;
        }
        index.insert(name.to_string(), path);
    }
    Ok(())
}
