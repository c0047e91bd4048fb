//! Reads pre-built models from files.
use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use std::fs;
use std::path::Path;

use crate::base_model::{BaseModel, StoredModel};
use crate::error::{ResourceError, Result};
use crate::sample::Schema;


/// A model read from a file,
/// with the schema of the data it was trained on if the file has one.
pub struct LoadedModel {
    /// The model.
    pub model: Box<dyn BaseModel>,
    /// The schema of the training data, if recorded.
    pub header: Option<Schema>,
}


/// A trait that turns a file into a [`LoadedModel`].
///
/// The ensemble only talks to this trait,
/// so any persistence format can be plugged in.
pub trait ModelLoader: Send + Sync {
    /// Read the model stored at `path`.
    ///
    /// Fails with [`ResourceError::FileNotFound`]
    /// if `path` is not a readable file,
    /// and with [`ResourceError::InvalidModel`]
    /// if the file does not hold a model.
    fn load(&self, path: &Path) -> Result<LoadedModel>;
}


/// The on-disk layout of [`JsonModelLoader`].
#[derive(Serialize, Deserialize)]
struct ModelFile {
    model: StoredModel,
    header: Option<Schema>,
}


/// Reads models written by [`save_model`].
///
/// The file is a JSON object
/// `{"model": <StoredModel>, "header": <Schema or null>}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonModelLoader;


impl JsonModelLoader {
    /// Construct a new instance of [`JsonModelLoader`].
    pub fn new() -> Self {
        Self
    }
}


impl ModelLoader for JsonModelLoader {
    fn load(&self, path: &Path) -> Result<LoadedModel> {
        info!(path = %path.display(), "Loading pre-built model");
        let bytes = read_file(path)?;
        let file = serde_json::from_slice::<ModelFile>(&bytes[..])
            .map_err(|e| ResourceError::InvalidModel {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let model = file.model.into_model();
        info!(
            path = %path.display(),
            model = %model.spec(),
            header = file.header.is_some(),
            "Pre-built model loaded"
        );
        Ok(LoadedModel { model, header: file.header })
    }
}


/// Reads the whole file at `path`.
/// Anything but a readable regular file is [`ResourceError::FileNotFound`].
fn read_file(path: &Path) -> std::result::Result<Vec<u8>, ResourceError> {
    let not_found = || ResourceError::FileNotFound { path: path.to_path_buf() };
    if !path.is_file() {
        return Err(not_found());
    }
    fs::read(path)
        .map_err(|e| {
            warn!(path = %path.display(), error = %e, "Cannot read the file");
            not_found()
        })
}


/// Writes `model` and the schema of its training data to `path`
/// in the layout [`JsonModelLoader`] reads.
pub fn save_model<P, M>(path: P, model: M, header: Option<&Schema>)
    -> Result<()>
    where P: AsRef<Path>,
          M: Into<StoredModel>,
{
    let file = ModelFile {
        model: model.into(),
        header: header.cloned(),
    };
    let bytes = serde_json::to_vec(&file)
        .map_err(|e| ResourceError::InvalidModel {
            path: path.as_ref().to_path_buf(),
            reason: e.to_string(),
        })?;
    fs::write(path, bytes)?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn assert_not_found(path: &Path) {
        match read_file(path) {
            Err(ResourceError::FileNotFound { path: p }) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn a_directory_is_not_a_model_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_not_found(dir.path());
        assert_not_found(&dir.path().join("missing.json"));
    }

    // A regular file whose read fails, even for a privileged user.
    #[cfg(target_os = "linux")]
    #[test]
    fn an_unreadable_file_is_a_resource_error() {
        assert_not_found(Path::new("/proc/self/mem"));

        let err = JsonModelLoader::new()
            .load(Path::new("/proc/self/mem"))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            crate::EnsembleError::Resource(ResourceError::FileNotFound { .. })
        ));
    }
}
