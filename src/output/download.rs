use super::DownloadSink;
use crate::error::CameraError;
use crate::snapshot::SnapshotArtifact;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Saves snapshots into a directory under their generated filename
pub struct FileDownload {
    dir: PathBuf,
    current: Option<PathBuf>,
}

impl FileDownload {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            current: None,
        }
    }
}

impl DownloadSink for FileDownload {
    fn offer(&mut self, artifact: &SnapshotArtifact) -> Result<(), CameraError> {
        let path = self.dir.join(&artifact.filename);

        let mut file = File::create(&path)?;
        if let Err(e) = file.write_all(&artifact.png) {
            drop(file);
            if let Err(remove) = fs::remove_file(&path) {
                tracing::warn!("Failed to remove partial {}: {}", path.display(), remove);
            }
            return Err(e.into());
        }

        tracing::info!("Download snapshot: {}", path.display());
        self.current = Some(path);

        Ok(())
    }

    fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }
}
