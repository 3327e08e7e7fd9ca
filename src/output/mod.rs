mod download;

pub use download::FileDownload;

use crate::error::CameraError;
use crate::snapshot::SnapshotArtifact;
use std::path::Path;

/// Where captured snapshots are offered to the user
pub trait DownloadSink {
    /// Make the artifact available and show the download. A failed offer
    /// leaves the previously shown download in place.
    fn offer(&mut self, artifact: &SnapshotArtifact) -> Result<(), CameraError>;

    /// The download currently shown, if any capture succeeded yet
    fn current(&self) -> Option<&Path>;
}
