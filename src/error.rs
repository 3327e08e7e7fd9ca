use thiserror::Error;

/// Errors raised by camera sessions and snapshot capture
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Camera API is not supported on this platform")]
    Unsupported,

    #[error("No camera found")]
    NoCamera,

    #[error("Failed to open camera {device}: {reason}")]
    Acquisition { device: String, reason: String },

    #[error("Failed to enumerate devices: {0}")]
    Enumeration(String),

    #[error("Camera is not open")]
    NoActiveSession,

    #[error("Failed to read frame: {0}")]
    Frame(String),

    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to save snapshot: {0}")]
    Io(#[from] std::io::Error),
}

impl CameraError {
    /// Whether the failure is shown to the user or only logged.
    ///
    /// Enumeration failures leave the device list as it was and are never
    /// surfaced; everything else aborts the triggering action with a notice.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, CameraError::Enumeration(_))
    }

    /// Failures hit while opening a camera always abort the open, so an
    /// enumeration done on that path is an acquisition failure.
    pub fn while_opening(self, device: &str) -> Self {
        match self {
            CameraError::Enumeration(reason) => CameraError::Acquisition {
                device: device.to_string(),
                reason,
            },
            other => other,
        }
    }
}
