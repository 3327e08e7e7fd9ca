mod render;

pub use render::{encode_png, render_frame};

use crate::capture::MediaStream;
use crate::error::CameraError;
use crate::session::CaptureSession;
use chrono::{DateTime, Utc};

/// Size used when neither the stream nor the frame report one
pub const DEFAULT_SIZE: (u32, u32) = (1280, 720);

/// An encoded still ready to be downloaded
#[derive(Debug, Clone)]
pub struct SnapshotArtifact {
    pub width: u32,
    pub height: u32,
    pub filename: String,
    pub png: Vec<u8>,
}

pub fn snapshot_filename(captured_at: DateTime<Utc>) -> String {
    format!("snapshot_{}.png", captured_at.timestamp_millis())
}

/// Pick the surface size, one axis at a time: negotiated setting, then the
/// frame's own size, then `fallback`. Zero counts as unknown.
pub fn resolve_dimensions(
    settings: (Option<u32>, Option<u32>),
    intrinsic: (u32, u32),
    fallback: (u32, u32),
) -> (u32, u32) {
    let pick = |setting: Option<u32>, intrinsic: u32, fallback: u32| {
        setting
            .filter(|v| *v > 0)
            .or(Some(intrinsic).filter(|v| *v > 0))
            .unwrap_or(fallback)
    };

    (
        pick(settings.0, intrinsic.0, fallback.0),
        pick(settings.1, intrinsic.1, fallback.1),
    )
}

/// Turns the live frame of a session into a PNG artifact
pub struct SnapshotCapturer {
    fallback: (u32, u32),
}

impl SnapshotCapturer {
    pub fn new(fallback_width: u32, fallback_height: u32) -> Self {
        Self {
            fallback: (fallback_width, fallback_height),
        }
    }

    pub fn capture<S: MediaStream>(
        &self,
        session: Option<&mut CaptureSession<S>>,
    ) -> Result<SnapshotArtifact, CameraError> {
        self.capture_at(session, Utc::now())
    }

    /// Single read of the current frame; any failure fails the capture
    pub fn capture_at<S: MediaStream>(
        &self,
        session: Option<&mut CaptureSession<S>>,
        captured_at: DateTime<Utc>,
    ) -> Result<SnapshotArtifact, CameraError> {
        let _span = tracing::debug_span!("capture").entered();

        let session = session.ok_or(CameraError::NoActiveSession)?;
        let stream = session.stream_mut();
        if !stream.is_live() {
            return Err(CameraError::Frame("stream is not live".into()));
        }

        let settings = stream.settings();
        let frame = stream.current_frame()?;

        let (width, height) = resolve_dimensions(
            (settings.width, settings.height),
            frame.dimensions(),
            self.fallback,
        );
        tracing::debug!(
            "Frame {}x{}, surface {}x{}",
            frame.width(),
            frame.height(),
            width,
            height
        );

        let surface = render_frame(&frame, width, height);
        let png = encode_png(&surface)?;

        let filename = snapshot_filename(captured_at);
        tracing::info!("Captured {} ({}x{}, {} bytes)", filename, width, height, png.len());

        Ok(SnapshotArtifact {
            width,
            height,
            filename,
            png,
        })
    }
}

impl Default for SnapshotCapturer {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE.0, DEFAULT_SIZE.1)
    }
}
