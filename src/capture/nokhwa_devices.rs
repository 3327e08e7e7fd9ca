use super::{
    Constraints, DeviceDescriptor, DeviceId, MediaDevices, MediaStream, TrackSettings,
};
use crate::error::CameraError;
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

/// Native camera access through nokhwa
pub struct NokhwaDevices {
    backend: Option<ApiBackend>,
}

impl NokhwaDevices {
    pub fn new() -> Self {
        let backend = nokhwa::native_api_backend();
        match backend {
            Some(backend) => tracing::debug!("Using camera backend {:?}", backend),
            None => tracing::warn!("No native camera backend for this platform"),
        }
        Self { backend }
    }

    /// Nokhwa ids are either a numeric index or a backend-specific string
    fn camera_index(id: &DeviceId) -> CameraIndex {
        match id.as_str().parse::<u32>() {
            Ok(index) => CameraIndex::Index(index),
            Err(_) => CameraIndex::String(id.as_str().to_string()),
        }
    }

    fn default_index(&mut self) -> Result<CameraIndex, CameraError> {
        // No facing information is exposed natively, the host's first
        // camera stands in for the environment-facing one.
        let first = self
            .enumerate_devices()
            .map_err(|e| e.while_opening("default"))?
            .into_iter()
            .next()
            .ok_or(CameraError::NoCamera)?;
        Ok(Self::camera_index(&first.id))
    }
}

impl Default for NokhwaDevices {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaDevices for NokhwaDevices {
    type Stream = NokhwaStream;

    fn is_supported(&self) -> bool {
        self.backend.is_some()
    }

    fn enumerate_devices(&mut self) -> Result<Vec<DeviceDescriptor>, CameraError> {
        let backend = self.backend.ok_or(CameraError::Unsupported)?;
        let cameras =
            nokhwa::query(backend).map_err(|e| CameraError::Enumeration(e.to_string()))?;

        Ok(cameras
            .iter()
            .map(|info| DeviceDescriptor {
                id: DeviceId::new(info.index().to_string()),
                label: info.human_name(),
            })
            .collect())
    }

    fn get_user_media(&mut self, constraints: &Constraints) -> Result<NokhwaStream, CameraError> {
        if self.backend.is_none() {
            return Err(CameraError::Unsupported);
        }

        let index = match constraints {
            Constraints::Exact(id) => Self::camera_index(id),
            Constraints::EnvironmentFacing => {
                tracing::debug!("No exact device requested, using the default camera");
                self.default_index()?
            }
        };

        tracing::info!("Opening camera {}", index);

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let acquisition = |e: nokhwa::NokhwaError| CameraError::Acquisition {
            device: index.to_string(),
            reason: e.to_string(),
        };

        let mut camera = Camera::new(index.clone(), requested).map_err(acquisition)?;
        camera.open_stream().map_err(acquisition)?;

        let resolution = camera.resolution();
        tracing::info!(
            "Camera {} streaming at {}x{}",
            index,
            resolution.width(),
            resolution.height()
        );

        Ok(NokhwaStream {
            device_id: DeviceId::new(index.to_string()),
            camera,
            live: true,
        })
    }
}

/// An open nokhwa camera stream
pub struct NokhwaStream {
    camera: Camera,
    device_id: DeviceId,
    live: bool,
}

impl MediaStream for NokhwaStream {
    fn settings(&self) -> TrackSettings {
        let resolution = self.camera.resolution();
        TrackSettings {
            device_id: Some(self.device_id.clone()),
            width: Some(resolution.width()).filter(|w| *w > 0),
            height: Some(resolution.height()).filter(|h| *h > 0),
        }
    }

    fn current_frame(&mut self) -> Result<RgbImage, CameraError> {
        let frame = self
            .camera
            .frame()
            .map_err(|e| CameraError::Frame(e.to_string()))?;

        frame
            .decode_image::<RgbFormat>()
            .map_err(|e| CameraError::Frame(e.to_string()))
    }

    fn stop(&mut self) {
        if !self.live {
            return;
        }
        if let Err(e) = self.camera.stop_stream() {
            tracing::warn!("Failed to stop camera {}: {}", self.device_id, e);
        }
        self.live = false;
        tracing::info!("Camera {} released", self.device_id);
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

impl Drop for NokhwaStream {
    fn drop(&mut self) {
        self.stop();
    }
}
