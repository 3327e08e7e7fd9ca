mod nokhwa_devices;
#[cfg(test)]
pub mod fake;

pub use nokhwa_devices::NokhwaDevices;

use crate::error::CameraError;
use image::RgbImage;
use std::fmt;

/// Opaque identifier of a capture device as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Some hosts hide stable ids until permission is granted and hand out
    /// empty ones instead. Those cannot be used for an exact-match request.
    pub fn is_resolvable(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A selectable video input: id and label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub id: DeviceId,
    pub label: String,
}

impl DeviceDescriptor {
    #[cfg(test)]
    pub fn video(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: DeviceId::new(id),
            label: label.into(),
        }
    }

    /// Label shown in the device list, `position` is zero-based
    pub fn display_label(&self, position: usize) -> String {
        if self.label.is_empty() {
            format!("Camera {}", position + 1)
        } else {
            self.label.clone()
        }
    }
}

/// What to ask the host for when acquiring a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraints {
    /// Only this exact device
    Exact(DeviceId),
    /// Whatever camera the host considers environment-facing
    EnvironmentFacing,
}

impl Constraints {
    /// Exact-match on `device` when it is usable, otherwise the
    /// environment-facing default.
    pub fn for_device(device: Option<&DeviceId>) -> Self {
        match device {
            Some(id) if id.is_resolvable() => Constraints::Exact(id.clone()),
            _ => Constraints::EnvironmentFacing,
        }
    }
}

/// Negotiated track settings. Zero or unknown values are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSettings {
    pub device_id: Option<DeviceId>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A live video stream handed out by [`MediaDevices`]
pub trait MediaStream {
    /// Settings the device actually negotiated
    fn settings(&self) -> TrackSettings;

    /// Read the frame currently being displayed
    fn current_frame(&mut self) -> Result<RgbImage, CameraError>;

    /// Release every underlying hardware track
    fn stop(&mut self);

    fn is_live(&self) -> bool;
}

/// Host capability for discovering and opening capture devices
pub trait MediaDevices {
    type Stream: MediaStream;

    /// Whether the host exposes a camera API at all
    fn is_supported(&self) -> bool {
        true
    }

    /// List the video inputs the host knows about, in host order
    fn enumerate_devices(&mut self) -> Result<Vec<DeviceDescriptor>, CameraError>;

    /// Open a stream matching `constraints`
    fn get_user_media(&mut self, constraints: &Constraints) -> Result<Self::Stream, CameraError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_device_id_falls_back_to_facing_mode() {
        let blank = DeviceId::new("");
        assert_eq!(
            Constraints::for_device(Some(&blank)),
            Constraints::EnvironmentFacing
        );
        assert_eq!(Constraints::for_device(None), Constraints::EnvironmentFacing);

        let cam = DeviceId::new("usb-1");
        assert_eq!(
            Constraints::for_device(Some(&cam)),
            Constraints::Exact(cam.clone())
        );
    }

    #[test]
    fn unlabeled_devices_get_positional_names() {
        let unnamed = DeviceDescriptor::video("a", "");
        assert_eq!(unnamed.display_label(1), "Camera 2");

        let named = DeviceDescriptor::video("b", "Front Camera");
        assert_eq!(named.display_label(0), "Front Camera");
    }
}
