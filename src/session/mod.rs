mod select;

pub use select::DeviceSelect;

use crate::capture::{Constraints, DeviceDescriptor, DeviceId, MediaDevices, MediaStream};
use crate::error::CameraError;

/// The open stream and the device that produced it
pub struct CaptureSession<S> {
    stream: S,
    device_id: Option<DeviceId>,
}

impl<S: MediaStream> CaptureSession<S> {
    pub fn device_id(&self) -> Option<&DeviceId> {
        self.device_id.as_ref()
    }

    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }
}

/// Owns the single active camera session and the device list shown to the user
pub struct SessionManager<D: MediaDevices> {
    devices: D,
    session: Option<CaptureSession<D::Stream>>,
    select: DeviceSelect,
}

impl<D: MediaDevices> SessionManager<D> {
    pub fn new(devices: D) -> Self {
        Self {
            devices,
            session: None,
            select: DeviceSelect::default(),
        }
    }

    pub fn devices(&self) -> &D {
        &self.devices
    }

    #[cfg(test)]
    pub fn devices_mut(&mut self) -> &mut D {
        &mut self.devices
    }

    pub fn select(&self) -> &DeviceSelect {
        &self.select
    }

    pub fn select_mut(&mut self) -> &mut DeviceSelect {
        &mut self.select
    }

    #[cfg(test)]
    pub fn session(&self) -> Option<&CaptureSession<D::Stream>> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut CaptureSession<D::Stream>> {
        self.session.as_mut()
    }

    pub fn active_device(&self) -> Option<&DeviceId> {
        self.session.as_ref().and_then(|s| s.device_id())
    }

    /// Replace the active session with a fresh stream.
    ///
    /// The previous stream is always released before the new one is
    /// requested. On failure no stream is left open.
    pub fn start(&mut self, device: Option<&DeviceId>) -> Result<(), CameraError> {
        self.teardown();

        let constraints = Constraints::for_device(device);
        tracing::debug!("Requesting stream with {:?}", constraints);

        let stream = self.devices.get_user_media(&constraints).map_err(|e| {
            let target = device.map_or("default", DeviceId::as_str);
            e.while_opening(target)
        })?;
        let device_id = stream.settings().device_id;

        match &device_id {
            Some(id) => tracing::info!("Session started on device {}", id),
            None => tracing::info!("Session started on an unidentified device"),
        }

        self.session = Some(CaptureSession { stream, device_id });

        // Labels are often only visible once access was granted
        if let Err(e) = self.list_devices() {
            tracing::warn!("Device refresh after start failed: {}", e);
        }

        Ok(())
    }

    /// Re-enumerate video inputs into the device list.
    ///
    /// On failure the list is left as it was.
    pub fn list_devices(&mut self) -> Result<&[DeviceDescriptor], CameraError> {
        let video = self.devices.enumerate_devices()?;

        tracing::debug!("Found {} video input(s)", video.len());

        let active = self.session.as_ref().and_then(|s| s.device_id.clone());
        self.select.replace_options(video, active.as_ref());

        Ok(self.select.options())
    }

    /// Start the given device, or the default camera when there is no usable id
    pub fn switch_to_selected(&mut self, device: Option<&DeviceId>) -> Result<(), CameraError> {
        self.start(device)
    }

    /// Move to the next listed device, wrapping around.
    ///
    /// Does nothing with fewer than two devices. An active device that is
    /// not in the list moves to the first entry.
    pub fn rotate(&mut self) -> Result<(), CameraError> {
        let options = self.select.options();
        if options.len() <= 1 {
            tracing::debug!("Nothing to rotate to ({} device(s))", options.len());
            return Ok(());
        }

        let next_index = match self.active_device() {
            Some(active) => options
                .iter()
                .position(|d| &d.id == active)
                .map_or(0, |i| (i + 1) % options.len()),
            None => 0,
        };
        let next = options[next_index].id.clone();

        tracing::info!("Rotating to device {}", next);
        self.select.select(&next);
        self.start(Some(&next))
    }

    /// Release the active stream, if any
    pub fn teardown(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stream.stop();
        }
    }
}
