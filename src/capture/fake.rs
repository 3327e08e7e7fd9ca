use super::{Constraints, DeviceDescriptor, DeviceId, MediaDevices, MediaStream, TrackSettings};
use crate::error::CameraError;
use image::{Rgb, RgbImage};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Acquired(DeviceId),
    Stopped(DeviceId),
}

#[derive(Default)]
struct HostState {
    events: Vec<HostEvent>,
    live_streams: usize,
    max_live_streams: usize,
}

/// Scripted host. Every acquisition and stop is recorded.
pub struct FakeDevices {
    pub devices: Vec<DeviceDescriptor>,
    /// Settings reported by the next streams; the device id is always filled
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Size of the frames the streams deliver
    pub frame_size: (u32, u32),
    pub fail_acquire: bool,
    pub fail_enumerate: bool,
    /// Resolve the default camera by enumerating first, as nokhwa does
    pub default_via_enumeration: bool,
    pub supported: bool,
    state: Rc<RefCell<HostState>>,
}

impl FakeDevices {
    pub fn with_devices(ids: &[&str]) -> Self {
        Self {
            devices: ids
                .iter()
                .map(|id| DeviceDescriptor::video(*id, format!("Camera {id}")))
                .collect(),
            width: None,
            height: None,
            frame_size: (320, 240),
            fail_acquire: false,
            fail_enumerate: false,
            default_via_enumeration: false,
            supported: true,
            state: Rc::default(),
        }
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.state.borrow().events.clone()
    }

    pub fn live_streams(&self) -> usize {
        self.state.borrow().live_streams
    }

    pub fn max_live_streams(&self) -> usize {
        self.state.borrow().max_live_streams
    }
}

impl MediaDevices for FakeDevices {
    type Stream = FakeStream;

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn enumerate_devices(&mut self) -> Result<Vec<DeviceDescriptor>, CameraError> {
        if self.fail_enumerate {
            return Err(CameraError::Enumeration("host refused".into()));
        }
        Ok(self.devices.clone())
    }

    fn get_user_media(&mut self, constraints: &Constraints) -> Result<FakeStream, CameraError> {
        if self.fail_acquire {
            return Err(CameraError::Acquisition {
                device: format!("{constraints:?}"),
                reason: "permission denied".into(),
            });
        }

        if *constraints == Constraints::EnvironmentFacing && self.default_via_enumeration {
            self.enumerate_devices()?;
        }

        let device = match constraints {
            Constraints::Exact(id) => self
                .devices
                .iter()
                .find(|d| &d.id == id)
                .ok_or_else(|| CameraError::Acquisition {
                    device: id.to_string(),
                    reason: "device not found".into(),
                })?,
            Constraints::EnvironmentFacing => self.devices.first().ok_or(CameraError::NoCamera)?,
        };

        let mut state = self.state.borrow_mut();
        state.events.push(HostEvent::Acquired(device.id.clone()));
        state.live_streams += 1;
        state.max_live_streams = state.max_live_streams.max(state.live_streams);

        Ok(FakeStream {
            settings: TrackSettings {
                device_id: Some(device.id.clone()),
                width: self.width,
                height: self.height,
            },
            frame_size: self.frame_size,
            live: true,
            state: Rc::clone(&self.state),
        })
    }
}

pub struct FakeStream {
    settings: TrackSettings,
    frame_size: (u32, u32),
    live: bool,
    state: Rc<RefCell<HostState>>,
}

impl MediaStream for FakeStream {
    fn settings(&self) -> TrackSettings {
        self.settings.clone()
    }

    fn current_frame(&mut self) -> Result<RgbImage, CameraError> {
        if !self.live {
            return Err(CameraError::Frame("stream ended".into()));
        }
        let (width, height) = self.frame_size;
        Ok(RgbImage::from_pixel(width, height, Rgb([10, 200, 30])))
    }

    fn stop(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        let mut state = self.state.borrow_mut();
        state.live_streams -= 1;
        if let Some(id) = &self.settings.device_id {
            state.events.push(HostEvent::Stopped(id.clone()));
        }
    }

    fn is_live(&self) -> bool {
        self.live
    }
}
