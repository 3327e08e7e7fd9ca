use crate::capture::{DeviceId, MediaDevices};
use crate::error::CameraError;
use crate::notify::ErrorReporter;
use crate::output::DownloadSink;
use crate::session::SessionManager;
use crate::snapshot::SnapshotCapturer;
use std::ops::ControlFlow;
use std::str::FromStr;

/// Named user actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Pick a device from the list and switch to it
    Select(Option<DeviceId>),
    /// Rotate to the next camera
    Switch,
    Capture,
    Devices,
    Help,
    Quit,
}

impl Action {
    pub const USAGE: &'static str = "\
select <id>  switch to a device (no id: default camera)
switch       rotate to the next camera
capture      save a snapshot of the current frame
devices      refresh and show the camera list
help         show this help
quit         release the camera and exit";
}

impl FromStr for Action {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let arg = words.next();

        match name {
            "select" => Ok(Action::Select(arg.map(DeviceId::new))),
            "switch" | "rotate" => Ok(Action::Switch),
            "capture" | "snap" => Ok(Action::Capture),
            "devices" | "list" => Ok(Action::Devices),
            "help" | "?" => Ok(Action::Help),
            "quit" | "exit" => Ok(Action::Quit),
            other => Err(format!("Unknown command: {other}")),
        }
    }
}

/// Dispatches actions against the session and reports failures
pub struct Controller<D: MediaDevices, O: DownloadSink, R: ErrorReporter> {
    session: SessionManager<D>,
    capturer: SnapshotCapturer,
    download: O,
    reporter: R,
}

impl<D: MediaDevices, O: DownloadSink, R: ErrorReporter> Controller<D, O, R> {
    pub fn new(devices: D, capturer: SnapshotCapturer, download: O, reporter: R) -> Self {
        Self {
            session: SessionManager::new(devices),
            capturer,
            download,
            reporter,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &SessionManager<D> {
        &self.session
    }

    #[cfg(test)]
    pub fn download(&self) -> &O {
        &self.download
    }

    #[cfg(test)]
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Open the first camera and fill the device list.
    ///
    /// Returns false when the host has no camera API.
    pub fn init(&mut self, initial: Option<&DeviceId>) -> bool {
        if !self.session.devices().is_supported() {
            self.report(CameraError::Unsupported);
            return false;
        }

        if let Err(e) = self.session.start(initial) {
            self.report(e);
        }
        if let Err(e) = self.session.list_devices() {
            self.report(e);
        }

        let select = self.session.select_mut();
        if !select.options().is_empty() && select.selected().is_none() {
            select.select_first();
        }

        true
    }

    pub fn handle(&mut self, action: Action) -> ControlFlow<()> {
        tracing::debug!("Handling {:?}", action);

        let result = match action {
            Action::Select(device) => self.select_device(device),
            Action::Switch => self.session.rotate(),
            Action::Capture => self.capture(),
            Action::Devices => self.show_devices(),
            Action::Help => {
                println!("{}", Action::USAGE);
                Ok(())
            }
            Action::Quit => return ControlFlow::Break(()),
        };

        if let Err(e) = result {
            self.report(e);
        }
        ControlFlow::Continue(())
    }

    /// Release the camera
    pub fn shutdown(&mut self) {
        tracing::info!("Shutting down");
        self.session.teardown();
    }

    pub fn alert(&mut self, message: &str) {
        self.reporter.alert(message);
    }

    /// Device list as shown to the user, selection marked with `*`
    pub fn device_list(&self) -> String {
        let select = self.session.select();
        if select.options().is_empty() {
            return "No cameras found".to_string();
        }

        select
            .options()
            .iter()
            .enumerate()
            .map(|(i, device)| {
                let mark = if select.selected() == Some(&device.id) { '*' } else { ' ' };
                format!("{mark} {}  {}", device.id, device.display_label(i))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn show_devices(&mut self) -> Result<(), CameraError> {
        self.session.list_devices()?;
        println!("{}", self.device_list());
        Ok(())
    }

    fn select_device(&mut self, device: Option<DeviceId>) -> Result<(), CameraError> {
        let chosen = match device {
            Some(id) => {
                let select = self.session.select_mut();
                select.select(&id);
                select.selected().cloned()
            }
            None => None,
        };
        self.session.switch_to_selected(chosen.as_ref())
    }

    fn capture(&mut self) -> Result<(), CameraError> {
        let artifact = self.capturer.capture(self.session.session_mut())?;
        self.download.offer(&artifact)?;

        if let Some(path) = self.download.current() {
            println!(
                "Download snapshot ({}x{}): {}",
                artifact.width,
                artifact.height,
                path.display()
            );
        }
        Ok(())
    }

    fn report(&mut self, err: CameraError) {
        if err.is_user_visible() {
            self.reporter.alert(&err.to_string());
        } else {
            tracing::warn!("{}", err);
        }
    }
}
