/// Single channel for failures the user must see
pub trait ErrorReporter {
    fn alert(&mut self, message: &str);
}

/// Prints alerts to stderr and logs them
#[derive(Default)]
pub struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
    fn alert(&mut self, message: &str) {
        tracing::error!("{}", message);
        eprintln!("! {message}");
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct RecordingReporter {
    pub alerts: Vec<String>,
}

#[cfg(test)]
impl ErrorReporter for RecordingReporter {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
