use crate::capture::{DeviceDescriptor, DeviceId};

/// The device picker: listed options plus the current selection
#[derive(Debug, Default)]
pub struct DeviceSelect {
    options: Vec<DeviceDescriptor>,
    selected: Option<DeviceId>,
}

impl DeviceSelect {
    pub fn options(&self) -> &[DeviceDescriptor] {
        &self.options
    }

    pub fn selected(&self) -> Option<&DeviceId> {
        self.selected.as_ref()
    }

    pub fn contains(&self, id: &DeviceId) -> bool {
        self.options.iter().any(|d| &d.id == id)
    }

    /// Select `id` if it is one of the options, otherwise clear the selection
    pub fn select(&mut self, id: &DeviceId) {
        self.selected = self.contains(id).then(|| id.clone());
    }

    pub fn select_first(&mut self) {
        self.selected = self.options.first().map(|d| d.id.clone());
    }

    /// Rebuild the option list. The active device wins the selection when it
    /// is still listed, then the previous selection, else nothing.
    pub fn replace_options(&mut self, options: Vec<DeviceDescriptor>, active: Option<&DeviceId>) {
        let previous = self.selected.take();
        self.options = options;

        self.selected = active
            .filter(|id| self.contains(id))
            .cloned()
            .or_else(|| previous.filter(|id| self.contains(id)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(ids: &[&str]) -> Vec<DeviceDescriptor> {
        ids.iter()
            .map(|id| DeviceDescriptor::video(*id, ""))
            .collect()
    }

    #[test]
    fn active_device_keeps_selection_across_refresh() {
        let mut select = DeviceSelect::default();
        select.replace_options(options(&["a", "b"]), None);
        select.select(&DeviceId::new("a"));

        let active = DeviceId::new("b");
        select.replace_options(options(&["c", "b", "a"]), Some(&active));
        assert_eq!(select.selected(), Some(&active));
    }

    #[test]
    fn previous_selection_used_when_active_device_vanished() {
        let mut select = DeviceSelect::default();
        select.replace_options(options(&["a", "b"]), None);
        select.select(&DeviceId::new("a"));

        let gone = DeviceId::new("z");
        select.replace_options(options(&["a", "c"]), Some(&gone));
        assert_eq!(select.selected(), Some(&DeviceId::new("a")));
    }

    #[test]
    fn selection_cleared_when_nothing_matches() {
        let mut select = DeviceSelect::default();
        select.replace_options(options(&["a"]), None);
        select.select(&DeviceId::new("a"));

        select.replace_options(options(&["b"]), None);
        assert_eq!(select.selected(), None);

        select.select(&DeviceId::new("missing"));
        assert_eq!(select.selected(), None);
    }
}
