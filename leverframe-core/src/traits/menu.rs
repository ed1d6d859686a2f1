//! Menu trait for the operator panel
//!
//! A menu shows a title and a list of items, lets the operator move
//! through them and returns the confirmed index. While it is open it keeps
//! calling back into its owner: with every newly highlighted item (so a
//! candidate setting can be previewed on real hardware) and on every idle
//! pass (so switch edges keep being serviced while the operator thinks).

/// Notification from an open menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEvent {
    /// The item at this index is now highlighted
    Highlight(u8),
    /// The menu polled its input and nothing was confirmed yet
    Dwell,
}

/// Interactive list selection and status messages
pub trait Menu {
    /// Show a menu and block until the operator confirms an item
    ///
    /// `initial` is clamped to the last item. `on_event` is called
    /// synchronously from inside the menu loop and may drive hardware.
    fn show(
        &mut self,
        title: &str,
        items: &[&str],
        initial: u8,
        on_event: &mut dyn FnMut(MenuEvent),
    ) -> u8;

    /// Show a two-line status message
    fn notice(&mut self, top: &str, bottom: &str);
}
