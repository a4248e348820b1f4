//! Modal open/close state.
//!
//! The overlay closes on a backdrop click or its close button; clicks inside
//! the content never reach the backdrop. While the contained form is
//! submitting the modal is locked and only a programmatic close gets through.

/// How a close was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// Click on the dimmed area around the content
    Backdrop,
    /// The X button in the header
    CloseButton,
    /// The host closed it, e.g. after a successful submission
    Programmatic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalState {
    open: bool,
    locked: bool,
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Lock while a contained form is submitting.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Try to close. Returns whether the modal went from open to closed.
    pub fn request_close(&mut self, via: Dismissal) -> bool {
        if !self.open {
            return false;
        }
        if self.locked && via != Dismissal::Programmatic {
            return false;
        }
        self.open = false;
        self.locked = false;
        true
    }
}

/// Open overlays sharing one page. The page stays scroll-locked while any of
/// them is open, whatever order their open and close edges arrive in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayCount {
    open: usize,
}

impl OverlayCount {
    /// Record one overlay going from `was_open` to `is_open`.
    /// Returns whether the page is locked afterwards.
    pub fn transition(&mut self, was_open: bool, is_open: bool) -> bool {
        match (was_open, is_open) {
            (false, true) => self.open += 1,
            (true, false) => self.open = self.open.saturating_sub(1),
            _ => {}
        }
        self.is_locked()
    }

    pub fn is_locked(&self) -> bool {
        self.open > 0
    }
}
