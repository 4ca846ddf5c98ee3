//! Chapter page panel state and novel grid padding.

/// Which overlay panel is open on the chapter page.
///
/// The chapter list sidebar and the settings panel never show together.
/// While either is open a mask covers the page and the body stops scrolling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderPanels {
    pub sidebar_open: bool,
    pub settings_open: bool,
}

impl ReaderPanels {
    pub fn open_sidebar(&mut self) {
        self.sidebar_open = true;
        self.settings_open = false;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    pub fn open_settings(&mut self) {
        self.settings_open = true;
        self.sidebar_open = false;
    }

    pub fn close_settings(&mut self) {
        self.settings_open = false;
    }

    /// Mask click, or a touch outside the open panel.
    pub fn dismiss(&mut self) {
        self.sidebar_open = false;
        self.settings_open = false;
    }

    pub fn mask_visible(&self) -> bool {
        self.sidebar_open || self.settings_open
    }

    pub fn scroll_locked(&self) -> bool {
        self.mask_visible()
    }
}

/// Placeholder cards needed to fill the last row of a grid.
pub fn ghost_cards(items: usize, per_row: usize) -> usize {
    if per_row == 0 {
        return 0;
    }
    (per_row - items % per_row) % per_row
}
