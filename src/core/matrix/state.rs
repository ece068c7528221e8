//! Matrix selection and modal state with keyboard navigation

/// Keys the matrix reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Previous school
    Up,
    /// Next school
    Down,
    /// Previous theme
    Left,
    /// Next theme
    Right,
    /// Close the modal
    Escape,
    /// Anything else
    Other,
}

impl Key {
    /// Keys that move the selection
    pub const ARROWS: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// DOM `KeyboardEvent.key` name; empty for [`Key::Other`]
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::Up => "ArrowUp",
            Self::Down => "ArrowDown",
            Self::Left => "ArrowLeft",
            Self::Right => "ArrowRight",
            Self::Escape => "Escape",
            Self::Other => "",
        }
    }

    /// `(row, col)` step of the key
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Escape | Self::Other => (0, 0),
        }
    }
}

/// What the modal is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// One school × theme cell
    Cell {
        /// Row index in display order
        row: usize,
        /// Theme column index
        col: usize,
    },
    /// All themes of one school
    Overall {
        /// Row index in display order
        row: usize,
    },
}

/// Selected cell and open modal, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixState {
    selected: Option<(usize, usize)>,
    modal: Option<Modal>,
}

impl MatrixState {
    /// Fresh state: nothing selected, modal closed
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: None,
            modal: None,
        }
    }

    /// Selected `(row, col)`
    #[must_use]
    pub const fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    /// Modal content, when open
    #[must_use]
    pub const fn modal(&self) -> Option<Modal> {
        self.modal
    }

    /// Whether the modal is open
    #[must_use]
    pub const fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    /// Select a cell and optionally open its detail
    pub fn select_and_open(&mut self, row: usize, col: usize, open: bool) {
        self.selected = Some((row, col));
        if open {
            self.modal = Some(Modal::Cell { row, col });
        }
    }

    /// Open the all-themes detail of a school; the selection is unchanged
    pub fn open_overall(&mut self, row: usize) {
        self.modal = Some(Modal::Overall { row });
    }

    /// Close the modal and keep the selection
    pub fn close(&mut self) {
        self.modal = None;
    }

    /// Apply a key press on a `rows` × `cols` table. Returns `true` when the state changed.
    ///
    /// Arrows move from the current selection (an unset axis counts as -1),
    /// clamped to the table. An open modal follows the new cell.
    pub fn handle_key(&mut self, key: Key, rows: usize, cols: usize) -> bool {
        match key {
            Key::Escape => {
                let was_open = self.is_modal_open();
                self.close();
                was_open
            }
            Key::Other => false,
            _ if rows == 0 || cols == 0 => false,
            _ => {
                let (dr, dc) = key.delta();
                let (cur_r, cur_c) = self
                    .selected
                    .map_or((-1, -1), |(r, c)| (to_signed(r), to_signed(c)));
                let new_r = clamp(cur_r + dr, rows);
                let new_c = clamp(cur_c + dc, cols);
                if self.selected == Some((new_r, new_c)) {
                    return false;
                }
                let open = self.is_modal_open();
                self.select_and_open(new_r, new_c, open);
                true
            }
        }
    }
}

fn to_signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

fn clamp(value: isize, len: usize) -> usize {
    usize::try_from(value.max(0)).map_or(0, |v| v.min(len - 1))
}
