//! Attached-row geometry and list state
//!
//! The engine never owns row visuals; it tracks their identity (`ViewId`),
//! vertical geometry, and adapter position. Coordinates grow downward and
//! are viewport-local. `rows` always holds a contiguous run of adapter
//! positions starting at `first_position`.

use flywheel_core::ViewId;

/// How a row participates in recycling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// Recyclable content row; the index selects the scrap bag
    Reusable(usize),
    /// Header/footer style row that is never placed in scrap
    Structural,
    /// Row recycled without reuse tracking; discarded on release
    Transient,
}

impl RowKind {
    /// Scrap bag index, or None for rows that never enter scrap
    pub fn bag(self) -> Option<usize> {
        match self {
            RowKind::Reusable(bag) => Some(bag),
            RowKind::Structural | RowKind::Transient => None,
        }
    }

    pub fn is_reusable(self) -> bool {
        matches!(self, RowKind::Reusable(_))
    }
}

/// A row currently attached to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedRow {
    pub view: ViewId,
    pub kind: RowKind,
    /// Top edge in viewport-local pixels
    pub top: i32,
    pub height: i32,
}

impl AttachedRow {
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

/// Which content edge an overscroll is happening against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

/// Direction a gap fill should grow the attached run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillDirection {
    /// Reveal rows before `first_position` (space opened at the top)
    Up,
    /// Reveal rows after the last attached position
    Down,
}

/// The scrollable area rows are laid out against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub top: i32,
    pub height: i32,
}

impl Viewport {
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

/// Geometry and bookkeeping for the attached window of rows
#[derive(Debug, Default)]
pub struct ListState {
    pub viewport: Viewport,
    /// Attached rows in adapter order; `rows[i]` is position `first_position + i`
    pub rows: Vec<AttachedRow>,
    pub first_position: usize,
    /// Total rows the content provider reports
    pub total_count: usize,
    /// Selected adapter position, if the host drives selection
    pub selected_position: Option<usize>,
    /// Top edge of the selection highlight, kept glued to its row
    pub selector_top: i32,
    /// Displacement past the content edge while overscrolled, signed
    /// positive when pulled past the top edge
    pub scroll_offset: f32,
    /// Last scroll direction: negative when content moved toward the top
    pub direction: i32,
    /// Estimated pixels of content before the viewport
    pub distance_to_start: i32,
    /// Estimated pixels of content after the viewport
    pub distance_to_end: i32,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_top(&self) -> Option<i32> {
        self.rows.first().map(|row| row.top)
    }

    pub fn last_bottom(&self) -> Option<i32> {
        self.rows.last().map(|row| row.bottom())
    }

    /// Position just past the last attached row
    pub fn end_position(&self) -> usize {
        self.first_position + self.rows.len()
    }

    /// Whether the attached run includes the first content row flush with
    /// the viewport top
    pub fn at_content_start(&self) -> bool {
        self.first_position == 0
            && self.first_top().is_some_and(|top| top >= self.viewport.top)
    }

    /// Whether the attached run includes the last content row flush with
    /// the viewport bottom
    pub fn at_content_end(&self) -> bool {
        self.end_position() >= self.total_count
            && self
                .last_bottom()
                .is_some_and(|bottom| bottom <= self.viewport.bottom())
    }

    /// Whether every content row is attached and fits inside the viewport
    pub fn content_fits(&self) -> bool {
        !self.rows.is_empty() && self.rows.len() == self.total_count && {
            self.first_top().is_some_and(|top| top >= self.viewport.top)
                && self
                    .last_bottom()
                    .is_some_and(|bottom| bottom <= self.viewport.bottom())
        }
    }

    /// Index into `rows` of the row containing viewport-local `y`
    pub fn row_at(&self, y: f32) -> Option<usize> {
        let y = y as i32;
        self.rows
            .iter()
            .position(|row| y >= row.top && y < row.bottom())
    }

    /// Identity and kind of every attached row, in adapter order
    pub fn snapshot(&self) -> Vec<(ViewId, RowKind)> {
        self.rows.iter().map(|row| (row.view, row.kind)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<ViewId> {
        let mut arena: SlotMap<ViewId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    fn uniform_state(count: usize, height: i32, viewport_height: i32) -> ListState {
        let views = ids(count);
        let mut state = ListState::new();
        state.viewport = Viewport {
            top: 0,
            height: viewport_height,
        };
        state.total_count = count;
        state.rows = views
            .iter()
            .enumerate()
            .map(|(i, &view)| AttachedRow {
                view,
                kind: RowKind::Reusable(0),
                top: i as i32 * height,
                height,
            })
            .collect();
        state
    }

    #[test]
    fn test_row_at_hits_by_geometry() {
        let state = uniform_state(5, 20, 100);
        assert_eq!(state.row_at(0.0), Some(0));
        assert_eq!(state.row_at(19.9), Some(0));
        assert_eq!(state.row_at(20.0), Some(1));
        assert_eq!(state.row_at(99.0), Some(4));
        assert_eq!(state.row_at(100.0), None);
        assert_eq!(state.row_at(-1.0), None);
    }

    #[test]
    fn test_content_fits_requires_full_window() {
        let fits = uniform_state(5, 20, 100);
        assert!(fits.content_fits());

        let mut partial = uniform_state(5, 20, 100);
        partial.total_count = 50;
        assert!(!partial.content_fits());

        let overflow = uniform_state(6, 20, 100);
        assert!(!overflow.content_fits());
    }

    #[test]
    fn test_edge_checks() {
        let mut state = uniform_state(5, 20, 100);
        state.total_count = 10;
        assert!(state.at_content_start());
        assert!(!state.at_content_end());

        state.first_position = 5;
        assert!(!state.at_content_start());
        assert!(state.at_content_end());
    }
}
