//! Opaque view handles
//!
//! A `ViewId` identifies a constructed row visual without owning it. The
//! host keeps the actual visuals in its own `SlotMap<ViewId, _>`; the
//! engine only tracks which logical slot a handle occupies (active window
//! or a scrap bag) and never inspects the visual behind it.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a row visual owned by the viewport host
    pub struct ViewId;
}
