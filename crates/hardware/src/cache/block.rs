//! Cache block (line) storage.

/// A single cache block: tag, opaque payload, validity and dirty bits.
///
/// An empty slot is represented by a block with `valid == false`; such a
/// block never matches a tag lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block<D = u64> {
    /// Address bits above the set index identifying the resident memory block.
    pub tag: u64,
    /// Opaque payload; never interpreted by the cache.
    pub data: D,
    /// Whether the slot holds meaningful data.
    pub valid: bool,
    /// Whether `data` was written since it was loaded.
    pub dirty: bool,
}

impl<D: Default> Block<D> {
    /// Returns the empty (invalid) block used for unoccupied slots.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl<D> Block<D> {
    /// Creates a valid block holding `data` for `tag`.
    pub const fn new(tag: u64, data: D, dirty: bool) -> Self {
        Self {
            tag,
            data,
            valid: true,
            dirty,
        }
    }

    /// Returns `true` if this block is valid and holds `tag`.
    #[inline]
    pub const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Returns `true` if this block is valid and must be written back on eviction.
    #[inline]
    pub const fn needs_write_back(&self) -> bool {
        self.valid && self.dirty
    }
}
