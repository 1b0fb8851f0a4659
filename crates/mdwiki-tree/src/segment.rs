//! Byte ranges into the original source.

/// A half-open byte range `[start, stop)` into the source buffer.
///
/// Node attributes refer to the source through segments instead of owning
/// copies of the text, so the same tree can be rendered against the buffer
/// it was parsed from without duplicating content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Segment {
    /// First byte of the range.
    pub start: usize,
    /// One past the last byte of the range.
    pub stop: usize,
}

impl Segment {
    /// Create a segment covering `start..stop`.
    #[must_use]
    pub const fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    /// Length of the range in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.stop.saturating_sub(self.start)
    }

    /// Whether the range covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stop <= self.start
    }

    /// Resolve the segment against `source`.
    ///
    /// Out-of-range segments are clamped to the buffer, so a tree paired with
    /// the wrong source yields truncated text rather than a panic.
    #[must_use]
    pub fn value<'s>(&self, source: &'s [u8]) -> &'s [u8] {
        let stop = self.stop.min(source.len());
        let start = self.start.min(stop);
        &source[start..stop]
    }
}
