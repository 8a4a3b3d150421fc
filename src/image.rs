#![forbid(unsafe_code)]

//! The codec's raw pixel buffer type.

use alloc::vec::Vec;

/// A decoded (or about-to-be-encoded) image: a flat byte buffer plus the
/// dimensions and channel count needed to interpret it.
///
/// Rows are stored top-to-bottom regardless of how the source BMP ordered
/// them; the codec hides that distinction from callers entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawImageData {
  /// Image width in pixels.
  pub width: u32,
  /// Image height in pixels.
  pub height: u32,
  /// Channels per pixel: 1 (grayscale), 3 (RGB), or 4 (RGBA).
  pub channels: u8,
  /// `width * height * channels` bytes, row-major, top-to-bottom.
  pub data: Vec<u8>,
}

impl RawImageData {
  /// Allocates a zeroed buffer of the right size for `width * height`
  /// pixels at `channels` channels each.
  #[inline]
  #[must_use]
  pub fn new_zeroed(width: u32, height: u32, channels: u8) -> Self {
    let len = (width as usize) * (height as usize) * (channels as usize);
    Self { width, height, channels, data: alloc::vec![0u8; len] }
  }

  /// Byte offset of the start of pixel `(x, y)` within [`data`](Self::data).
  #[inline]
  #[must_use]
  pub const fn pixel_offset(&self, x: u32, y: u32) -> usize {
    ((y as usize) * (self.width as usize) + (x as usize)) * (self.channels as usize)
  }

  /// Byte offset of the start of row `y`.
  #[inline]
  #[must_use]
  pub const fn row_offset(&self, y: u32) -> usize {
    (y as usize) * (self.width as usize) * (self.channels as usize)
  }

  /// True iff `data.len() == width * height * channels`, per invariant 1.
  #[inline]
  #[must_use]
  pub fn has_consistent_length(&self) -> bool {
    self.data.len() == (self.width as usize) * (self.height as usize) * (self.channels as usize)
  }
}
