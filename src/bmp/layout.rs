//! Row geometry shared by every pixel decoder and encoder: stride and
//! row-order resolution.

/// Bytes occupied by one packed pixel row, including 4-byte padding.
///
/// `stride = ceil(bits_per_pixel * width / 32) * 4`
#[inline]
#[must_use]
pub const fn stride(width: u32, bits_per_pixel: u16) -> usize {
  let bits_per_line = (width as u64) * (bits_per_pixel as u64);
  let words = (bits_per_line + 31) / 32;
  (words * 4) as usize
}

/// Resolves a BMP `height` field into `(abs_height, is_top_down)`.
#[inline]
#[must_use]
pub const fn row_order(height: i32) -> (u32, bool) {
  (height.unsigned_abs(), height < 0)
}

/// Maps a top-to-bottom output row index to the row's position within the
/// BMP pixel data, given the file's row order.
#[inline]
#[must_use]
pub const fn source_row(y: u32, abs_height: u32, is_top_down: bool) -> u32 {
  if is_top_down {
    y
  } else {
    abs_height - 1 - y
  }
}
