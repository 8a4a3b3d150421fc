//! Pixel decoders, one module per compression family, plus the shared
//! [`DecodeOptions`] every one of them accepts.

pub(crate) mod bitfields;
pub(crate) mod huffman;
pub(crate) mod rgb;
pub(crate) mod rle;

/// Options recognized by [`crate::bmp::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
  /// Forces the output to 3 or 4 channels where the format allows a choice.
  /// `None` means "pick automatically", per each decoder's own rule.
  pub desired_channels: Option<u8>,
  /// For 32-bpp `BI_RGB` only: if every scanned 4th byte is zero, drop
  /// alpha and emit 3 channels instead of 4. Defaults to `true`.
  pub remove_empty_alpha: bool,
}

impl Default for DecodeOptions {
  #[inline]
  fn default() -> Self {
    Self { desired_channels: None, remove_empty_alpha: true }
  }
}
