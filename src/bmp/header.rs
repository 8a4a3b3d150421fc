//! Normalizes any of the eight supported DIB header encodings into one flat
//! record, following the dispatch table that each header version's `size`
//! field selects.

use super::bitmask::{analyze_bit_mask, BitMaskInfo};
use super::file_header::BmpFileHeader;
use super::info_header::{BmpCompression, BmpInfoHeader};
use crate::util::u32_le;
use crate::BmpError;

/// A flat, version-independent view of a BMP's file + DIB header, with every
/// mask field resolved to its effective value (including OS/2-overload and
/// BITFIELDS defaults are *not* applied here -- see
/// [`decode::bitfields`](crate::bmp::decode::bitfields), which is the one
/// place defaults get substituted, since §4.7 only applies them when all
/// three RGB masks are zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedHeader {
  /// Byte offset from the start of the file to the pixel data.
  pub data_offset: u32,
  /// Declared size of the DIB header (12/16/40/52/56/64/108/124).
  pub header_size: u32,
  /// Pixel width. Always positive.
  pub width: i32,
  /// Pixel height, sign-preserved: negative means top-down row order.
  pub height: i32,
  /// Bits per pixel.
  pub bits_per_pixel: u16,
  /// Raw compression identifier (pre-overload-resolution; see
  /// [`crate::bmp::resolve_compression`] for the §4.14 dispatch logic).
  pub compression: BmpCompression,
  /// Declared pixel-data byte length (0 if the header left it as 0 and a
  /// stride-derived value should be used instead).
  pub image_size: u32,
  /// Declared palette entry count (0 means "use the bit-depth default").
  pub colors_used: u32,
  /// Resolved red channel mask (0 if this header version carries none).
  pub red_mask: u32,
  /// Resolved green channel mask.
  pub green_mask: u32,
  /// Resolved blue channel mask.
  pub blue_mask: u32,
  /// Resolved alpha channel mask.
  pub alpha_mask: u32,
}

impl NormalizedHeader {
  /// `abs(height)`.
  #[inline]
  #[must_use]
  pub const fn abs_height(&self) -> u32 {
    self.height.unsigned_abs()
  }

  /// `height < 0`.
  #[inline]
  #[must_use]
  pub const fn is_top_down(&self) -> bool {
    self.height < 0
  }

  /// `abs(width)`, as a `u32`. `width` is always stored positive already,
  /// this just changes the type.
  #[inline]
  #[must_use]
  pub const fn abs_width(&self) -> u32 {
    self.width.unsigned_abs()
  }

  /// Row stride in bytes, per §4.4.
  #[inline]
  #[must_use]
  pub const fn stride(&self) -> usize {
    super::layout::stride(self.abs_width(), self.bits_per_pixel)
  }

  /// `{shift, bits}` for each of the four channel masks.
  #[inline]
  #[must_use]
  pub fn mask_info(&self) -> [BitMaskInfo; 4] {
    [
      analyze_bit_mask(self.red_mask),
      analyze_bit_mask(self.green_mask),
      analyze_bit_mask(self.blue_mask),
      analyze_bit_mask(self.alpha_mask),
    ]
  }

  /// Byte offset at which the palette begins (`14 + header_size`).
  #[inline]
  #[must_use]
  pub const fn palette_offset(&self) -> usize {
    14 + self.header_size as usize
  }
}

/// Parses the 14-byte file header plus whichever DIB header variant follows
/// it, producing a [`NormalizedHeader`]. This is §4.1's header reader.
pub fn read_header(bytes: &[u8]) -> Result<NormalizedHeader, BmpError> {
  let (file_header, rest) = BmpFileHeader::try_from_bytes(bytes)?;
  if file_header.tag.0 != *b"BM" {
    // Only "BM" is a normatively valid signature for this crate's decode
    // path (§4.1). The other tags in COMMON_BMP_TAGS (OS/2 icon/pointer/
    // color-icon containers) are recognized in `Debug` output only; this
    // crate only decodes the Windows bitmap container.
    return Err(BmpError::InvalidSignature);
  }
  let (info_header, _rest) = BmpInfoHeader::try_from_bytes(rest)?;

  // A crafted header can declare a width/height near i32::MAX, which would
  // otherwise reach the pixel buffer allocation below and abort the process.
  // 17000 is well beyond any bitmap this crate is meant to handle in practice.
  if info_header.width().unsigned_abs() > 17_000 || info_header.height().unsigned_abs() > 17_000 {
    return Err(BmpError::DimensionsTooLarge);
  }

  let header_size = info_header.header_size();
  let (mut red_mask, mut green_mask, mut blue_mask, mut alpha_mask) = info_header.masks();

  // §4.1: a 40-byte (BITMAPINFOHEADER) file using BITFIELDS/ALPHABITFIELDS
  // carries its masks in a 12- or 16-byte block immediately after the DIB
  // header, rather than inline in the header itself.
  if header_size == 40
    && matches!(
      info_header.compression(),
      BmpCompression::RgbBitfieldsOrHuffman1D | BmpCompression::AlphaBitfields
    )
  {
    let mask_block_len =
      if matches!(info_header.compression(), BmpCompression::AlphaBitfields) { 16 } else { 12 };
    let min_data_offset = 14 + 40 + mask_block_len;
    if file_header.pixel_data_offset as usize >= min_data_offset {
      let block_start = 14 + 40;
      if let Some(block) = bytes.get(block_start..block_start + mask_block_len) {
        red_mask = u32_le(&block[0..4]);
        green_mask = u32_le(&block[4..8]);
        blue_mask = u32_le(&block[8..12]);
        if mask_block_len == 16 {
          alpha_mask = u32_le(&block[12..16]);
        }
      }
    }
  }

  Ok(NormalizedHeader {
    data_offset: file_header.pixel_data_offset,
    header_size,
    width: info_header.width(),
    height: info_header.height(),
    bits_per_pixel: info_header.bits_per_pixel(),
    compression: info_header.compression(),
    image_size: info_header.pixel_data_len() as u32,
    colors_used: info_header.colors_used_raw(),
    red_mask,
    green_mask,
    blue_mask,
    alpha_mask,
  })
}
