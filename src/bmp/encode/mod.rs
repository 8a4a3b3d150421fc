//! Pixel format encoders and the header writer they share (§4.10-§4.14).

use alloc::vec::Vec;

use crate::bmp::info_header::BmpCompression;
use crate::bmp::palette::PaletteEntry;
use crate::image::RawImageData;
use crate::BmpError;

pub(crate) mod header_writer;
pub(crate) mod pixel;
pub(crate) mod rle;

/// Which DIB header variant the writer emits (§4.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderType {
  /// 40-byte `BITMAPINFOHEADER`.
  Info,
  /// 108-byte `BITMAPV4HEADER`.
  V4,
  /// 124-byte `BITMAPV5HEADER`.
  V5,
}

/// Options recognized by [`crate::bmp::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
  /// Target bit depth. `None` defaults from the input's channel count:
  /// 1 channel -> 8 bpp, 3 -> 24 bpp, 4 -> 32 bpp.
  pub bits_per_pixel: Option<u16>,
  /// Target compression. `None` defaults to uncompressed `BI_RGB`.
  pub compression: Option<BmpCompression>,
  /// Which DIB header variant to write.
  pub header_type: HeaderType,
  /// Writes rows top-down (negative height) when set.
  pub top_down: bool,
  /// Palette to quantize against, for `bits_per_pixel <= 8`. When `None`,
  /// one is generated: grayscale source uses
  /// [`crate::bmp::quantize::generate_grayscale_palette`], color source uses
  /// [`crate::bmp::quantize::median_cut`].
  pub palette: Option<Vec<PaletteEntry>>,
  /// `(red, green, blue, alpha)` masks for BITFIELDS/ALPHABITFIELDS. `None`
  /// uses the §4.14 defaults (RGB565 at 16 bpp, BGRA at 32 bpp).
  pub bitfields: Option<(u32, u32, u32, u32)>,
}

impl Default for EncodeOptions {
  #[inline]
  fn default() -> Self {
    Self {
      bits_per_pixel: None,
      compression: None,
      header_type: HeaderType::Info,
      top_down: false,
      palette: None,
      bitfields: None,
    }
  }
}

const DEFAULT_RGB565: (u32, u32, u32, u32) = (0xF800, 0x07E0, 0x001F, 0);
const DEFAULT_BGRA32: (u32, u32, u32, u32) = (0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000);

/// Resolves the effective bit depth from an option + the source channel
/// count, per §4.14: "If `bits_per_pixel` is omitted, default from
/// channels: 1->8, 3->24, 4->32."
fn resolve_bits_per_pixel(options: &EncodeOptions, channels: u8) -> u16 {
  options.bits_per_pixel.unwrap_or(match channels {
    1 => 8,
    4 => 32,
    _ => 24,
  })
}

fn validate_option_compatibility(
  compression: BmpCompression,
  bits_per_pixel: u16,
) -> Result<(), BmpError> {
  let ok = match compression {
    BmpCompression::RgbRLE8 => bits_per_pixel == 8,
    BmpCompression::RgbRLE4 => bits_per_pixel == 4,
    BmpCompression::RgbBitfieldsOrHuffman1D => bits_per_pixel == 16 || bits_per_pixel == 32,
    BmpCompression::AlphaBitfields => bits_per_pixel == 32,
    BmpCompression::RgbNoCompression => {
      matches!(bits_per_pixel, 1 | 4 | 8 | 16 | 24 | 32)
    }
    _ => false,
  };
  if ok {
    Ok(())
  } else {
    Err(BmpError::EncodeOptionConflict)
  }
}

/// Encodes a [`RawImageData`] into BMP bytes per §4.10-§4.14.
pub fn encode(raw: &RawImageData, options: &EncodeOptions) -> Result<Vec<u8>, BmpError> {
  if raw.width == 0 || raw.height == 0 {
    return Err(BmpError::InvalidDimensions);
  }
  if !raw.has_consistent_length() {
    return Err(BmpError::InvalidDimensions);
  }

  let bits_per_pixel = resolve_bits_per_pixel(options, raw.channels);
  let compression = options.compression.unwrap_or(BmpCompression::RgbNoCompression);
  validate_option_compatibility(compression, bits_per_pixel)?;

  let bitfields = match compression {
    BmpCompression::RgbBitfieldsOrHuffman1D => {
      Some(options.bitfields.unwrap_or(if bits_per_pixel == 16 { DEFAULT_RGB565 } else { DEFAULT_BGRA32 }))
    }
    BmpCompression::AlphaBitfields => Some(options.bitfields.unwrap_or(DEFAULT_BGRA32)),
    _ => None,
  };

  let palette = if bits_per_pixel <= 8 {
    Some(pixel::resolve_palette(raw, options, bits_per_pixel)?)
  } else {
    None
  };

  let pixel_data = match compression {
    BmpCompression::RgbNoCompression => {
      pixel::encode_uncompressed(raw, bits_per_pixel, options.top_down, palette.as_deref())?
    }
    BmpCompression::RgbBitfieldsOrHuffman1D | BmpCompression::AlphaBitfields => {
      pixel::encode_bitfields(raw, bits_per_pixel, options.top_down, bitfields.unwrap())?
    }
    BmpCompression::RgbRLE8 => {
      rle::encode(raw, options.top_down, palette.as_deref().unwrap(), rle::RleVariant::Rle8)?
    }
    BmpCompression::RgbRLE4 => {
      rle::encode(raw, options.top_down, palette.as_deref().unwrap(), rle::RleVariant::Rle4)?
    }
    _ => return Err(BmpError::EncodeOptionConflict),
  };

  header_writer::write_bmp(raw, bits_per_pixel, compression, &pixel_data, options, palette.as_deref(), bitfields)
}
