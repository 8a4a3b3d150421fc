//! The BMP/DIB codec: header parsing, pixel decoding and encoding, color
//! quantization, and the top-level dispatch that ties them together (§4.14).

use alloc::vec::Vec;

pub(crate) mod bitmask;
pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod file_header;
pub(crate) mod header;
pub(crate) mod info_header;
pub(crate) mod layout;
pub(crate) mod palette;
pub(crate) mod quantize;

pub use decode::DecodeOptions;
pub use encode::{EncodeOptions, HeaderType};
pub use info_header::BmpCompression;
pub use palette::PaletteEntry;
pub use quantize::{convert_to_indexed, generate_grayscale_palette, median_cut};

use decode::rle::RleVariant;
use header::{read_header, NormalizedHeader};
use crate::image::RawImageData;
use crate::BmpError;

/// The result of [`extract_compressed`]: the embedded codec's raw payload
/// plus the dimensions and compression tag needed to hand it to a JPEG or
/// PNG decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPayload<'b> {
  /// Declared pixel width.
  pub width: i32,
  /// Declared pixel height (sign-preserved).
  pub height: i32,
  /// Which embedded codec the payload uses.
  pub compression: BmpCompression,
  /// `bytes[data_offset .. data_offset + image_size]`.
  pub data: &'b [u8],
}

/// Decodes a BMP file into raw pixel data, per §4.14's dispatch table.
pub fn decode(bytes: &[u8], options: &DecodeOptions) -> Result<RawImageData, BmpError> {
  let header = read_header(bytes)?;
  dispatch_decode(bytes, &header, options)
}

fn dispatch_decode(
  bytes: &[u8],
  header: &NormalizedHeader,
  options: &DecodeOptions,
) -> Result<RawImageData, BmpError> {
  match header.compression {
    BmpCompression::RgbNoCompression => decode::rgb::decode(bytes, header, options),
    BmpCompression::RgbRLE8 => {
      let palette = read_palette_for(bytes, header);
      decode::rle::decode(bytes, header, &palette, RleVariant::Rle8)
    }
    BmpCompression::RgbRLE4 => {
      let palette = read_palette_for(bytes, header);
      decode::rle::decode(bytes, header, &palette, RleVariant::Rle4)
    }
    // The compression=4 slot is overloaded: Windows uses it for embedded
    // JPEG, but some OS/2-derived producers reuse it for RLE24. bpp==24 is
    // how every real decoder tells the two apart (§4.14, §9).
    BmpCompression::Jpeg if header.bits_per_pixel == 24 => {
      let palette = read_palette_for(bytes, header);
      decode::rle::decode(bytes, header, &palette, RleVariant::Rle24)
    }
    // compression=3 is likewise overloaded: BITFIELDS at any bpp except a
    // 1-bpp file, where it instead means Modified Huffman (§4.14, §9).
    BmpCompression::RgbBitfieldsOrHuffman1D if header.bits_per_pixel == 1 => {
      decode::huffman::decode(bytes, header)
    }
    BmpCompression::RgbBitfieldsOrHuffman1D | BmpCompression::AlphaBitfields => {
      decode::bitfields::decode(bytes, header)
    }
    BmpCompression::Jpeg => Err(BmpError::EmbeddedCodec(crate::error::EmbeddedCodec::Jpeg)),
    BmpCompression::Png => Err(BmpError::EmbeddedCodec(crate::error::EmbeddedCodec::Png)),
    _ => Err(BmpError::UnsupportedCompression),
  }
}

fn read_palette_for(bytes: &[u8], header: &NormalizedHeader) -> Vec<PaletteEntry> {
  palette::read_palette(
    bytes,
    header.palette_offset(),
    header.data_offset as usize,
    header.bits_per_pixel,
    header.colors_used,
    header.header_size == 12,
  )
}

/// Encodes raw pixel data into BMP bytes, per §4.10-§4.14.
pub fn encode(raw: &RawImageData, options: &EncodeOptions) -> Result<Vec<u8>, BmpError> {
  encode::encode(raw, options)
}

/// Returns the embedded JPEG/PNG payload of a BMP that uses an embedded
/// codec, without attempting to decode it (§4.14).
pub fn extract_compressed(bytes: &[u8]) -> Result<ExtractedPayload<'_>, BmpError> {
  let header = read_header(bytes)?;
  let is_embedded_codec = match header.compression {
    // bpp==24 under compression=4 means RLE24, not embedded JPEG (§9).
    BmpCompression::Jpeg => header.bits_per_pixel != 24,
    BmpCompression::Png => true,
    _ => false,
  };
  if !is_embedded_codec {
    return Err(BmpError::UnsupportedCompression);
  }
  let image_size = if header.image_size != 0 { header.image_size as usize } else { header.stride() * header.abs_height() as usize };
  let start = header.data_offset as usize;
  let end = start + image_size;
  let data = bytes.get(start..end).ok_or(BmpError::InsufficientBytes)?;
  Ok(ExtractedPayload { width: header.width, height: header.height, compression: header.compression, data })
}
