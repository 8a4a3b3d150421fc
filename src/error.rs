//! The error type produced by every fallible operation in this crate.

use core::fmt::{Display, Formatter, Result as FmtResult};

/// Something went wrong while decoding or encoding a BMP.
///
/// This type is `#[non_exhaustive]`: new variants may be added in minor
/// versions as additional malformed-input shapes are identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BmpError {
  /// The first two bytes of the file weren't a recognized bitmap tag.
  InvalidSignature,
  /// The DIB header's declared size doesn't match any header version this
  /// crate understands.
  UnsupportedHeaderSize,
  /// There weren't enough bytes left in the buffer to read a required
  /// field.
  InsufficientBytes,
  /// A fixed-size header's `size` field didn't match the array length used
  /// to parse it.
  IncorrectSizeForThisInfoHeaderVersion,
  /// The DIB header's `size` field is not one of the known header lengths.
  UnknownHeaderLength,
  /// The compression field held a value outside the known BMP compression
  /// identifiers (including the CMYK variants).
  UnknownCompression,
  /// `bits_per_pixel` is not supported by the requested compression scheme.
  UnsupportedBitDepth,
  /// `compression` is not supported at all (not a recognized overload of an
  /// otherwise-known code).
  UnsupportedCompression,
  /// The pixel data is actually an embedded JPEG or PNG payload; use
  /// [`extract_compressed`](crate::bmp::extract_compressed) to get at it.
  EmbeddedCodec(EmbeddedCodec),
  /// Two encode options contradict each other (e.g. `compression: RLE8`
  /// with `bits_per_pixel: 4`).
  EncodeOptionConflict,
  /// `width`/`height`/`data.len()` on the image passed to `encode` don't
  /// agree with each other or are zero/negative.
  InvalidDimensions,
  /// The declared palette or pixel-index content doesn't fit the header
  /// (size mismatch between buffer and declared dimensions).
  PixelDataIllegalLength,
  /// An RLE stream contained an escape/count byte pairing this decoder
  /// doesn't accept.
  PixelDataIllegalRleContent,
  /// A heap allocation of the requested size was refused.
  AllocError,
  /// The header declared a width or height absurd enough that decoding it
  /// would require an unreasonable allocation.
  DimensionsTooLarge,
}

/// Which embedded codec a BMP's pixel data actually holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum EmbeddedCodec {
  Jpeg,
  Png,
}

impl Display for BmpError {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    match self {
      Self::InvalidSignature => write!(f, "file does not start with a recognized BMP tag"),
      Self::UnsupportedHeaderSize => write!(f, "DIB header size is not supported"),
      Self::InsufficientBytes => write!(f, "buffer ended before a required field"),
      Self::IncorrectSizeForThisInfoHeaderVersion => {
        write!(f, "header size field disagreed with the byte array used to parse it")
      }
      Self::UnknownHeaderLength => write!(f, "DIB header size field is not a known length"),
      Self::UnknownCompression => write!(f, "compression field is not a known value"),
      Self::UnsupportedBitDepth => {
        write!(f, "bits_per_pixel is not supported for this compression")
      }
      Self::UnsupportedCompression => write!(f, "compression value is not supported"),
      Self::EmbeddedCodec(EmbeddedCodec::Jpeg) => {
        write!(f, "pixel data is an embedded JPEG payload")
      }
      Self::EmbeddedCodec(EmbeddedCodec::Png) => {
        write!(f, "pixel data is an embedded PNG payload")
      }
      Self::EncodeOptionConflict => write!(f, "encode options conflict with each other"),
      Self::InvalidDimensions => write!(f, "image dimensions or data length are invalid"),
      Self::PixelDataIllegalLength => write!(f, "pixel data length doesn't match the header"),
      Self::PixelDataIllegalRleContent => write!(f, "RLE stream contains an illegal token"),
      Self::AllocError => write!(f, "allocation failed"),
      Self::DimensionsTooLarge => write!(f, "width or height is larger than this decoder accepts"),
    }
  }
}
