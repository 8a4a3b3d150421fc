use super::*;
use crate::util::*;

/// The 12-byte `BITMAPCOREHEADER`, used by the very first BMP format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BmpInfoHeaderCore {
  /// Image width in pixels.
  pub width: u16,
  /// Image height in pixels.
  pub height: u16,
  /// Bits per pixel, should be in the 1 to 24 range.
  pub bits_per_pixel: u16,
}
impl TryFrom<[u8; 12]> for BmpInfoHeaderCore {
  type Error = BmpError;
  #[inline]
  fn try_from(value: [u8; 12]) -> Result<Self, Self::Error> {
    if u32_le(&value[0..4]) != 12 {
      return Err(BmpError::IncorrectSizeForThisInfoHeaderVersion);
    }
    Ok(Self {
      width: u16::from_le_bytes([value[4], value[5]]),
      height: u16::from_le_bytes([value[6], value[7]]),
      // 2 bytes skipped (color planes, always 1)
      bits_per_pixel: u16::from_le_bytes([value[10], value[11]]),
    })
  }
}
impl From<BmpInfoHeaderCore> for [u8; 12] {
  #[inline]
  fn from(h: BmpInfoHeaderCore) -> Self {
    let mut a = [0; 12];
    a[0..4].copy_from_slice(&12_u32.to_le_bytes());
    a[4..6].copy_from_slice(&h.width.to_le_bytes());
    a[6..8].copy_from_slice(&h.height.to_le_bytes());
    a[8..10].copy_from_slice(&1_u16.to_le_bytes());
    a[10..12].copy_from_slice(&h.bits_per_pixel.to_le_bytes());
    a
  }
}

/// Halftoning algorithm used by an OS/2 2.x header, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum Halftoning {
  None,
  ErrorDiffusion { damping_percentage: u32 },
  Panda { x: u32, y: u32 },
  SuperCircle { x: u32, y: u32 },
  Unknown(u32),
}
impl Halftoning {
  #[inline]
  const fn new(algorithm: u16, param1: u32, param2: u32) -> Self {
    match algorithm {
      0 => Halftoning::None,
      1 => Halftoning::ErrorDiffusion { damping_percentage: param1 },
      2 => Halftoning::Panda { x: param1, y: param2 },
      3 => Halftoning::SuperCircle { x: param1, y: param2 },
      other => Halftoning::Unknown(other as u32),
    }
  }
}

/// The OS/2 2.x info header, either the 16-byte short form or the 64-byte
/// long form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct BmpInfoHeaderOs22x {
  pub width: i32,
  pub height: i32,
  pub bits_per_pixel: u16,
  pub compression: BmpCompression,
  pub image_byte_size: Option<core::num::NonZeroU32>,
  pub x_pixels_per_meter: i32,
  pub y_pixels_per_meter: i32,
  pub palette_len: Option<core::num::NonZeroU32>,
  pub important_colors: Option<core::num::NonZeroU32>,
  /// Units the resolution fields are expressed in. Only the pels-per-meter
  /// value (0) is in active use; other values are recorded but not acted on.
  pub resolution_units: u16,
  /// Which corner of the bitmap is the origin. The spec's row-order logic
  /// already covers this via the `height` sign; this field is kept only for
  /// round-trip fidelity when reading such a file.
  pub recording_origin_is_lower_left: bool,
  /// How pixel halftoning was applied, if at all.
  pub halftoning: Halftoning,
  /// Color table encoding (always RGB in practice).
  pub color_encoding: u32,
  /// Application-defined identifier, not interpreted by this crate.
  pub identifier: u32,
}
impl TryFrom<[u8; 16]> for BmpInfoHeaderOs22x {
  type Error = BmpError;
  #[inline]
  fn try_from(value: [u8; 16]) -> Result<Self, Self::Error> {
    // a 16-byte OS/2 header carries the same first 16 bytes as the 64-byte
    // form, so we pad with zeroes and reuse the full parser.
    let mut buf = [0u8; 64];
    buf[0..16].copy_from_slice(&value);
    buf[0..4].copy_from_slice(&16_u32.to_le_bytes());
    Self::try_from(buf)
  }
}
impl TryFrom<[u8; 64]> for BmpInfoHeaderOs22x {
  type Error = BmpError;
  #[inline]
  fn try_from(value: [u8; 64]) -> Result<Self, Self::Error> {
    let size = u32_le(&value[0..4]);
    if size != 16 && size != 64 {
      return Err(BmpError::IncorrectSizeForThisInfoHeaderVersion);
    }
    let width = i32_le(&value[4..8]);
    let height = i32_le(&value[8..12]);
    let bits_per_pixel = u16::from_le_bytes([value[14], value[15]]);
    if size == 16 {
      return Ok(Self {
        width,
        height,
        bits_per_pixel,
        compression: BmpCompression::RgbNoCompression,
        image_byte_size: None,
        x_pixels_per_meter: 0,
        y_pixels_per_meter: 0,
        palette_len: None,
        important_colors: None,
        resolution_units: 0,
        recording_origin_is_lower_left: true,
        halftoning: Halftoning::None,
        color_encoding: 0,
        identifier: 0,
      });
    }
    let compression = BmpCompression::try_from(u32_le(&value[16..20]))?;
    let image_byte_size = onz_u32_le(&value[20..24]);
    let x_pixels_per_meter = i32_le(&value[24..28]);
    let y_pixels_per_meter = i32_le(&value[28..32]);
    let palette_len = onz_u32_le(&value[32..36]);
    let important_colors = onz_u32_le(&value[36..40]);
    let resolution_units = u16::from_le_bytes([value[40], value[41]]);
    // 2 bytes padding
    let recording_origin_is_lower_left = u16::from_le_bytes([value[44], value[45]]) == 0;
    let halftoning_algorithm = u16::from_le_bytes([value[46], value[47]]);
    let halftoning_param1 = u32_le(&value[48..52]);
    let halftoning_param2 = u32_le(&value[52..56]);
    let color_encoding = u32_le(&value[56..60]);
    let identifier = u32_le(&value[60..64]);
    Ok(Self {
      width,
      height,
      bits_per_pixel,
      compression,
      image_byte_size,
      x_pixels_per_meter,
      y_pixels_per_meter,
      palette_len,
      important_colors,
      resolution_units,
      recording_origin_is_lower_left,
      halftoning: Halftoning::new(halftoning_algorithm, halftoning_param1, halftoning_param2),
      color_encoding,
      identifier,
    })
  }
}
impl BmpInfoHeaderOs22x {
  /// Gets the number of palette entries, accounting for the `None` default.
  #[inline]
  #[must_use]
  pub const fn palette_len(self) -> usize {
    match self.palette_len {
      Some(nz) => nz.get() as usize,
      None if self.bits_per_pixel <= 8 => 1 << self.bits_per_pixel,
      None => 0,
    }
  }
}

/// The 40-byte `BITMAPINFOHEADER`, the most common BMP info header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct BmpInfoHeaderV1 {
  pub width: i32,
  pub height: i32,
  pub bits_per_pixel: u16,
  pub compression: BmpCompression,
  pub image_byte_size: Option<core::num::NonZeroU32>,
  pub x_pixels_per_meter: i32,
  pub y_pixels_per_meter: i32,
  pub palette_len: Option<core::num::NonZeroU32>,
  pub important_colors: Option<core::num::NonZeroU32>,
}
impl TryFrom<[u8; 40]> for BmpInfoHeaderV1 {
  type Error = BmpError;
  #[inline]
  fn try_from(value: [u8; 40]) -> Result<Self, Self::Error> {
    if u32_le(&value[0..4]) != 40 {
      return Err(BmpError::IncorrectSizeForThisInfoHeaderVersion);
    }
    Ok(Self {
      width: i32_le(&value[4..8]),
      height: i32_le(&value[8..12]),
      // 2 bytes skipped (color planes, always 1)
      bits_per_pixel: u16::from_le_bytes([value[14], value[15]]),
      compression: BmpCompression::try_from(u32_le(&value[16..20]))?,
      image_byte_size: onz_u32_le(&value[20..24]),
      x_pixels_per_meter: i32_le(&value[24..28]),
      y_pixels_per_meter: i32_le(&value[28..32]),
      palette_len: onz_u32_le(&value[32..36]),
      important_colors: onz_u32_le(&value[36..40]),
    })
  }
}
impl From<BmpInfoHeaderV1> for [u8; 40] {
  #[inline]
  fn from(h: BmpInfoHeaderV1) -> Self {
    let mut a = [0; 40];
    a[0..4].copy_from_slice(&40_u32.to_le_bytes());
    a[4..8].copy_from_slice(&h.width.to_le_bytes());
    a[8..12].copy_from_slice(&h.height.to_le_bytes());
    a[12..14].copy_from_slice(&1_u16.to_le_bytes());
    a[14..16].copy_from_slice(&h.bits_per_pixel.to_le_bytes());
    a[16..20].copy_from_slice(&u32::from(h.compression).to_le_bytes());
    a[20..24].copy_from_slice(&h.image_byte_size.map(|x| x.get()).unwrap_or(0).to_le_bytes());
    a[24..28].copy_from_slice(&h.x_pixels_per_meter.to_le_bytes());
    a[28..32].copy_from_slice(&h.y_pixels_per_meter.to_le_bytes());
    a[32..36].copy_from_slice(&h.palette_len.map(|x| x.get()).unwrap_or(0).to_le_bytes());
    a[36..40].copy_from_slice(&h.important_colors.map(|x| x.get()).unwrap_or(0).to_le_bytes());
    a
  }
}
impl BmpInfoHeaderV1 {
  /// Gets the number of palette entries, accounting for the `None` default.
  #[inline]
  #[must_use]
  pub const fn palette_len(self) -> usize {
    match self.palette_len {
      Some(nz) => nz.get() as usize,
      None if self.bits_per_pixel <= 8 => 1 << self.bits_per_pixel,
      None => 0,
    }
  }
}

/// The 52-byte `BITMAPV2INFOHEADER`: adds RGB bitfield masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct BmpInfoHeaderV2 {
  pub width: i32,
  pub height: i32,
  pub bits_per_pixel: u16,
  pub compression: BmpCompression,
  pub image_byte_size: Option<core::num::NonZeroU32>,
  pub x_pixels_per_meter: i32,
  pub y_pixels_per_meter: i32,
  pub palette_len: Option<core::num::NonZeroU32>,
  pub important_colors: Option<core::num::NonZeroU32>,
  pub red_mask: u32,
  pub green_mask: u32,
  pub blue_mask: u32,
}
impl TryFrom<[u8; 52]> for BmpInfoHeaderV2 {
  type Error = BmpError;
  #[inline]
  fn try_from(value: [u8; 52]) -> Result<Self, Self::Error> {
    if u32_le(&value[0..4]) != 52 {
      return Err(BmpError::IncorrectSizeForThisInfoHeaderVersion);
    }
    let v1 = BmpInfoHeaderV1::try_from(<[u8; 40]>::try_from(&value[0..40]).unwrap())
      .map(|mut v1| {
        v1.compression = BmpCompression::try_from(u32_le(&value[16..20])).unwrap_or(v1.compression);
        v1
      })
      .unwrap_or(BmpInfoHeaderV1 {
        width: i32_le(&value[4..8]),
        height: i32_le(&value[8..12]),
        bits_per_pixel: u16::from_le_bytes([value[14], value[15]]),
        compression: BmpCompression::RgbNoCompression,
        image_byte_size: onz_u32_le(&value[20..24]),
        x_pixels_per_meter: i32_le(&value[24..28]),
        y_pixels_per_meter: i32_le(&value[28..32]),
        palette_len: onz_u32_le(&value[32..36]),
        important_colors: onz_u32_le(&value[36..40]),
      });
    Ok(Self {
      width: v1.width,
      height: v1.height,
      bits_per_pixel: v1.bits_per_pixel,
      compression: BmpCompression::try_from(u32_le(&value[16..20]))?,
      image_byte_size: v1.image_byte_size,
      x_pixels_per_meter: v1.x_pixels_per_meter,
      y_pixels_per_meter: v1.y_pixels_per_meter,
      palette_len: v1.palette_len,
      important_colors: v1.important_colors,
      red_mask: u32_le(&value[40..44]),
      green_mask: u32_le(&value[44..48]),
      blue_mask: u32_le(&value[48..52]),
    })
  }
}
impl From<BmpInfoHeaderV2> for [u8; 52] {
  #[inline]
  fn from(h: BmpInfoHeaderV2) -> Self {
    let v1 = BmpInfoHeaderV1 {
      width: h.width,
      height: h.height,
      bits_per_pixel: h.bits_per_pixel,
      compression: h.compression,
      image_byte_size: h.image_byte_size,
      x_pixels_per_meter: h.x_pixels_per_meter,
      y_pixels_per_meter: h.y_pixels_per_meter,
      palette_len: h.palette_len,
      important_colors: h.important_colors,
    };
    let v1_bytes: [u8; 40] = v1.into();
    let mut a = [0; 52];
    a[0..40].copy_from_slice(&v1_bytes);
    a[0..4].copy_from_slice(&52_u32.to_le_bytes());
    a[40..44].copy_from_slice(&h.red_mask.to_le_bytes());
    a[44..48].copy_from_slice(&h.green_mask.to_le_bytes());
    a[48..52].copy_from_slice(&h.blue_mask.to_le_bytes());
    a
  }
}
impl BmpInfoHeaderV2 {
  /// Gets the number of palette entries, accounting for the `None` default.
  #[inline]
  #[must_use]
  pub const fn palette_len(self) -> usize {
    match self.palette_len {
      Some(nz) => nz.get() as usize,
      None if self.bits_per_pixel <= 8 => 1 << self.bits_per_pixel,
      None => 0,
    }
  }
}

/// The 56-byte `BITMAPV3INFOHEADER`: adds an alpha bitfield mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct BmpInfoHeaderV3 {
  pub width: i32,
  pub height: i32,
  pub bits_per_pixel: u16,
  pub compression: BmpCompression,
  pub image_byte_size: Option<core::num::NonZeroU32>,
  pub x_pixels_per_meter: i32,
  pub y_pixels_per_meter: i32,
  pub palette_len: Option<core::num::NonZeroU32>,
  pub important_colors: Option<core::num::NonZeroU32>,
  pub red_mask: u32,
  pub green_mask: u32,
  pub blue_mask: u32,
  pub alpha_mask: u32,
}
impl TryFrom<[u8; 56]> for BmpInfoHeaderV3 {
  type Error = BmpError;
  #[inline]
  fn try_from(value: [u8; 56]) -> Result<Self, Self::Error> {
    if u32_le(&value[0..4]) != 56 {
      return Err(BmpError::IncorrectSizeForThisInfoHeaderVersion);
    }
    let v2 = BmpInfoHeaderV2::try_from(<[u8; 52]>::try_from(&value[0..52]).unwrap())?;
    Ok(Self {
      width: v2.width,
      height: v2.height,
      bits_per_pixel: v2.bits_per_pixel,
      compression: v2.compression,
      image_byte_size: v2.image_byte_size,
      x_pixels_per_meter: v2.x_pixels_per_meter,
      y_pixels_per_meter: v2.y_pixels_per_meter,
      palette_len: v2.palette_len,
      important_colors: v2.important_colors,
      red_mask: v2.red_mask,
      green_mask: v2.green_mask,
      blue_mask: v2.blue_mask,
      alpha_mask: u32_le(&value[52..56]),
    })
  }
}
impl From<BmpInfoHeaderV3> for [u8; 56] {
  #[inline]
  fn from(h: BmpInfoHeaderV3) -> Self {
    let v2 = BmpInfoHeaderV2 {
      width: h.width,
      height: h.height,
      bits_per_pixel: h.bits_per_pixel,
      compression: h.compression,
      image_byte_size: h.image_byte_size,
      x_pixels_per_meter: h.x_pixels_per_meter,
      y_pixels_per_meter: h.y_pixels_per_meter,
      palette_len: h.palette_len,
      important_colors: h.important_colors,
      red_mask: h.red_mask,
      green_mask: h.green_mask,
      blue_mask: h.blue_mask,
    };
    let v2_bytes: [u8; 52] = v2.into();
    let mut a = [0; 56];
    a[0..52].copy_from_slice(&v2_bytes);
    a[0..4].copy_from_slice(&56_u32.to_le_bytes());
    a[52..56].copy_from_slice(&h.alpha_mask.to_le_bytes());
    a
  }
}
impl BmpInfoHeaderV3 {
  /// Gets the number of palette entries, accounting for the `None` default.
  #[inline]
  #[must_use]
  pub const fn palette_len(self) -> usize {
    match self.palette_len {
      Some(nz) => nz.get() as usize,
      None if self.bits_per_pixel <= 8 => 1 << self.bits_per_pixel,
      None => 0,
    }
  }
}

/// CIE 1931 XYZ tristimulus value, fixed-point `2.30` format (as used by
/// `BITMAPV4HEADER`'s `CIEXYZTRIPLE` endpoints).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CIEXYZ {
  #[allow(missing_docs)]
  pub x: i32,
  #[allow(missing_docs)]
  pub y: i32,
  #[allow(missing_docs)]
  pub z: i32,
}
impl CIEXYZ {
  #[inline]
  fn from_bytes(b: &[u8]) -> Self {
    Self { x: i32_le(&b[0..4]), y: i32_le(&b[4..8]), z: i32_le(&b[8..12]) }
  }
  #[inline]
  fn write_into(self, b: &mut [u8]) {
    b[0..4].copy_from_slice(&self.x.to_le_bytes());
    b[4..8].copy_from_slice(&self.y.to_le_bytes());
    b[8..12].copy_from_slice(&self.z.to_le_bytes());
  }
}

/// Three [CIEXYZ] endpoints: red, green, blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[allow(missing_docs)]
pub struct CIEXYZTRIPLE {
  pub red: CIEXYZ,
  pub green: CIEXYZ,
  pub blue: CIEXYZ,
}

/// LCS color space signature constants, as written into the `colorspace`
/// field of the V4/V5 headers.
mod lcs {
  pub const LCS_CALIBRATED_RGB: u32 = 0;
  pub const LCS_SRGB: u32 = 0x7352_4742; // 'sRGB'
  pub const LCS_WINDOWS_COLOR_SPACE: u32 = 0x5769_6E20; // 'Win '
  pub const PROFILE_LINKED: u32 = 0x4C49_4E4B; // 'LINK'
  pub const PROFILE_EMBEDDED: u32 = 0x4D42_4544; // 'MBED'
}

/// Which color space the pixel data is defined in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum BmpColorspace {
  Calibrated(CIEXYZTRIPLE),
  Srgb,
  WindowsDefault,
  LinkedProfile,
  EmbeddedProfile,
  Unknown(u32),
}
impl BmpColorspace {
  #[inline]
  fn new(tag: u32, endpoints: CIEXYZTRIPLE) -> Self {
    match tag {
      lcs::LCS_CALIBRATED_RGB => Self::Calibrated(endpoints),
      lcs::LCS_SRGB => Self::Srgb,
      lcs::LCS_WINDOWS_COLOR_SPACE => Self::WindowsDefault,
      lcs::PROFILE_LINKED => Self::LinkedProfile,
      lcs::PROFILE_EMBEDDED => Self::EmbeddedProfile,
      other => Self::Unknown(other),
    }
  }
  #[inline]
  fn tag(self) -> u32 {
    match self {
      Self::Calibrated(_) => lcs::LCS_CALIBRATED_RGB,
      Self::Srgb => lcs::LCS_SRGB,
      Self::WindowsDefault => lcs::LCS_WINDOWS_COLOR_SPACE,
      Self::LinkedProfile => lcs::PROFILE_LINKED,
      Self::EmbeddedProfile => lcs::PROFILE_EMBEDDED,
      Self::Unknown(other) => other,
    }
  }
}

/// The 108-byte `BITMAPV4HEADER`: adds color space and gamma fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct BmpInfoHeaderV4 {
  pub width: i32,
  pub height: i32,
  pub bits_per_pixel: u16,
  pub compression: BmpCompression,
  pub image_byte_size: Option<core::num::NonZeroU32>,
  pub x_pixels_per_meter: i32,
  pub y_pixels_per_meter: i32,
  pub palette_len: Option<core::num::NonZeroU32>,
  pub important_colors: Option<core::num::NonZeroU32>,
  pub red_mask: u32,
  pub green_mask: u32,
  pub blue_mask: u32,
  pub alpha_mask: u32,
  pub colorspace: BmpColorspace,
  pub gamma_red: u32,
  pub gamma_green: u32,
  pub gamma_blue: u32,
}
impl TryFrom<[u8; 108]> for BmpInfoHeaderV4 {
  type Error = BmpError;
  #[inline]
  fn try_from(value: [u8; 108]) -> Result<Self, Self::Error> {
    if u32_le(&value[0..4]) != 108 {
      return Err(BmpError::IncorrectSizeForThisInfoHeaderVersion);
    }
    let v3 = BmpInfoHeaderV3::try_from(<[u8; 56]>::try_from(&value[0..56]).unwrap())?;
    let endpoints = CIEXYZTRIPLE {
      red: CIEXYZ::from_bytes(&value[60..72]),
      green: CIEXYZ::from_bytes(&value[72..84]),
      blue: CIEXYZ::from_bytes(&value[84..96]),
    };
    Ok(Self {
      width: v3.width,
      height: v3.height,
      bits_per_pixel: v3.bits_per_pixel,
      compression: v3.compression,
      image_byte_size: v3.image_byte_size,
      x_pixels_per_meter: v3.x_pixels_per_meter,
      y_pixels_per_meter: v3.y_pixels_per_meter,
      palette_len: v3.palette_len,
      important_colors: v3.important_colors,
      red_mask: v3.red_mask,
      green_mask: v3.green_mask,
      blue_mask: v3.blue_mask,
      alpha_mask: v3.alpha_mask,
      colorspace: BmpColorspace::new(u32_le(&value[56..60]), endpoints),
      gamma_red: u32_le(&value[96..100]),
      gamma_green: u32_le(&value[100..104]),
      gamma_blue: u32_le(&value[104..108]),
    })
  }
}
impl From<BmpInfoHeaderV4> for [u8; 108] {
  #[inline]
  fn from(h: BmpInfoHeaderV4) -> Self {
    let v3 = BmpInfoHeaderV3 {
      width: h.width,
      height: h.height,
      bits_per_pixel: h.bits_per_pixel,
      compression: h.compression,
      image_byte_size: h.image_byte_size,
      x_pixels_per_meter: h.x_pixels_per_meter,
      y_pixels_per_meter: h.y_pixels_per_meter,
      palette_len: h.palette_len,
      important_colors: h.important_colors,
      red_mask: h.red_mask,
      green_mask: h.green_mask,
      blue_mask: h.blue_mask,
      alpha_mask: h.alpha_mask,
    };
    let v3_bytes: [u8; 56] = v3.into();
    let mut a = [0; 108];
    a[0..56].copy_from_slice(&v3_bytes);
    a[0..4].copy_from_slice(&108_u32.to_le_bytes());
    a[56..60].copy_from_slice(&h.colorspace.tag().to_le_bytes());
    if let BmpColorspace::Calibrated(endpoints) = h.colorspace {
      endpoints.red.write_into(&mut a[60..72]);
      endpoints.green.write_into(&mut a[72..84]);
      endpoints.blue.write_into(&mut a[84..96]);
    }
    a[96..100].copy_from_slice(&h.gamma_red.to_le_bytes());
    a[100..104].copy_from_slice(&h.gamma_green.to_le_bytes());
    a[104..108].copy_from_slice(&h.gamma_blue.to_le_bytes());
    a
  }
}
impl BmpInfoHeaderV4 {
  /// Gets the number of palette entries, accounting for the `None` default.
  #[inline]
  #[must_use]
  pub const fn palette_len(self) -> usize {
    match self.palette_len {
      Some(nz) => nz.get() as usize,
      None if self.bits_per_pixel <= 8 => 1 << self.bits_per_pixel,
      None => 0,
    }
  }
}

/// Rendering intent recorded by a `BITMAPV5HEADER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum SrgbIntent {
  /// LCS_GM_ABS_COLORIMETRIC
  AbsoluteColorimetric,
  /// LCS_GM_BUSINESS
  Saturation,
  /// LCS_GM_GRAPHICS
  RelativeColorimetric,
  /// LCS_GM_IMAGES
  Perceptual,
}
impl SrgbIntent {
  const LCS_GM_ABS_COLORIMETRIC: u32 = 8;
  const LCS_GM_BUSINESS: u32 = 1;
  const LCS_GM_GRAPHICS: u32 = 2;
  const LCS_GM_IMAGES: u32 = 4;

  #[inline]
  fn from_u32(tag: u32) -> Option<Self> {
    match tag {
      Self::LCS_GM_ABS_COLORIMETRIC => Some(Self::AbsoluteColorimetric),
      Self::LCS_GM_BUSINESS => Some(Self::Saturation),
      Self::LCS_GM_GRAPHICS => Some(Self::RelativeColorimetric),
      Self::LCS_GM_IMAGES => Some(Self::Perceptual),
      _ => None,
    }
  }
  #[inline]
  fn to_u32(self) -> u32 {
    match self {
      Self::AbsoluteColorimetric => Self::LCS_GM_ABS_COLORIMETRIC,
      Self::Saturation => Self::LCS_GM_BUSINESS,
      Self::RelativeColorimetric => Self::LCS_GM_GRAPHICS,
      Self::Perceptual => Self::LCS_GM_IMAGES,
    }
  }
}

/// The 124-byte `BITMAPV5HEADER`, the most modern BMP info header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct BmpInfoHeaderV5 {
  pub width: i32,
  pub height: i32,
  pub bits_per_pixel: u16,
  pub compression: BmpCompression,
  pub image_byte_size: Option<core::num::NonZeroU32>,
  pub x_pixels_per_meter: i32,
  pub y_pixels_per_meter: i32,
  pub palette_len: Option<core::num::NonZeroU32>,
  pub important_colors: Option<core::num::NonZeroU32>,
  pub red_mask: u32,
  pub green_mask: u32,
  pub blue_mask: u32,
  pub alpha_mask: u32,
  pub colorspace: BmpColorspace,
  pub gamma_red: u32,
  pub gamma_green: u32,
  pub gamma_blue: u32,
  pub srgb_intent: Option<SrgbIntent>,
  pub profile_data_offset: u32,
  pub profile_size: u32,
}
impl TryFrom<[u8; 124]> for BmpInfoHeaderV5 {
  type Error = BmpError;
  #[inline]
  fn try_from(value: [u8; 124]) -> Result<Self, Self::Error> {
    if u32_le(&value[0..4]) != 124 {
      return Err(BmpError::IncorrectSizeForThisInfoHeaderVersion);
    }
    let v4 = BmpInfoHeaderV4::try_from(<[u8; 108]>::try_from(&value[0..108]).unwrap())?;
    Ok(Self {
      width: v4.width,
      height: v4.height,
      bits_per_pixel: v4.bits_per_pixel,
      compression: v4.compression,
      image_byte_size: v4.image_byte_size,
      x_pixels_per_meter: v4.x_pixels_per_meter,
      y_pixels_per_meter: v4.y_pixels_per_meter,
      palette_len: v4.palette_len,
      important_colors: v4.important_colors,
      red_mask: v4.red_mask,
      green_mask: v4.green_mask,
      blue_mask: v4.blue_mask,
      alpha_mask: v4.alpha_mask,
      colorspace: v4.colorspace,
      gamma_red: v4.gamma_red,
      gamma_green: v4.gamma_green,
      gamma_blue: v4.gamma_blue,
      srgb_intent: SrgbIntent::from_u32(u32_le(&value[108..112])),
      profile_data_offset: u32_le(&value[112..116]),
      profile_size: u32_le(&value[116..120]),
      // 4 bytes reserved
    })
  }
}
impl From<BmpInfoHeaderV5> for [u8; 124] {
  #[inline]
  fn from(h: BmpInfoHeaderV5) -> Self {
    let v4 = BmpInfoHeaderV4 {
      width: h.width,
      height: h.height,
      bits_per_pixel: h.bits_per_pixel,
      compression: h.compression,
      image_byte_size: h.image_byte_size,
      x_pixels_per_meter: h.x_pixels_per_meter,
      y_pixels_per_meter: h.y_pixels_per_meter,
      palette_len: h.palette_len,
      important_colors: h.important_colors,
      red_mask: h.red_mask,
      green_mask: h.green_mask,
      blue_mask: h.blue_mask,
      alpha_mask: h.alpha_mask,
      colorspace: h.colorspace,
      gamma_red: h.gamma_red,
      gamma_green: h.gamma_green,
      gamma_blue: h.gamma_blue,
    };
    let v4_bytes: [u8; 108] = v4.into();
    let mut a = [0; 124];
    a[0..108].copy_from_slice(&v4_bytes);
    a[0..4].copy_from_slice(&124_u32.to_le_bytes());
    a[108..112]
      .copy_from_slice(&h.srgb_intent.map(SrgbIntent::to_u32).unwrap_or(0).to_le_bytes());
    a[112..116].copy_from_slice(&h.profile_data_offset.to_le_bytes());
    a[116..120].copy_from_slice(&h.profile_size.to_le_bytes());
    a
  }
}
impl BmpInfoHeaderV5 {
  /// Gets the number of palette entries, accounting for the `None` default.
  #[inline]
  #[must_use]
  pub const fn palette_len(self) -> usize {
    match self.palette_len {
      Some(nz) => nz.get() as usize,
      None if self.bits_per_pixel <= 8 => 1 << self.bits_per_pixel,
      None => 0,
    }
  }
}

/// The compression scheme used to store the pixel data.
///
/// Some identifiers are overloaded by bit depth: `RgbBitfieldsOrHuffman1D`
/// (3) means Huffman 1D when `bits_per_pixel == 1` and BITFIELDS otherwise;
/// `Jpeg` (4) means RLE24 when `bits_per_pixel == 24`. See the crate's top
/// level dispatch for the resolution of these overloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum BmpCompression {
  RgbNoCompression,
  RgbRLE8,
  RgbRLE4,
  RgbBitfieldsOrHuffman1D,
  Jpeg,
  Png,
  AlphaBitfields,
  CmykNoCompression,
  CmykRLE8,
  CmykRLE4,
}
impl TryFrom<u32> for BmpCompression {
  type Error = BmpError;
  #[inline]
  fn try_from(value: u32) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::RgbNoCompression,
      1 => Self::RgbRLE8,
      2 => Self::RgbRLE4,
      3 => Self::RgbBitfieldsOrHuffman1D,
      4 => Self::Jpeg,
      5 => Self::Png,
      6 => Self::AlphaBitfields,
      11 => Self::CmykNoCompression,
      12 => Self::CmykRLE8,
      13 => Self::CmykRLE4,
      _ => return Err(BmpError::UnknownCompression),
    })
  }
}
impl From<BmpCompression> for u32 {
  #[inline]
  fn from(c: BmpCompression) -> Self {
    match c {
      BmpCompression::RgbNoCompression => 0,
      BmpCompression::RgbRLE8 => 1,
      BmpCompression::RgbRLE4 => 2,
      BmpCompression::RgbBitfieldsOrHuffman1D => 3,
      BmpCompression::Jpeg => 4,
      BmpCompression::Png => 5,
      BmpCompression::AlphaBitfields => 6,
      BmpCompression::CmykNoCompression => 11,
      BmpCompression::CmykRLE8 => 12,
      BmpCompression::CmykRLE4 => 13,
    }
  }
}

/// An enum over the various BMP info header versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum BmpInfoHeader {
  Core(BmpInfoHeaderCore),
  Os22x(BmpInfoHeaderOs22x),
  V1(BmpInfoHeaderV1),
  V2(BmpInfoHeaderV2),
  V3(BmpInfoHeaderV3),
  V4(BmpInfoHeaderV4),
  V5(BmpInfoHeaderV5),
}
impl BmpInfoHeader {
  /// Tries to get the info header and remaining bytes.
  #[inline]
  pub fn try_from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), BmpError> {
    if bytes.len() < 4 {
      return Err(BmpError::InsufficientBytes);
    }
    Ok(match u32_le(&bytes[0..4]) {
      12 => {
        let (a, rest) = try_pull_byte_array::<12>(bytes).ok_or(BmpError::InsufficientBytes)?;
        (Self::Core(BmpInfoHeaderCore::try_from(a)?), rest)
      }
      16 => {
        let (a, rest) = try_pull_byte_array::<16>(bytes).ok_or(BmpError::InsufficientBytes)?;
        (Self::Os22x(BmpInfoHeaderOs22x::try_from(a)?), rest)
      }
      64 => {
        let (a, rest) = try_pull_byte_array::<64>(bytes).ok_or(BmpError::InsufficientBytes)?;
        (Self::Os22x(BmpInfoHeaderOs22x::try_from(a)?), rest)
      }
      40 => {
        let (a, rest) = try_pull_byte_array::<40>(bytes).ok_or(BmpError::InsufficientBytes)?;
        (Self::V1(BmpInfoHeaderV1::try_from(a)?), rest)
      }
      52 => {
        let (a, rest) = try_pull_byte_array::<52>(bytes).ok_or(BmpError::InsufficientBytes)?;
        (Self::V2(BmpInfoHeaderV2::try_from(a)?), rest)
      }
      56 => {
        let (a, rest) = try_pull_byte_array::<56>(bytes).ok_or(BmpError::InsufficientBytes)?;
        (Self::V3(BmpInfoHeaderV3::try_from(a)?), rest)
      }
      108 => {
        let (a, rest) = try_pull_byte_array::<108>(bytes).ok_or(BmpError::InsufficientBytes)?;
        (Self::V4(BmpInfoHeaderV4::try_from(a)?), rest)
      }
      124 => {
        let (a, rest) = try_pull_byte_array::<124>(bytes).ok_or(BmpError::InsufficientBytes)?;
        (Self::V5(BmpInfoHeaderV5::try_from(a)?), rest)
      }
      _ => return Err(BmpError::UnknownHeaderLength),
    })
  }

  /// Declared size of this header variant, in bytes.
  #[inline]
  #[must_use]
  pub const fn header_size(self) -> u32 {
    match self {
      Self::Core(_) => 12,
      Self::Os22x(h) => {
        // the short and long OS/2 forms both parse into this struct; tell
        // them apart by whether the long-form-only fields carry anything.
        if h.resolution_units == 0
          && h.color_encoding == 0
          && h.identifier == 0
          && matches!(h.halftoning, Halftoning::None)
          && h.compression as u8 as u32 == 0
          && h.image_byte_size.is_none()
          && h.palette_len.is_none()
        {
          16
        } else {
          64
        }
      }
      Self::V1(_) => 40,
      Self::V2(_) => 52,
      Self::V3(_) => 56,
      Self::V4(_) => 108,
      Self::V5(_) => 124,
    }
  }

  /// Image pixel width.
  #[inline]
  #[must_use]
  pub const fn width(self) -> i32 {
    match self {
      Self::Core(BmpInfoHeaderCore { width, .. }) => width as i32,
      Self::Os22x(BmpInfoHeaderOs22x { width, .. })
      | Self::V1(BmpInfoHeaderV1 { width, .. })
      | Self::V2(BmpInfoHeaderV2 { width, .. })
      | Self::V3(BmpInfoHeaderV3 { width, .. })
      | Self::V4(BmpInfoHeaderV4 { width, .. })
      | Self::V5(BmpInfoHeaderV5 { width, .. }) => width,
    }
  }

  /// Image pixel height.
  ///
  /// * A positive height indicates that the origin is the **bottom** left.
  /// * A negative height indicates that the image origin is the **top** left.
  #[inline]
  #[must_use]
  pub const fn height(self) -> i32 {
    match self {
      Self::Core(BmpInfoHeaderCore { height, .. }) => height as i32,
      Self::Os22x(BmpInfoHeaderOs22x { height, .. })
      | Self::V1(BmpInfoHeaderV1 { height, .. })
      | Self::V2(BmpInfoHeaderV2 { height, .. })
      | Self::V3(BmpInfoHeaderV3 { height, .. })
      | Self::V4(BmpInfoHeaderV4 { height, .. })
      | Self::V5(BmpInfoHeaderV5 { height, .. }) => height,
    }
  }

  /// Bits per pixel, should be in the 1 to 64 range.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(self) -> u16 {
    match self {
      Self::Core(BmpInfoHeaderCore { bits_per_pixel, .. })
      | Self::Os22x(BmpInfoHeaderOs22x { bits_per_pixel, .. })
      | Self::V1(BmpInfoHeaderV1 { bits_per_pixel, .. })
      | Self::V2(BmpInfoHeaderV2 { bits_per_pixel, .. })
      | Self::V3(BmpInfoHeaderV3 { bits_per_pixel, .. })
      | Self::V4(BmpInfoHeaderV4 { bits_per_pixel, .. })
      | Self::V5(BmpInfoHeaderV5 { bits_per_pixel, .. }) => bits_per_pixel,
    }
  }

  /// Compression method.
  #[inline]
  #[must_use]
  pub const fn compression(self) -> BmpCompression {
    match self {
      Self::Core(BmpInfoHeaderCore { .. }) => BmpCompression::RgbNoCompression,
      Self::Os22x(BmpInfoHeaderOs22x { compression, .. })
      | Self::V1(BmpInfoHeaderV1 { compression, .. })
      | Self::V2(BmpInfoHeaderV2 { compression, .. })
      | Self::V3(BmpInfoHeaderV3 { compression, .. })
      | Self::V4(BmpInfoHeaderV4 { compression, .. })
      | Self::V5(BmpInfoHeaderV5 { compression, .. }) => compression,
    }
  }

  /// Gets the number of palette entries.
  #[inline]
  #[must_use]
  pub const fn palette_len(self) -> usize {
    match self {
      Self::Core(BmpInfoHeaderCore { bits_per_pixel, .. }) => 1 << bits_per_pixel,
      Self::Os22x(x) => x.palette_len(),
      Self::V1(x) => x.palette_len(),
      Self::V2(x) => x.palette_len(),
      Self::V3(x) => x.palette_len(),
      Self::V4(x) => x.palette_len(),
      Self::V5(x) => x.palette_len(),
    }
  }

  /// Gets the raw `colors_used` field as written in the header (0 if the
  /// header left it at its "use the bit-depth default" value, or if this
  /// header version doesn't carry the field at all).
  #[inline]
  #[must_use]
  pub const fn colors_used_raw(self) -> u32 {
    match self {
      Self::Core(_) => 0,
      Self::Os22x(BmpInfoHeaderOs22x { palette_len, .. })
      | Self::V1(BmpInfoHeaderV1 { palette_len, .. })
      | Self::V2(BmpInfoHeaderV2 { palette_len, .. })
      | Self::V3(BmpInfoHeaderV3 { palette_len, .. })
      | Self::V4(BmpInfoHeaderV4 { palette_len, .. })
      | Self::V5(BmpInfoHeaderV5 { palette_len, .. }) => match palette_len {
        Some(nz) => nz.get(),
        None => 0,
      },
    }
  }

  /// Gets the declared number of bytes in the pixel data region of the file,
  /// or a stride-derived estimate if the header declares zero.
  #[inline]
  #[must_use]
  pub const fn pixel_data_len(self) -> usize {
    match self {
      Self::Core(BmpInfoHeaderCore { .. }) => {
        let stride = crate::bmp::layout::stride(self.width().unsigned_abs(), self.bits_per_pixel());
        stride * self.height().unsigned_abs() as usize
      }
      Self::Os22x(BmpInfoHeaderOs22x { image_byte_size, .. })
      | Self::V1(BmpInfoHeaderV1 { image_byte_size, .. })
      | Self::V2(BmpInfoHeaderV2 { image_byte_size, .. })
      | Self::V3(BmpInfoHeaderV3 { image_byte_size, .. })
      | Self::V4(BmpInfoHeaderV4 { image_byte_size, .. })
      | Self::V5(BmpInfoHeaderV5 { image_byte_size, .. }) => match image_byte_size {
        Some(x) => x.get() as usize,
        None => {
          let stride =
            crate::bmp::layout::stride(self.width().unsigned_abs(), self.bits_per_pixel());
          stride * self.height().unsigned_abs() as usize
        }
      },
    }
  }

  /// Red/green/blue/alpha bitfield masks, resolved to their effective
  /// (possibly defaulted) values. Only meaningful for V2+ headers; earlier
  /// variants never carry masks and return all zero.
  #[inline]
  #[must_use]
  pub const fn masks(self) -> (u32, u32, u32, u32) {
    match self {
      Self::V2(BmpInfoHeaderV2 { red_mask, green_mask, blue_mask, .. }) => {
        (red_mask, green_mask, blue_mask, 0)
      }
      Self::V3(BmpInfoHeaderV3 { red_mask, green_mask, blue_mask, alpha_mask, .. })
      | Self::V4(BmpInfoHeaderV4 { red_mask, green_mask, blue_mask, alpha_mask, .. })
      | Self::V5(BmpInfoHeaderV5 { red_mask, green_mask, blue_mask, alpha_mask, .. }) => {
        (red_mask, green_mask, blue_mask, alpha_mask)
      }
      _ => (0, 0, 0, 0),
    }
  }

  /// If the image is supposed to be sRGB colors or not.
  #[inline]
  #[must_use]
  pub const fn is_srgb(self) -> bool {
    match self {
      Self::Core(_) | Self::Os22x(_) | Self::V1(_) | Self::V2(_) | Self::V3(_) => false,
      Self::V4(BmpInfoHeaderV4 { colorspace, .. }) => {
        matches!(colorspace, BmpColorspace::Srgb | BmpColorspace::WindowsDefault)
      }
      Self::V5(BmpInfoHeaderV5 { srgb_intent, colorspace, .. }) => {
        srgb_intent.is_some()
          || matches!(colorspace, BmpColorspace::Srgb | BmpColorspace::WindowsDefault)
      }
    }
  }
}
