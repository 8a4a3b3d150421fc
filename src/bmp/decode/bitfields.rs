//! `BI_BITFIELDS` / `BI_ALPHABITFIELDS` pixel decoding for 16 and 32 bpp.

use alloc::vec::Vec;

use crate::bmp::bitmask::{analyze_bit_mask, decode_scaling_lut};
use crate::bmp::header::NormalizedHeader;
use crate::bmp::layout::source_row;
use crate::image::RawImageData;
use crate::BmpError;

const DEFAULT_16_MASKS: (u32, u32, u32, u32) = (0x7C00, 0x03E0, 0x001F, 0);
const DEFAULT_32_MASKS: (u32, u32, u32, u32) = (0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000);

/// Decodes a BITFIELDS image, substituting the §4.7 default masks when the
/// header declares all three RGB masks as zero.
pub(crate) fn decode(bytes: &[u8], header: &NormalizedHeader) -> Result<RawImageData, BmpError> {
  if header.bits_per_pixel != 16 && header.bits_per_pixel != 32 {
    return Err(BmpError::UnsupportedBitDepth);
  }

  let (mut r_mask, mut g_mask, mut b_mask, mut a_mask) =
    (header.red_mask, header.green_mask, header.blue_mask, header.alpha_mask);
  if r_mask == 0 && g_mask == 0 && b_mask == 0 {
    let defaults = if header.bits_per_pixel == 16 { DEFAULT_16_MASKS } else { DEFAULT_32_MASKS };
    (r_mask, g_mask, b_mask, a_mask) = defaults;
  }

  let r_info = analyze_bit_mask(r_mask);
  let g_info = analyze_bit_mask(g_mask);
  let b_info = analyze_bit_mask(b_mask);
  let a_info = analyze_bit_mask(a_mask);
  let r_lut = decode_scaling_lut(r_info.bits);
  let g_lut = decode_scaling_lut(g_info.bits);
  let b_lut = decode_scaling_lut(b_info.bits);
  let a_lut = decode_scaling_lut(a_info.bits);

  let channels: u8 = if a_info.bits > 0 { 4 } else { 3 };
  let abs_width = header.abs_width();
  let abs_height = header.abs_height();
  let stride = header.stride();
  let bytes_per_pixel = (header.bits_per_pixel / 8) as usize;
  let mut out = RawImageData::new_zeroed(abs_width, abs_height, channels);
  let mut scratch: Vec<u8> = alloc::vec![0u8; stride];

  for y in 0..abs_height {
    let src_row = source_row(y, abs_height, header.is_top_down());
    let row_start = header.data_offset as usize + src_row as usize * stride;
    let row = match bytes.get(row_start..row_start + stride) {
      Some(r) => r,
      None => {
        scratch.fill(0);
        scratch.as_slice()
      }
    };
    let out_row_start = out.row_offset(y);
    for x in 0..abs_width {
      let off = x as usize * bytes_per_pixel;
      let pixel: u32 = if bytes_per_pixel == 2 {
        u16::from_le_bytes([row[off], row[off + 1]]) as u32
      } else {
        u32::from_le_bytes([row[off], row[off + 1], row[off + 2], row[off + 3]])
      };
      let o = out_row_start + x as usize * channels as usize;
      out.data[o] = r_lut[((pixel & r_mask) >> r_info.shift) as usize];
      out.data[o + 1] = g_lut[((pixel & g_mask) >> g_info.shift) as usize];
      out.data[o + 2] = b_lut[((pixel & b_mask) >> b_info.shift) as usize];
      if channels == 4 {
        out.data[o + 3] = if a_info.bits > 0 {
          a_lut[((pixel & a_mask) >> a_info.shift) as usize]
        } else {
          255
        };
      }
    }
  }
  Ok(out)
}
