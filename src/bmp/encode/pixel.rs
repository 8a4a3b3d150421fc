//! Pixel format encoders for uncompressed and BITFIELDS output (§4.11).

use alloc::vec::Vec;

use super::EncodeOptions;
use crate::bmp::bitmask::{analyze_bit_mask, encode_scaling_lut};
use crate::bmp::layout::stride;
use crate::bmp::palette::PaletteEntry;
use crate::bmp::quantize::{convert_to_indexed, generate_grayscale_palette, median_cut};
use crate::image::RawImageData;
use crate::BmpError;

/// Row index in the destination buffer for source row `y`, per §4.11's
/// "destination row = `top_down ? y : abs_height - 1 - y`".
#[inline]
fn dest_row(y: u32, height: u32, top_down: bool) -> u32 {
  if top_down {
    y
  } else {
    height - 1 - y
  }
}

/// Reads source pixel `(x, y)` as `(r, g, b, a)`, expanding grayscale and
/// defaulting a missing alpha channel to 255 (§4.11).
#[inline]
fn read_rgba(raw: &RawImageData, x: u32, y: u32) -> (u8, u8, u8, u8) {
  let o = raw.pixel_offset(x, y);
  match raw.channels {
    1 => (raw.data[o], raw.data[o], raw.data[o], 255),
    3 => (raw.data[o], raw.data[o + 1], raw.data[o + 2], 255),
    _ => (raw.data[o], raw.data[o + 1], raw.data[o + 2], raw.data[o + 3]),
  }
}

/// Resolves the palette to quantize against when `options.palette` is
/// absent: grayscale sources get a uniform ramp, color sources get Median
/// Cut (§4.12, §4.14).
pub(crate) fn resolve_palette(
  raw: &RawImageData,
  options: &EncodeOptions,
  bits_per_pixel: u16,
) -> Result<Vec<PaletteEntry>, BmpError> {
  let n = 1usize << bits_per_pixel;
  if let Some(palette) = &options.palette {
    let mut palette = palette.clone();
    palette.resize(n, PaletteEntry::default());
    return Ok(palette);
  }
  Ok(if raw.channels == 1 {
    generate_grayscale_palette(n)
  } else {
    median_cut(raw, n)
  })
}

/// Packs palette indices MSB-first into rows, per §4.11: 8 bpp one byte per
/// pixel, 4 bpp high nibble first, 1 bpp bit 7 first.
fn pack_indexed_row(indices: &[u8], width: u32, bits_per_pixel: u16, out: &mut [u8]) {
  match bits_per_pixel {
    8 => {
      out[..width as usize].copy_from_slice(indices);
    }
    4 => {
      for x in 0..width as usize {
        let byte = x / 2;
        if x % 2 == 0 {
          out[byte] = indices[x] << 4;
        } else {
          out[byte] |= indices[x] & 0x0F;
        }
      }
    }
    1 => {
      for x in 0..width as usize {
        let byte = x / 8;
        let bit = 7 - (x % 8);
        out[byte] |= (indices[x] & 1) << bit;
      }
    }
    _ => unreachable!("bits_per_pixel is always 1, 4, or 8 here"),
  }
}

fn encode_indexed(
  raw: &RawImageData,
  bits_per_pixel: u16,
  top_down: bool,
  palette: &[PaletteEntry],
) -> Result<Vec<u8>, BmpError> {
  let indices = convert_to_indexed(raw, palette);
  let row_stride = stride(raw.width, bits_per_pixel);
  let mut out = alloc::vec![0u8; row_stride * raw.height as usize];

  for y in 0..raw.height {
    let row_start = indices.iter().skip((y * raw.width) as usize).take(raw.width as usize);
    let row_indices: Vec<u8> = row_start.copied().collect();
    let d = dest_row(y, raw.height, top_down);
    let dest_start = d as usize * row_stride;
    pack_indexed_row(&row_indices, raw.width, bits_per_pixel, &mut out[dest_start..dest_start + row_stride]);
  }
  Ok(out)
}

fn encode_rgb555(raw: &RawImageData, top_down: bool) -> Result<Vec<u8>, BmpError> {
  let row_stride = stride(raw.width, 16);
  let mut out = alloc::vec![0u8; row_stride * raw.height as usize];
  for y in 0..raw.height {
    let d = dest_row(y, raw.height, top_down);
    let dest_start = d as usize * row_stride;
    for x in 0..raw.width {
      let (r, g, b, _a) = read_rgba(raw, x, y);
      let r5 = u16::from(r) >> 3;
      let g5 = u16::from(g) >> 3;
      let b5 = u16::from(b) >> 3;
      let pixel = (r5 << 10) | (g5 << 5) | b5;
      let o = dest_start + x as usize * 2;
      out[o..o + 2].copy_from_slice(&pixel.to_le_bytes());
    }
  }
  Ok(out)
}

fn encode_bgr24(raw: &RawImageData, top_down: bool) -> Result<Vec<u8>, BmpError> {
  let row_stride = stride(raw.width, 24);
  let mut out = alloc::vec![0u8; row_stride * raw.height as usize];
  for y in 0..raw.height {
    let d = dest_row(y, raw.height, top_down);
    let dest_start = d as usize * row_stride;
    for x in 0..raw.width {
      let (r, g, b, _a) = read_rgba(raw, x, y);
      let o = dest_start + x as usize * 3;
      out[o] = b;
      out[o + 1] = g;
      out[o + 2] = r;
    }
  }
  Ok(out)
}

fn encode_bgra32(raw: &RawImageData, top_down: bool) -> Result<Vec<u8>, BmpError> {
  let row_stride = stride(raw.width, 32);
  let mut out = alloc::vec![0u8; row_stride * raw.height as usize];
  for y in 0..raw.height {
    let d = dest_row(y, raw.height, top_down);
    let dest_start = d as usize * row_stride;
    for x in 0..raw.width {
      let (r, g, b, a) = read_rgba(raw, x, y);
      let o = dest_start + x as usize * 4;
      out[o] = b;
      out[o + 1] = g;
      out[o + 2] = r;
      out[o + 3] = a;
    }
  }
  Ok(out)
}

/// Encodes an uncompressed (`BI_RGB`) image at `bits_per_pixel`.
pub(crate) fn encode_uncompressed(
  raw: &RawImageData,
  bits_per_pixel: u16,
  top_down: bool,
  palette: Option<&[PaletteEntry]>,
) -> Result<Vec<u8>, BmpError> {
  match bits_per_pixel {
    1 | 4 | 8 => encode_indexed(raw, bits_per_pixel, top_down, palette.ok_or(BmpError::EncodeOptionConflict)?),
    16 => encode_rgb555(raw, top_down),
    24 => encode_bgr24(raw, top_down),
    32 => encode_bgra32(raw, top_down),
    _ => Err(BmpError::EncodeOptionConflict),
  }
}

/// Encodes a BITFIELDS/ALPHABITFIELDS image: each channel goes through an
/// 8-bit -> N-bit LUT, then is packed at its mask's shift (§4.11).
pub(crate) fn encode_bitfields(
  raw: &RawImageData,
  bits_per_pixel: u16,
  top_down: bool,
  masks: (u32, u32, u32, u32),
) -> Result<Vec<u8>, BmpError> {
  let (r_mask, g_mask, b_mask, a_mask) = masks;
  let r_info = analyze_bit_mask(r_mask);
  let g_info = analyze_bit_mask(g_mask);
  let b_info = analyze_bit_mask(b_mask);
  let a_info = analyze_bit_mask(a_mask);
  let r_lut = encode_scaling_lut(r_info.bits);
  let g_lut = encode_scaling_lut(g_info.bits);
  let b_lut = encode_scaling_lut(b_info.bits);
  let a_lut = encode_scaling_lut(a_info.bits);

  let bytes_per_pixel = (bits_per_pixel / 8) as usize;
  let row_stride = stride(raw.width, bits_per_pixel);
  let mut out = alloc::vec![0u8; row_stride * raw.height as usize];

  for y in 0..raw.height {
    let d = dest_row(y, raw.height, top_down);
    let dest_start = d as usize * row_stride;
    for x in 0..raw.width {
      let (r, g, b, a) = read_rgba(raw, x, y);
      let mut pixel: u32 = (r_lut[r as usize] << r_info.shift) & r_mask;
      pixel |= (g_lut[g as usize] << g_info.shift) & g_mask;
      pixel |= (b_lut[b as usize] << b_info.shift) & b_mask;
      if a_info.bits > 0 {
        pixel |= (a_lut[a as usize] << a_info.shift) & a_mask;
      }
      let o = dest_start + x as usize * bytes_per_pixel;
      if bytes_per_pixel == 2 {
        out[o..o + 2].copy_from_slice(&(pixel as u16).to_le_bytes());
      } else {
        out[o..o + 4].copy_from_slice(&pixel.to_le_bytes());
      }
    }
  }
  Ok(out)
}
