//! Uncompressed (`BI_RGB`) pixel decoding for 1/2/4/8/16/24/32/64 bpp, per
//! the per-bit-depth kernels described for the RGB decoder.

use super::DecodeOptions;
use crate::bmp::bitmask::rgb555_lut;
use crate::bmp::header::NormalizedHeader;
use crate::bmp::layout::source_row;
use crate::bmp::palette::{is_grayscale, read_palette, PaletteEntry};
use crate::image::RawImageData;
use crate::BmpError;

/// Extracts the palette index at pixel `x` of a row packed at `bits_per_pixel`
/// bits each, MSB-first within each byte (§4.6: "1/2/4 bpp, MSB-first within
/// each byte").
#[inline]
fn read_packed_index(row: &[u8], x: u32, bits_per_pixel: u16) -> u8 {
  let bpp = bits_per_pixel as u32;
  if bpp == 8 {
    return row.get(x as usize).copied().unwrap_or(0);
  }
  let values_per_byte = 8 / bpp;
  let byte_index = (x / values_per_byte) as usize;
  let which = x % values_per_byte;
  let shift = 8 - bpp * (which + 1);
  let byte = row.get(byte_index).copied().unwrap_or(0);
  let mask = (1u8 << bpp) - 1;
  (byte >> shift) & mask
}

/// Reads one row of pixel bytes, zero-filling any portion the buffer is too
/// short to actually contain (§7: "MAY produce indeterminate pixel content
/// in trailing rows... treated as zero bytes").
#[inline]
fn row_bytes<'b>(bytes: &'b [u8], start: usize, stride: usize, scratch: &'b mut [u8]) -> &'b [u8] {
  match bytes.get(start..start + stride) {
    Some(r) => r,
    None => {
      let available = bytes.len().saturating_sub(start);
      scratch.fill(0);
      if available > 0 {
        if let Some(src) = bytes.get(start..start + available.min(stride)) {
          scratch[..src.len()].copy_from_slice(src);
        }
      }
      scratch
    }
  }
}

fn decode_indexed(
  bytes: &[u8],
  header: &NormalizedHeader,
  options: &DecodeOptions,
) -> Result<RawImageData, BmpError> {
  let palette = read_palette(
    bytes,
    header.palette_offset(),
    header.data_offset as usize,
    header.bits_per_pixel,
    header.colors_used,
    header.header_size == 12,
  );
  let grayscale = is_grayscale(&palette);
  let channels = options.desired_channels.unwrap_or(if grayscale { 1 } else { 3 });

  let abs_width = header.abs_width();
  let abs_height = header.abs_height();
  let stride = header.stride();
  let mut out = RawImageData::new_zeroed(abs_width, abs_height, channels);
  let mut scratch = alloc::vec![0u8; stride];

  for y in 0..abs_height {
    let src_row = source_row(y, abs_height, header.is_top_down());
    let row_start = header.data_offset as usize + src_row as usize * stride;
    let row = row_bytes(bytes, row_start, stride, &mut scratch);
    let out_row_start = out.row_offset(y);
    for x in 0..abs_width {
      let index = read_packed_index(row, x, header.bits_per_pixel);
      let entry = palette.get(index as usize).copied().unwrap_or_default();
      write_entry(&mut out.data, out_row_start + (x as usize) * channels as usize, entry, channels);
    }
  }
  Ok(out)
}

/// Writes one palette entry into the output buffer at `offset`, per the
/// crate-wide grayscale-collapsing / alpha-255 rules.
#[inline]
pub(crate) fn write_entry(data: &mut [u8], offset: usize, entry: PaletteEntry, channels: u8) {
  match channels {
    1 => data[offset] = entry.red,
    3 => {
      data[offset] = entry.red;
      data[offset + 1] = entry.green;
      data[offset + 2] = entry.blue;
    }
    4 => {
      data[offset] = entry.red;
      data[offset + 1] = entry.green;
      data[offset + 2] = entry.blue;
      data[offset + 3] = 255;
    }
    _ => unreachable!("channels is always 1, 3, or 4"),
  }
}

fn decode_rgb555(
  bytes: &[u8],
  header: &NormalizedHeader,
) -> Result<RawImageData, BmpError> {
  let lut = rgb555_lut();
  let abs_width = header.abs_width();
  let abs_height = header.abs_height();
  let stride = header.stride();
  let mut out = RawImageData::new_zeroed(abs_width, abs_height, 3);
  let mut scratch = alloc::vec![0u8; stride];

  for y in 0..abs_height {
    let src_row = source_row(y, abs_height, header.is_top_down());
    let row_start = header.data_offset as usize + src_row as usize * stride;
    let row = row_bytes(bytes, row_start, stride, &mut scratch);
    let out_row_start = out.row_offset(y);
    for x in 0..abs_width {
      let byte_off = x as usize * 2;
      let p = u16::from_le_bytes([row[byte_off], row[byte_off + 1]]);
      let r = lut[((p >> 10) & 0x1F) as usize];
      let g = lut[((p >> 5) & 0x1F) as usize];
      let b = lut[(p & 0x1F) as usize];
      let o = out_row_start + x as usize * 3;
      out.data[o] = r;
      out.data[o + 1] = g;
      out.data[o + 2] = b;
    }
  }
  Ok(out)
}

fn decode_bgr24(bytes: &[u8], header: &NormalizedHeader) -> Result<RawImageData, BmpError> {
  let abs_width = header.abs_width();
  let abs_height = header.abs_height();
  let stride = header.stride();
  let mut out = RawImageData::new_zeroed(abs_width, abs_height, 3);
  let mut scratch = alloc::vec![0u8; stride];

  for y in 0..abs_height {
    let src_row = source_row(y, abs_height, header.is_top_down());
    let row_start = header.data_offset as usize + src_row as usize * stride;
    let row = row_bytes(bytes, row_start, stride, &mut scratch);
    let out_row_start = out.row_offset(y);
    for x in 0..abs_width {
      let i = x as usize * 3;
      let o = out_row_start + i;
      out.data[o] = row[i + 2];
      out.data[o + 1] = row[i + 1];
      out.data[o + 2] = row[i];
    }
  }
  Ok(out)
}

fn decode_bgra32(
  bytes: &[u8],
  header: &NormalizedHeader,
  options: &DecodeOptions,
) -> Result<RawImageData, BmpError> {
  let abs_width = header.abs_width();
  let abs_height = header.abs_height();
  let stride = header.stride();
  let data_offset = header.data_offset as usize;

  // Two-pass: first scan every 4th byte to decide whether alpha is real.
  let mut any_nonzero_alpha = false;
  'scan: for y in 0..abs_height {
    let row_start = data_offset + y as usize * stride;
    if let Some(row) = bytes.get(row_start..row_start + stride) {
      for x in 0..abs_width {
        if row[x as usize * 4 + 3] != 0 {
          any_nonzero_alpha = true;
          break 'scan;
        }
      }
    }
  }

  let channels = match options.desired_channels {
    Some(c) => c,
    None => {
      if any_nonzero_alpha || !options.remove_empty_alpha {
        4
      } else {
        3
      }
    }
  };
  let force_opaque = channels == 4 && !any_nonzero_alpha && options.desired_channels == Some(4);

  let mut out = RawImageData::new_zeroed(abs_width, abs_height, channels);
  let mut scratch = alloc::vec![0u8; stride];

  for y in 0..abs_height {
    let src_row = source_row(y, abs_height, header.is_top_down());
    let row_start = data_offset + src_row as usize * stride;
    let row = row_bytes(bytes, row_start, stride, &mut scratch);
    let out_row_start = out.row_offset(y);
    for x in 0..abs_width {
      let i = x as usize * 4;
      let o = out_row_start + x as usize * channels as usize;
      out.data[o] = row[i + 2];
      out.data[o + 1] = row[i + 1];
      out.data[o + 2] = row[i];
      if channels == 4 {
        out.data[o + 3] = if force_opaque { 255 } else { row[i + 3] };
      }
    }
  }
  Ok(out)
}

/// `c <= 0.0031308 ? 12.92*c : 1.055*c^(1/2.4) - 0.055`
#[inline]
fn srgb_transfer(c: f64) -> f64 {
  if c <= 0.0031308 {
    12.92 * c
  } else {
    1.055 * libm::pow(c, 1.0 / 2.4) - 0.055
  }
}

fn decode_s2_13(bytes: &[u8], header: &NormalizedHeader) -> Result<RawImageData, BmpError> {
  let abs_width = header.abs_width();
  let abs_height = header.abs_height();
  let stride = header.stride();
  let mut out = RawImageData::new_zeroed(abs_width, abs_height, 4);
  let mut scratch = alloc::vec![0u8; stride];

  for y in 0..abs_height {
    let src_row = source_row(y, abs_height, header.is_top_down());
    let row_start = header.data_offset as usize + src_row as usize * stride;
    let row = row_bytes(bytes, row_start, stride, &mut scratch);
    let out_row_start = out.row_offset(y);
    for x in 0..abs_width {
      let i = x as usize * 8;
      let b = i16::from_le_bytes([row[i], row[i + 1]]);
      let g = i16::from_le_bytes([row[i + 2], row[i + 3]]);
      let r = i16::from_le_bytes([row[i + 4], row[i + 5]]);
      let a = i16::from_le_bytes([row[i + 6], row[i + 7]]);
      let to_unit = |v: i16| (f64::from(v) / 8192.0).clamp(0.0, 1.0);
      let o = out_row_start + x as usize * 4;
      out.data[o] = (srgb_transfer(to_unit(r)) * 255.0).round() as u8;
      out.data[o + 1] = (srgb_transfer(to_unit(g)) * 255.0).round() as u8;
      out.data[o + 2] = (srgb_transfer(to_unit(b)) * 255.0).round() as u8;
      out.data[o + 3] = (to_unit(a) * 255.0).round() as u8;
    }
  }
  Ok(out)
}

/// Decodes an uncompressed (`BI_RGB`) image, dispatching on `bits_per_pixel`.
pub(crate) fn decode(
  bytes: &[u8],
  header: &NormalizedHeader,
  options: &DecodeOptions,
) -> Result<RawImageData, BmpError> {
  match header.bits_per_pixel {
    1 | 2 | 4 | 8 => decode_indexed(bytes, header, options),
    16 => decode_rgb555(bytes, header),
    24 => decode_bgr24(bytes, header),
    32 => decode_bgra32(bytes, header, options),
    64 => decode_s2_13(bytes, header),
    _ => Err(BmpError::UnsupportedBitDepth),
  }
}

