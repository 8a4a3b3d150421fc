//! RLE4 / RLE8 / RLE24 escape-coded stream decoding (§4.8). Output is
//! always 3-channel; RLE never carries alpha.

use crate::bmp::header::NormalizedHeader;
use crate::bmp::palette::PaletteEntry;
use crate::image::RawImageData;
use crate::BmpError;

/// Which RLE byte-pair grammar a stream uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RleVariant {
  Rle8,
  Rle4,
  Rle24,
}

#[inline]
fn write_pixel(out: &mut RawImageData, x: i64, y: i64, rgb: [u8; 3]) {
  if x < 0 || y < 0 || x as u32 >= out.width || y as u32 >= out.height {
    // Absolute-mode overruns and delta-mode jumps past the edges are a
    // defined occurrence in real files; silently drop them (§4.8, §7).
    return;
  }
  let o = out.pixel_offset(x as u32, y as u32);
  out.data[o] = rgb[0];
  out.data[o + 1] = rgb[1];
  out.data[o + 2] = rgb[2];
}

#[inline]
fn palette_rgb(palette: &[PaletteEntry], index: u8) -> [u8; 3] {
  let e = palette.get(index as usize).copied().unwrap_or_default();
  [e.red, e.green, e.blue]
}

/// Decodes an RLE4/RLE8/RLE24 stream starting at `header.data_offset`.
pub(crate) fn decode(
  bytes: &[u8],
  header: &NormalizedHeader,
  palette: &[PaletteEntry],
  variant: RleVariant,
) -> Result<RawImageData, BmpError> {
  let abs_width = header.abs_width();
  let abs_height = header.abs_height();
  let is_top_down = header.is_top_down();
  let y_step: i64 = if is_top_down { 1 } else { -1 };

  let mut out = RawImageData::new_zeroed(abs_width, abs_height, 3);

  let data = match bytes.get(header.data_offset as usize..) {
    Some(d) => d,
    None => return Ok(out),
  };

  let mut pos: usize = 0;
  let mut x: i64 = 0;
  let mut y: i64 = if is_top_down { 0 } else { abs_height as i64 - 1 };

  macro_rules! next_byte {
    () => {
      match data.get(pos) {
        Some(b) => {
          pos += 1;
          *b
        }
        None => break 'stream,
      }
    };
  }

  'stream: loop {
    let count = next_byte!();
    if count == 0 {
      let escape = next_byte!();
      match escape {
        0 => {
          x = 0;
          y += y_step;
        }
        1 => break 'stream,
        2 => {
          let dx = next_byte!() as i64;
          let dy = next_byte!() as i64;
          x += dx;
          y += dy * y_step;
        }
        k => {
          // Absolute mode: `k` pixels taken uncompressed.
          let k = k as usize;
          match variant {
            RleVariant::Rle8 => {
              for i in 0..k {
                let idx = next_byte!();
                write_pixel(&mut out, x + i as i64, y, palette_rgb(palette, idx));
              }
              if k % 2 == 1 {
                let _ = next_byte!();
              }
            }
            RleVariant::Rle4 => {
              let byte_count = (k + 1) / 2;
              let mut written = 0usize;
              for _ in 0..byte_count {
                let b = next_byte!();
                if written < k {
                  write_pixel(&mut out, x + written as i64, y, palette_rgb(palette, b >> 4));
                  written += 1;
                }
                if written < k {
                  write_pixel(&mut out, x + written as i64, y, palette_rgb(palette, b & 0xF));
                  written += 1;
                }
              }
              if byte_count % 2 == 1 {
                let _ = next_byte!();
              }
            }
            RleVariant::Rle24 => {
              for i in 0..k {
                let b = next_byte!();
                let g = next_byte!();
                let r = next_byte!();
                write_pixel(&mut out, x + i as i64, y, [r, g, b]);
              }
              if (k * 3) % 2 == 1 {
                let _ = next_byte!();
              }
            }
          }
          x += k as i64;
        }
      }
    } else {
      // Encoded mode: `count` pixels produced from the following value(s).
      let count = count as usize;
      match variant {
        RleVariant::Rle8 => {
          let value = next_byte!();
          let rgb = palette_rgb(palette, value);
          for i in 0..count {
            write_pixel(&mut out, x + i as i64, y, rgb);
          }
        }
        RleVariant::Rle4 => {
          let value = next_byte!();
          let rgb_hi = palette_rgb(palette, value >> 4);
          let rgb_lo = palette_rgb(palette, value & 0xF);
          for i in 0..count {
            let rgb = if i % 2 == 0 { rgb_hi } else { rgb_lo };
            write_pixel(&mut out, x + i as i64, y, rgb);
          }
        }
        RleVariant::Rle24 => {
          let b = next_byte!();
          let g = next_byte!();
          let r = next_byte!();
          for i in 0..count {
            write_pixel(&mut out, x + i as i64, y, [r, g, b]);
          }
        }
      }
      x += count as i64;
    }
  }

  Ok(out)
}
