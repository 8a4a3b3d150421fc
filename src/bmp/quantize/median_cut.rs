//! Median Cut palette generation (§4.12).

use alloc::vec::Vec;

use crate::bmp::palette::PaletteEntry;
use crate::image::RawImageData;

/// Reads pixel `i` of `raw` as `(r, g, b)`, expanding grayscale to `(g,g,g)`.
#[inline]
fn pixel_rgb(raw: &RawImageData, i: usize) -> (u8, u8, u8) {
  let o = i * raw.channels as usize;
  match raw.channels {
    1 => (raw.data[o], raw.data[o], raw.data[o]),
    _ => (raw.data[o], raw.data[o + 1], raw.data[o + 2]),
  }
}

fn unique_colors(raw: &RawImageData) -> Vec<(u8, u8, u8)> {
  let pixel_count = raw.width as usize * raw.height as usize;
  let mut seen: Vec<u32> = Vec::new();
  let mut out = Vec::new();
  for i in 0..pixel_count {
    let (r, g, b) = pixel_rgb(raw, i);
    let packed = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
    if !seen.contains(&packed) {
      seen.push(packed);
      out.push((r, g, b));
    }
  }
  out
}

/// One box in the median-cut partition: a set of colors plus their
/// per-axis min/max range.
struct Box_ {
  colors: Vec<(u8, u8, u8)>,
  min: (u8, u8, u8),
  max: (u8, u8, u8),
}

impl Box_ {
  fn from_colors(colors: Vec<(u8, u8, u8)>) -> Self {
    let mut min = (u8::MAX, u8::MAX, u8::MAX);
    let mut max = (0u8, 0u8, 0u8);
    for &(r, g, b) in &colors {
      min.0 = min.0.min(r);
      min.1 = min.1.min(g);
      min.2 = min.2.min(b);
      max.0 = max.0.max(r);
      max.1 = max.1.max(g);
      max.2 = max.2.max(b);
    }
    Self { colors, min, max }
  }

  /// Index of the axis (0=R, 1=G, 2=B) with the greatest range.
  fn widest_axis(&self) -> usize {
    let ranges = [
      u32::from(self.max.0) - u32::from(self.min.0),
      u32::from(self.max.1) - u32::from(self.min.1),
      u32::from(self.max.2) - u32::from(self.min.2),
    ];
    if ranges[0] >= ranges[1] && ranges[0] >= ranges[2] {
      0
    } else if ranges[1] >= ranges[2] {
      1
    } else {
      2
    }
  }

  fn range(&self) -> u32 {
    let axis = self.widest_axis();
    match axis {
      0 => u32::from(self.max.0) - u32::from(self.min.0),
      1 => u32::from(self.max.1) - u32::from(self.min.1),
      _ => u32::from(self.max.2) - u32::from(self.min.2),
    }
  }

  fn mean(&self) -> PaletteEntry {
    let mut sum = (0u64, 0u64, 0u64);
    for &(r, g, b) in &self.colors {
      sum.0 += u64::from(r);
      sum.1 += u64::from(g);
      sum.2 += u64::from(b);
    }
    let n = self.colors.len().max(1) as u64;
    PaletteEntry {
      red: ((sum.0 + n / 2) / n) as u8,
      green: ((sum.1 + n / 2) / n) as u8,
      blue: ((sum.2 + n / 2) / n) as u8,
    }
  }

  /// Splits into two halves at the median along the widest axis.
  fn split(mut self) -> (Box_, Box_) {
    let axis = self.widest_axis();
    self.colors.sort_by_key(|&(r, g, b)| match axis {
      0 => r,
      1 => g,
      _ => b,
    });
    let mid = self.colors.len() / 2;
    let right = self.colors.split_off(mid);
    (Box_::from_colors(self.colors), Box_::from_colors(right))
  }
}

/// Builds an `n`-entry palette from `raw`'s colors via Median Cut (§4.12).
///
/// If there are at most `n` unique colors, those become the palette
/// (zero-filled out to length `n`); otherwise boxes are repeatedly split
/// along their widest axis until there are `n` of them.
pub fn median_cut(raw: &RawImageData, n: usize) -> Vec<PaletteEntry> {
  let uniques = unique_colors(raw);
  if uniques.len() <= n {
    let mut palette: Vec<PaletteEntry> =
      uniques.into_iter().map(|(red, green, blue)| PaletteEntry { red, green, blue }).collect();
    palette.resize(n, PaletteEntry::default());
    return palette;
  }

  let mut boxes = alloc::vec![Box_::from_colors(uniques)];
  while boxes.len() < n {
    let (widest_index, _) = boxes
      .iter()
      .enumerate()
      .max_by_key(|(_, b)| b.range())
      .expect("boxes is never empty while boxes.len() < n");
    let widest = boxes.remove(widest_index);
    if widest.colors.len() <= 1 {
      // Can't usefully split a singleton box; put it back and stop early
      // rather than spin forever.
      boxes.push(widest);
      break;
    }
    let (a, b) = widest.split();
    boxes.push(a);
    boxes.push(b);
  }

  let mut palette: Vec<PaletteEntry> = boxes.iter().map(Box_::mean).collect();
  palette.resize(n, PaletteEntry::default());
  palette
}

/// Generates a uniform grayscale palette of `n` entries: entry `i` has
/// `red = green = blue = round(i * 255 / (n - 1))` (or 0 when `n == 1`).
pub fn generate_grayscale_palette(n: usize) -> Vec<PaletteEntry> {
  if n == 0 {
    return Vec::new();
  }
  if n == 1 {
    return alloc::vec![PaletteEntry::default()];
  }
  let max = (n - 1) as u32;
  (0..n)
    .map(|i| {
      let v = ((i as u32) * 255 + max / 2) / max;
      let v = v.min(255) as u8;
      PaletteEntry { red: v, green: v, blue: v }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn small_unique_set_is_used_directly_and_padded() {
    let raw = RawImageData {
      width: 2,
      height: 1,
      channels: 3,
      data: alloc::vec![10, 20, 30, 10, 20, 30],
    };
    let palette = median_cut(&raw, 4);
    assert_eq!(palette.len(), 4);
    assert_eq!(palette[0], PaletteEntry { red: 10, green: 20, blue: 30 });
    assert_eq!(palette[1], PaletteEntry::default());
  }

  #[test]
  fn grayscale_palette_endpoints() {
    let palette = generate_grayscale_palette(4);
    assert_eq!(palette[0], PaletteEntry { red: 0, green: 0, blue: 0 });
    assert_eq!(palette[3], PaletteEntry { red: 255, green: 255, blue: 255 });
  }

  #[test]
  fn grayscale_palette_of_one_is_black() {
    assert_eq!(generate_grayscale_palette(1), alloc::vec![PaletteEntry::default()]);
  }
}
