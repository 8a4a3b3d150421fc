//! Color quantization: Median Cut palette generation and nearest-color
//! indexing against it (§4.12).

mod kdtree;
mod median_cut;

pub use median_cut::{generate_grayscale_palette, median_cut};

use alloc::vec::Vec;

use crate::bmp::palette::PaletteEntry;
use crate::image::RawImageData;
use kdtree::KdTree;

/// Below this palette size a linear scan beats the overhead of building a
/// tree and a cache.
const KDTREE_THRESHOLD: usize = 64;

#[inline]
fn pixel_rgb(raw: &RawImageData, i: usize) -> (u8, u8, u8) {
  let o = i * raw.channels as usize;
  match raw.channels {
    1 => (raw.data[o], raw.data[o], raw.data[o]),
    _ => (raw.data[o], raw.data[o + 1], raw.data[o + 2]),
  }
}

#[inline]
fn nearest_linear(palette: &[PaletteEntry], r: u8, g: u8, b: u8) -> u8 {
  let mut best_index = 0usize;
  let mut best_dist = u32::MAX;
  for (i, entry) in palette.iter().enumerate() {
    let dr = i32::from(entry.red) - i32::from(r);
    let dg = i32::from(entry.green) - i32::from(g);
    let db = i32::from(entry.blue) - i32::from(b);
    let dist = (dr * dr + dg * dg + db * db) as u32;
    if dist < best_dist {
      best_dist = dist;
      best_index = i;
    }
  }
  best_index as u8
}

/// Maps every pixel of `raw` to a palette index (§4.12). Grayscale sources
/// are expanded to `(g,g,g)` before matching. For palettes of at least
/// [`KDTREE_THRESHOLD`] entries, a k-d tree with a memoization cache keyed
/// on the packed 24-bit source color is used; smaller palettes use a linear
/// scan with ties broken toward the smaller index.
#[must_use]
pub fn convert_to_indexed(raw: &RawImageData, palette: &[PaletteEntry]) -> Vec<u8> {
  let pixel_count = raw.width as usize * raw.height as usize;
  let mut out = Vec::with_capacity(pixel_count);

  if palette.len() >= KDTREE_THRESHOLD {
    let tree = KdTree::build(palette);
    // Open addressing cache: packed-color -> index, with a sentinel marking
    // "empty" (packed colors never collide with the sentinel since it's out
    // of the 24-bit range).
    let mut cache: alloc::collections::BTreeMap<u32, u8> = alloc::collections::BTreeMap::new();
    for i in 0..pixel_count {
      let (r, g, b) = pixel_rgb(raw, i);
      let packed = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
      let index = *cache.entry(packed).or_insert_with(|| tree.find_nearest(r, g, b) as u8);
      out.push(index);
    }
  } else {
    for i in 0..pixel_count {
      let (r, g, b) = pixel_rgb(raw, i);
      out.push(nearest_linear(palette, r, g, b));
    }
  }
  out
}
