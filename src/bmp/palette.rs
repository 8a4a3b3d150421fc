//! Palette extraction for indexed (1/2/4/8 bpp) images.

use alloc::vec::Vec;

/// One color-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaletteEntry {
  #[allow(missing_docs)]
  pub red: u8,
  #[allow(missing_docs)]
  pub green: u8,
  #[allow(missing_docs)]
  pub blue: u8,
}

/// Reads the color table out of `bytes`, between `palette_offset` and
/// `data_offset`, always returning exactly `1 << bits_per_pixel` entries
/// (zero-filled past whatever the file actually supplied).
///
/// `header_size_12` selects the 3-bytes-per-entry `{B,G,R}` layout used by
/// `BITMAPCOREHEADER`; every other header version uses the 4-bytes-per-entry
/// `{B,G,R,reserved}` layout.
#[must_use]
pub fn read_palette(
  bytes: &[u8],
  palette_offset: usize,
  data_offset: usize,
  bits_per_pixel: u16,
  colors_used: u32,
  header_size_12: bool,
) -> Vec<PaletteEntry> {
  let max_entries = 1usize << bits_per_pixel;
  let bytes_per_entry = if header_size_12 { 3 } else { 4 };
  let available_span = data_offset.saturating_sub(palette_offset);
  let available_entries = available_span / bytes_per_entry;
  let declared = if colors_used != 0 { colors_used as usize } else { max_entries };
  let effective_count = declared.min(available_entries).min(max_entries);

  let mut palette = Vec::with_capacity(max_entries);
  for i in 0..effective_count {
    let entry_offset = palette_offset + i * bytes_per_entry;
    match bytes.get(entry_offset..entry_offset + bytes_per_entry) {
      Some(raw) => palette.push(PaletteEntry { blue: raw[0], green: raw[1], red: raw[2] }),
      None => break,
    }
  }
  palette.resize(max_entries, PaletteEntry::default());
  palette
}

/// True iff every entry in the (effective) palette has `red == green ==
/// blue`. An empty palette is trivially grayscale.
#[must_use]
pub fn is_grayscale(palette: &[PaletteEntry]) -> bool {
  palette.iter().all(|e| e.red == e.green && e.green == e.blue)
}
