//! Modified Huffman (CCITT Group 3 1D) decoding for 1-bpp images whose
//! compression field is overloaded to mean "Huffman" rather than
//! "BITFIELDS" (§4.9, §9 "Open question: BI_HUFFMAN vs BI_BITFIELDS").
//!
//! Two binary tries (one per run color) are built once per decode call from
//! the static CCITT terminating/make-up code tables, then walked bit by bit
//! by an MSB-first [`BitReader`].

use alloc::vec::Vec;

use crate::bit_reader::BitReader;
use crate::bmp::header::NormalizedHeader;
use crate::bmp::palette::{read_palette, PaletteEntry};
use crate::image::RawImageData;
use crate::BmpError;

use super::rgb::write_entry;

/// `(code_bits, bit_length, run_value)`. White terminating codes, 0-63.
const WHITE_TERM: &[(u16, u8, u16)] = &[
  (0x35, 8, 0),
  (0x07, 6, 1),
  (0x07, 4, 2),
  (0x08, 4, 3),
  (0x0B, 4, 4),
  (0x0C, 4, 5),
  (0x0E, 4, 6),
  (0x0F, 4, 7),
  (0x13, 5, 8),
  (0x14, 5, 9),
  (0x07, 5, 10),
  (0x08, 5, 11),
  (0x08, 6, 12),
  (0x03, 6, 13),
  (0x34, 6, 14),
  (0x35, 6, 15),
  (0x2A, 6, 16),
  (0x2B, 6, 17),
  (0x27, 7, 18),
  (0x0C, 7, 19),
  (0x08, 7, 20),
  (0x17, 7, 21),
  (0x03, 7, 22),
  (0x04, 7, 23),
  (0x28, 7, 24),
  (0x2B, 7, 25),
  (0x13, 7, 26),
  (0x24, 7, 27),
  (0x18, 7, 28),
  (0x02, 8, 29),
  (0x03, 8, 30),
  (0x1A, 8, 31),
  (0x1B, 8, 32),
  (0x12, 8, 33),
  (0x13, 8, 34),
  (0x14, 8, 35),
  (0x15, 8, 36),
  (0x16, 8, 37),
  (0x17, 8, 38),
  (0x28, 8, 39),
  (0x29, 8, 40),
  (0x2A, 8, 41),
  (0x2B, 8, 42),
  (0x2C, 8, 43),
  (0x2D, 8, 44),
  (0x04, 8, 45),
  (0x05, 8, 46),
  (0x0A, 8, 47),
  (0x0B, 8, 48),
  (0x52, 8, 49),
  (0x53, 8, 50),
  (0x54, 8, 51),
  (0x55, 8, 52),
  (0x24, 8, 53),
  (0x25, 8, 54),
  (0x58, 8, 55),
  (0x59, 8, 56),
  (0x5A, 8, 57),
  (0x5B, 8, 58),
  (0x4A, 8, 59),
  (0x4B, 8, 60),
  (0x32, 8, 61),
  (0x33, 8, 62),
  (0x34, 8, 63),
];

/// White make-up codes, multiples of 64 up to 1728.
const WHITE_MAKEUP: &[(u16, u8, u16)] = &[
  (0x1B, 5, 64),
  (0x12, 5, 128),
  (0x17, 6, 192),
  (0x37, 7, 256),
  (0x36, 8, 320),
  (0x37, 8, 384),
  (0x64, 8, 448),
  (0x65, 8, 512),
  (0x68, 8, 576),
  (0x67, 8, 640),
  (0xCC, 9, 704),
  (0xCD, 9, 768),
  (0xD2, 9, 832),
  (0xD3, 9, 896),
  (0xD4, 9, 960),
  (0xD5, 9, 1024),
  (0xD6, 9, 1088),
  (0xD7, 9, 1152),
  (0xD8, 9, 1216),
  (0xD9, 9, 1280),
  (0xDA, 9, 1344),
  (0xDB, 9, 1408),
  (0x98, 9, 1472),
  (0x99, 9, 1536),
  (0x9A, 9, 1600),
  (0x18, 6, 1664),
  (0x9B, 9, 1728),
];

/// Black terminating codes, 0-63.
const BLACK_TERM: &[(u16, u8, u16)] = &[
  (0x37, 10, 0),
  (0x02, 3, 1),
  (0x03, 2, 2),
  (0x02, 2, 3),
  (0x03, 3, 4),
  (0x03, 4, 5),
  (0x02, 4, 6),
  (0x03, 5, 7),
  (0x05, 6, 8),
  (0x04, 6, 9),
  (0x04, 7, 10),
  (0x05, 7, 11),
  (0x07, 7, 12),
  (0x04, 8, 13),
  (0x07, 8, 14),
  (0x18, 9, 15),
  (0x17, 10, 16),
  (0x18, 10, 17),
  (0x08, 10, 18),
  (0x67, 11, 19),
  (0x68, 11, 20),
  (0x6C, 11, 21),
  (0x37, 11, 22),
  (0x28, 11, 23),
  (0x17, 11, 24),
  (0x18, 11, 25),
  (0xCA, 12, 26),
  (0xCB, 12, 27),
  (0xCC, 12, 28),
  (0xCD, 12, 29),
  (0x68, 12, 30),
  (0x69, 12, 31),
  (0x6A, 12, 32),
  (0x6B, 12, 33),
  (0xD2, 12, 34),
  (0xD3, 12, 35),
  (0xD4, 12, 36),
  (0xD5, 12, 37),
  (0xD6, 12, 38),
  (0xD7, 12, 39),
  (0x6C, 12, 40),
  (0x6D, 12, 41),
  (0xDA, 12, 42),
  (0xDB, 12, 43),
  (0x54, 12, 44),
  (0x55, 12, 45),
  (0x56, 12, 46),
  (0x57, 12, 47),
  (0x64, 12, 48),
  (0x65, 12, 49),
  (0x52, 12, 50),
  (0x53, 12, 51),
  (0x24, 12, 52),
  (0x37, 12, 53),
  (0x38, 12, 54),
  (0x27, 12, 55),
  (0x28, 12, 56),
  (0x58, 12, 57),
  (0x59, 12, 58),
  (0x2B, 12, 59),
  (0x2C, 12, 60),
  (0x5A, 12, 61),
  (0x66, 12, 62),
  (0x67, 12, 63),
];

/// Black make-up codes, multiples of 64 up to 1728.
const BLACK_MAKEUP: &[(u16, u8, u16)] = &[
  (0x0F, 10, 64),
  (0xC8, 12, 128),
  (0xC9, 12, 192),
  (0x5B, 12, 256),
  (0x33, 12, 320),
  (0x34, 12, 384),
  (0x35, 12, 448),
  (0x6C, 13, 512),
  (0x6D, 13, 576),
  (0x4A, 13, 640),
  (0x4B, 13, 704),
  (0x4C, 13, 768),
  (0x4D, 13, 832),
  (0x72, 13, 896),
  (0x73, 13, 960),
  (0x74, 13, 1024),
  (0x75, 13, 1088),
  (0x76, 13, 1152),
  (0x77, 13, 1216),
  (0x52, 13, 1280),
  (0x53, 13, 1344),
  (0x54, 13, 1408),
  (0x55, 13, 1472),
  (0x5A, 13, 1536),
  (0x5B, 13, 1600),
  (0x64, 13, 1664),
  (0x65, 13, 1728),
];

/// Extension make-up codes, shared by both colors, for runs 1792-2560.
const SHARED_MAKEUP: &[(u16, u8, u16)] = &[
  (0x08, 11, 1792),
  (0x0C, 11, 1856),
  (0x0D, 11, 1920),
  (0x12, 12, 1984),
  (0x13, 12, 2048),
  (0x14, 12, 2112),
  (0x15, 12, 2176),
  (0x16, 12, 2240),
  (0x17, 12, 2304),
  (0x1C, 12, 2368),
  (0x1D, 12, 2432),
  (0x1E, 12, 2496),
  (0x1F, 12, 2560),
];

/// A node in the binary code trie: either an internal fork, or a leaf
/// holding the run length that code represents.
#[derive(Debug, Clone, Default)]
struct TrieNode {
  children: [Option<usize>; 2],
  run_length: Option<u16>,
}

/// A prefix-code trie over one color's terminating + make-up codes.
struct Trie {
  nodes: Vec<TrieNode>,
}

impl Trie {
  fn build(tables: &[&[(u16, u8, u16)]]) -> Self {
    let mut nodes = alloc::vec![TrieNode::default()];
    for table in tables {
      for &(code, len, run_length) in *table {
        let mut node = 0usize;
        for bit_index in (0..len).rev() {
          let bit = ((code >> bit_index) & 1) as usize;
          node = match nodes[node].children[bit] {
            Some(next) => next,
            None => {
              nodes.push(TrieNode::default());
              let next = nodes.len() - 1;
              nodes[node].children[bit] = Some(next);
              next
            }
          };
        }
        nodes[node].run_length = Some(run_length);
      }
    }
    Self { nodes }
  }

  /// Walks bits from `reader` until a leaf is reached. On a dead end (no
  /// child for the next bit and not at a leaf), rewinds `reader` to where it
  /// started and returns `None`.
  fn decode_one(&self, reader: &mut BitReader<'_>) -> Option<u16> {
    let start = reader.position();
    let mut node = 0usize;
    loop {
      if let Some(run) = self.nodes[node].run_length {
        return Some(run);
      }
      let bit = reader.read_bit()?;
      match self.nodes[node].children[bit as usize] {
        Some(next) => node = next,
        None => {
          reader.set_position(start);
          return None;
        }
      }
    }
  }
}

/// 12 zero bits followed by a 1 bit.
const EOL_BITS: usize = 12;

fn is_eol(reader: &BitReader<'_>) -> bool {
  reader.has_at_least(EOL_BITS) && reader.peek(EOL_BITS) == Some(1)
}

fn skip_to_next_eol_or_end(reader: &mut BitReader<'_>) {
  while reader.has_at_least(EOL_BITS) {
    if is_eol(reader) {
      reader.skip(EOL_BITS);
      return;
    }
    reader.skip(1);
  }
  // ran out of buffer without finding an EOL; leave the cursor at the end
  while reader.read_bit().is_some() {}
}

/// Decodes a 1-bpp Modified Huffman (CCITT Group 3 1D) image.
pub(crate) fn decode(bytes: &[u8], header: &NormalizedHeader) -> Result<RawImageData, BmpError> {
  let palette = read_palette(
    bytes,
    header.palette_offset(),
    header.data_offset as usize,
    header.bits_per_pixel,
    header.colors_used,
    header.header_size == 12,
  );
  let grayscale = crate::bmp::palette::is_grayscale(&palette);
  let channels: u8 = if grayscale { 1 } else { 3 };

  let white_trie = Trie::build(&[WHITE_TERM, WHITE_MAKEUP, SHARED_MAKEUP]);
  let black_trie = Trie::build(&[BLACK_TERM, BLACK_MAKEUP, SHARED_MAKEUP]);

  let abs_width = header.abs_width();
  let abs_height = header.abs_height();
  let mut out = RawImageData::new_zeroed(abs_width, abs_height, channels);

  let Some(payload) = bytes.get(header.data_offset as usize..) else {
    return Ok(out);
  };
  let mut reader = BitReader::new(payload);

  if is_eol(&reader) {
    reader.skip(EOL_BITS);
  }

  for y in 0..abs_height {
    let mut col: u32 = 0;
    let mut is_white = true;
    let row_start = out.row_offset(y);

    loop {
      if col >= abs_width {
        break;
      }
      if !reader.has_at_least(1) || is_eol(&reader) {
        break;
      }

      let trie = if is_white { &white_trie } else { &black_trie };
      let mut run_len: u32 = 0;
      let mut got_terminating = false;
      loop {
        match trie.decode_one(&mut reader) {
          Some(v) => {
            run_len += u32::from(v);
            if v < 64 {
              got_terminating = true;
              break;
            }
            // make-up code: keep accumulating
            if !reader.has_at_least(1) || is_eol(&reader) {
              break;
            }
          }
          None => break,
        }
      }
      let _ = got_terminating;

      let index: u8 = if is_white { 0 } else { 1 };
      let entry = palette.get(index as usize).copied().unwrap_or_default();
      let write_to = run_len.min(abs_width.saturating_sub(col));
      for i in 0..write_to {
        write_entry(
          &mut out.data,
          row_start + (col + i) as usize * channels as usize,
          entry,
          channels,
        );
      }
      col += run_len;
      is_white = !is_white;

      if run_len == 0 {
        // malformed stream: nothing decoded, and nothing would ever
        // terminate; bail out of the row to avoid spinning forever.
        break;
      }
    }

    skip_to_next_eol_or_end(&mut reader);
  }

  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn trie_round_trips_every_terminating_code() {
    let trie = Trie::build(&[WHITE_TERM, WHITE_MAKEUP, SHARED_MAKEUP]);
    for &(code, len, run_length) in WHITE_TERM {
      let mut buf = [0u8; 4];
      write_code_into(&mut buf, code, len);
      let mut reader = BitReader::new(&buf);
      assert_eq!(trie.decode_one(&mut reader), Some(run_length));
      assert_eq!(reader.position(), len as usize);
    }
  }

  fn write_code_into(buf: &mut [u8], code: u16, len: u8) {
    for i in 0..len {
      let bit_index = len - 1 - i;
      let bit = (code >> bit_index) & 1;
      let byte = (i / 8) as usize;
      let shift = 7 - (i % 8);
      buf[byte] |= (bit as u8) << shift;
    }
  }
}
