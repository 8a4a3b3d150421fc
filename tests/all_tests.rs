#![allow(bad_style)]

use bmp_codec::{decode, encode, DecodeOptions, EncodeOptions, RawImageData};

#[allow(dead_code)]
fn rand_bytes(count: usize) -> Vec<u8> {
  let mut buffer = vec![0; count];
  getrandom::getrandom(&mut buffer).unwrap();
  buffer
}

/// S1: 1x1 BI_RGB 24-bit, single black pixel.
#[test]
fn decodes_1x1_24bit_black_pixel() {
  #[rustfmt::skip]
  let bytes: &[u8] = &[
    0x42, 0x4D, 0x3A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x36, 0x00, 0x00, 0x00,
    0x28, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00,
    0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
  ];
  assert_eq!(bytes.len(), 58);
  let image = decode(bytes, &DecodeOptions::default()).unwrap();
  assert_eq!(image, RawImageData { width: 1, height: 1, channels: 3, data: vec![0, 0, 0] });
}

/// S2: 2x2 24-bit bottom-up with red, green, blue, white pixels (top-left,
/// top-right, bottom-left, bottom-right), checked in top-down output order.
#[test]
fn decodes_2x2_24bit_bottom_up() {
  #[rustfmt::skip]
  let bytes: &[u8] = &[
    0x42, 0x4D, 0x46, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x36, 0x00, 0x00, 0x00,
    0x28, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x01, 0x00,
    0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    // bottom row first (stored bottom-up), then top row.
    0xFF, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0x00, 0x00,
    0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0x00, 0x00,
  ];
  let image = decode(bytes, &DecodeOptions::default()).unwrap();
  assert_eq!(image.width, 2);
  assert_eq!(image.height, 2);
  assert_eq!(image.channels, 3);
  assert_eq!(image.data, vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255]);
}

/// S3: 1-bpp BI_RGB, width 10, height 1, black/white palette, row `0xAA 0x80`.
#[test]
fn decodes_1bpp_palette_row() {
  #[rustfmt::skip]
  let bytes: &[u8] = &[
    0x42, 0x4D, 0x42, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3E, 0x00, 0x00, 0x00,
    0x28, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00,
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, // palette index 0: black
    0xFF, 0xFF, 0xFF, 0x00, // palette index 1: white
    0xAA, 0x80, 0x00, 0x00, // one row, stride 4
  ];
  let image = decode(bytes, &DecodeOptions::default()).unwrap();
  assert_eq!(image.width, 10);
  assert_eq!(image.height, 1);
  assert_eq!(image.channels, 1);
  assert_eq!(image.data, vec![255, 0, 255, 0, 255, 0, 255, 0, 255, 0]);
}

/// S4: 4-bpp RLE stream `03 1A 00 00 00 01` against a 16-entry palette
/// where index 1 is black and index 10 (0xA) is red.
#[test]
fn decodes_4bpp_rle_run() {
  #[rustfmt::skip]
  let mut bytes: Vec<u8> = vec![
    0x42, 0x4D, 0x7C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x76, 0x00, 0x00, 0x00,
    0x28, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00,
    0x04, 0x00, 0x02, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
  ];
  let mut palette = vec![0u8; 16 * 4];
  palette[10 * 4] = 0x00; // blue
  palette[10 * 4 + 1] = 0x00; // green
  palette[10 * 4 + 2] = 0xFF; // red
  bytes.extend_from_slice(&palette);
  bytes.extend_from_slice(&[0x03, 0x1A, 0x00, 0x00, 0x00, 0x01]);
  assert_eq!(bytes.len(), 124);

  let image = decode(&bytes, &DecodeOptions::default()).unwrap();
  assert_eq!(image.width, 3);
  assert_eq!(image.height, 1);
  assert_eq!(image.data, vec![0, 0, 0, 255, 0, 0, 0, 0, 0]);
}

/// S5: 16-bpp BI_BITFIELDS with masks left zero, so the §4.7 default RGB555
/// masks apply; pixel `FF 7F` (0x7FFF) decodes to white.
#[test]
fn decodes_16bpp_bitfields_default_masks() {
  #[rustfmt::skip]
  let bytes: &[u8] = &[
    0x42, 0x4D, 0x3A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x36, 0x00, 0x00, 0x00,
    0x28, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00,
    0x10, 0x00, 0x03, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xFF, 0x7F, 0x00, 0x00,
  ];
  let image = decode(bytes, &DecodeOptions::default()).unwrap();
  assert_eq!(image.channels, 3);
  assert_eq!(image.data, vec![255, 255, 255]);
}

/// S6: a round trip through `encode` and `decode` produces the same pixel
/// data regardless of `top_down`, since the codec hides row order from
/// callers on both ends.
#[test]
fn top_down_round_trips_through_encode_and_decode() {
  let raw = RawImageData {
    width: 4,
    height: 2,
    channels: 3,
    #[rustfmt::skip]
    data: vec![
      255, 0, 0,    0, 255, 0,    0, 0, 255,    255, 255, 255,
      10, 20, 30,   40, 50, 60,   70, 80, 90,    100, 110, 120,
    ],
  };

  for top_down in [true, false] {
    let options = EncodeOptions { top_down, ..Default::default() };
    let bytes = encode(&raw, &options).unwrap();
    let decoded = decode(&bytes, &DecodeOptions::default()).unwrap();
    assert_eq!(decoded, raw, "top_down={top_down}");
  }
}

/// Every successfully decoded image satisfies the buffer-length invariant
/// that the rest of the crate relies on.
#[test]
fn decoded_images_always_have_consistent_length() {
  #[rustfmt::skip]
  let bytes: &[u8] = &[
    0x42, 0x4D, 0x3A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x36, 0x00, 0x00, 0x00,
    0x28, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00,
    0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
  ];
  let image = decode(bytes, &DecodeOptions::default()).unwrap();
  assert!(image.has_consistent_length());
}

/// Decoding never panics, even on structurally nonsensical input -- a
/// malformed header should surface as an `Err`, not a crash.
#[test]
fn decode_never_panics_on_random_bytes() {
  for _ in 0..64 {
    let bytes = rand_bytes(256);
    let _ = decode(&bytes, &DecodeOptions::default());
  }
}

/// Encoding rejects inputs whose declared dimensions disagree with the
/// buffer length, rather than indexing out of bounds.
#[test]
fn encode_rejects_inconsistent_dimensions() {
  let raw = RawImageData { width: 4, height: 4, channels: 3, data: vec![0; 10] };
  assert!(encode(&raw, &EncodeOptions::default()).is_err());
}
