//! Assembles the file header, DIB header, optional mask block, and palette
//! that precede pixel data in an encoded BMP (§4.10).

use alloc::vec::Vec;
use core::num::NonZeroU32;

use super::{EncodeOptions, HeaderType};
use crate::bmp::file_header::BmpFileHeader;
use crate::bmp::info_header::{
  BmpColorspace, BmpCompression, BmpInfoHeaderV1, BmpInfoHeaderV3, BmpInfoHeaderV4, BmpInfoHeaderV5, SrgbIntent,
};
use crate::bmp::palette::PaletteEntry;
use crate::image::RawImageData;
use crate::BmpError;

/// 2835 pixels/meter is the conventional 72 DPI placeholder most encoders
/// write when no real resolution is known (§4.10).
const DEFAULT_PPM: i32 = 2835;

fn common_v1(raw: &RawImageData, bits_per_pixel: u16, compression: BmpCompression, image_size: u32, top_down: bool, palette_len: usize) -> BmpInfoHeaderV1 {
  BmpInfoHeaderV1 {
    width: raw.width as i32,
    height: if top_down { -(raw.height as i32) } else { raw.height as i32 },
    bits_per_pixel,
    compression,
    image_byte_size: NonZeroU32::new(image_size),
    x_pixels_per_meter: DEFAULT_PPM,
    y_pixels_per_meter: DEFAULT_PPM,
    palette_len: NonZeroU32::new(palette_len as u32),
    important_colors: None,
  }
}

fn common_v3(v1: BmpInfoHeaderV1, masks: (u32, u32, u32, u32)) -> BmpInfoHeaderV3 {
  BmpInfoHeaderV3 {
    width: v1.width,
    height: v1.height,
    bits_per_pixel: v1.bits_per_pixel,
    compression: v1.compression,
    image_byte_size: v1.image_byte_size,
    x_pixels_per_meter: v1.x_pixels_per_meter,
    y_pixels_per_meter: v1.y_pixels_per_meter,
    palette_len: v1.palette_len,
    important_colors: v1.important_colors,
    red_mask: masks.0,
    green_mask: masks.1,
    blue_mask: masks.2,
    alpha_mask: masks.3,
  }
}

fn common_v4(v3: BmpInfoHeaderV3) -> BmpInfoHeaderV4 {
  BmpInfoHeaderV4 {
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
    colorspace: BmpColorspace::Srgb,
    gamma_red: 0,
    gamma_green: 0,
    gamma_blue: 0,
  }
}

/// Builds the complete BMP byte stream: file header, DIB header, optional
/// mask block, optional palette, then the already-encoded pixel data.
pub(crate) fn write_bmp(
  raw: &RawImageData,
  bits_per_pixel: u16,
  compression: BmpCompression,
  pixel_data: &[u8],
  options: &EncodeOptions,
  palette: Option<&[PaletteEntry]>,
  bitfields: Option<(u32, u32, u32, u32)>,
) -> Result<Vec<u8>, BmpError> {
  let dib_header_size: u32 = match options.header_type {
    HeaderType::Info => 40,
    HeaderType::V4 => 108,
    HeaderType::V5 => 124,
  };

  // §4.10: only a BITMAPINFOHEADER (40-byte) file using BITFIELDS or
  // ALPHABITFIELDS carries a separate mask block; V4/V5 headers already
  // have mask fields built in.
  let needs_mask_block = matches!(options.header_type, HeaderType::Info)
    && matches!(compression, BmpCompression::RgbBitfieldsOrHuffman1D | BmpCompression::AlphaBitfields);
  let mask_block_len: usize = if needs_mask_block {
    if matches!(compression, BmpCompression::AlphaBitfields) { 16 } else { 12 }
  } else {
    0
  };

  let palette_len = palette.map_or(0, <[PaletteEntry]>::len);
  let palette_bytes_len = palette_len * 4;
  let data_offset = 14 + dib_header_size as usize + mask_block_len + palette_bytes_len;
  let total_file_size = data_offset + pixel_data.len();

  let file_header = BmpFileHeader {
    tag: crate::ascii_array::AsciiArray(*b"BM"),
    total_file_size: total_file_size as u32,
    pixel_data_offset: data_offset as u32,
  };
  let file_header_bytes: [u8; 14] = file_header.into();

  let v1 = common_v1(raw, bits_per_pixel, compression, pixel_data.len() as u32, options.top_down, palette_len);

  let mut out = Vec::with_capacity(total_file_size);
  out.extend_from_slice(&file_header_bytes);

  match options.header_type {
    HeaderType::Info => {
      let bytes: [u8; 40] = v1.into();
      out.extend_from_slice(&bytes);
      if let Some(masks) = bitfields {
        out.extend_from_slice(&masks.0.to_le_bytes());
        out.extend_from_slice(&masks.1.to_le_bytes());
        out.extend_from_slice(&masks.2.to_le_bytes());
        if mask_block_len == 16 {
          out.extend_from_slice(&masks.3.to_le_bytes());
        }
      }
    }
    HeaderType::V4 => {
      let v3 = common_v3(v1, bitfields.unwrap_or((0, 0, 0, 0)));
      let v4 = common_v4(v3);
      let bytes: [u8; 108] = v4.into();
      out.extend_from_slice(&bytes);
    }
    HeaderType::V5 => {
      let v3 = common_v3(v1, bitfields.unwrap_or((0, 0, 0, 0)));
      let v4 = common_v4(v3);
      let v5 = BmpInfoHeaderV5 {
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
        srgb_intent: Some(SrgbIntent::RelativeColorimetric),
        profile_data_offset: 0,
        profile_size: 0,
      };
      let bytes: [u8; 124] = v5.into();
      out.extend_from_slice(&bytes);
    }
  }

  if let Some(palette) = palette {
    for entry in palette {
      out.push(entry.blue);
      out.push(entry.green);
      out.push(entry.red);
      out.push(0);
    }
  }

  out.extend_from_slice(pixel_data);
  Ok(out)
}
