#![cfg_attr(not(feature = "trace"), no_std)]
#![forbid(unsafe_code)]
//#![warn(missing_docs)]

//! A self-contained decoder and encoder for the Windows/OS2 BMP image
//! format: every DIB header variant, palette and bitfield analysis,
//! uncompressed/BITFIELDS/RLE/Modified-Huffman pixel decoding, Median Cut
//! quantization, and the matching encode path back to bytes.

extern crate alloc;

#[cfg(feature = "trace")]
extern crate std;

/// Prints a trace line when the `trace` feature is enabled; a no-op
/// otherwise. Every fallible parsing step logs through this rather than
/// `eprintln!` directly, so tracing can be compiled out entirely.
#[macro_export]
macro_rules! trace {
  ($($arg:tt)*) => {
    #[cfg(feature = "trace")] {
      ::std::print!("{file}:{line}> ", file = file!(), line = line!());
      ::std::println!($($arg)*);
    }
  }
}

mod ascii_array;
mod bit_reader;
pub mod bmp;
mod error;
mod image;
mod util;

pub use bmp::{decode, encode, extract_compressed, BmpCompression, DecodeOptions, EncodeOptions, ExtractedPayload, HeaderType};
pub use error::BmpError;
pub use image::RawImageData;
