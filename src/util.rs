#![allow(dead_code)]

//! Little-endian byte-pulling helpers shared by the header and pixel-data
//! parsers. These never panic on short input; callers decide what a
//! shortfall means for them (usually [`BmpError::InsufficientBytes`]).

use core::num::{NonZeroU16, NonZeroU32};

use crate::BmpError;

#[inline]
pub(crate) fn try_pull_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let a: [u8; N] = head.try_into().unwrap();
    Some((a, tail))
  } else {
    None
  }
}

/// Like [`try_pull_byte_array`] but yields [`BmpError::InsufficientBytes`] on
/// a shortfall, for call sites that are already in a `Result` chain.
#[inline]
pub(crate) fn try_pull_byte_array_err<const N: usize>(
  bytes: &[u8],
) -> Result<([u8; N], &[u8]), BmpError> {
  try_pull_byte_array(bytes).ok_or(BmpError::InsufficientBytes)
}

#[inline]
#[must_use]
pub(crate) fn u16_le(bytes: &[u8]) -> u16 {
  u16::from_le_bytes(bytes.try_into().unwrap())
}

#[inline]
#[must_use]
pub(crate) fn i16_le(bytes: &[u8]) -> i16 {
  i16::from_le_bytes(bytes.try_into().unwrap())
}

#[inline]
#[must_use]
pub(crate) fn u32_le(bytes: &[u8]) -> u32 {
  u32::from_le_bytes(bytes.try_into().unwrap())
}

#[inline]
#[must_use]
pub(crate) fn i32_le(bytes: &[u8]) -> i32 {
  i32::from_le_bytes(bytes.try_into().unwrap())
}

#[inline]
#[must_use]
pub(crate) fn onz_u16_le(bytes: &[u8]) -> Option<NonZeroU16> {
  NonZeroU16::new(u16_le(bytes))
}

#[inline]
#[must_use]
pub(crate) fn onz_u32_le(bytes: &[u8]) -> Option<NonZeroU32> {
  NonZeroU32::new(u32_le(bytes))
}
