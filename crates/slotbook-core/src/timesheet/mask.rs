//! [`AvailabilityMask`]: a fixed-length bit vector over bin indices.
//!
//! Bit `i` set means bin `i` is available. The text form is one `0`/`1`
//! character per bin, so the string length is the mask size.

use std::fmt;

use crate::{Error, Result};

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvailabilityMask {
  /// Bits at or beyond `size` are always clear.
  words: Vec<u64>,
  size:  usize,
}

impl AvailabilityMask {
  /// An all-unavailable mask with `size` bins.
  pub fn new(size: usize) -> Self {
    Self {
      words: vec![0; size.div_ceil(WORD_BITS)],
      size,
    }
  }

  pub fn size(&self) -> usize { self.size }

  pub fn get(&self, index: usize) -> Result<bool> {
    self.check(index)?;
    Ok(self.bit(index))
  }

  pub fn set(&mut self, index: usize, available: bool) -> Result<()> {
    self.check(index)?;
    self.write_bit(index, available);
    Ok(())
  }

  /// Flip bin `index` and return its new state.
  pub fn toggle(&mut self, index: usize) -> Result<bool> {
    self.check(index)?;
    let next = !self.bit(index);
    self.write_bit(index, next);
    Ok(next)
  }

  /// Set every bin in `from..to`.
  pub fn set_range(&mut self, from: usize, to: usize, available: bool) -> Result<()> {
    self.check_range(from, to)?;
    for i in from..to {
      self.write_bit(i, available);
    }
    Ok(())
  }

  /// True iff every bin in `from..to` is set. An empty range is all set.
  pub fn all_set(&self, from: usize, to: usize) -> Result<bool> {
    self.check_range(from, to)?;
    Ok((from..to).all(|i| self.bit(i)))
  }

  /// Number of available bins.
  pub fn cardinality(&self) -> usize {
    self.words.iter().map(|w| w.count_ones() as usize).sum()
  }

  /// Bin states in index order.
  pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
    (0..self.size).map(|i| self.bit(i))
  }

  pub fn to_binary_string(&self) -> String {
    self.iter().map(|b| if b { '1' } else { '0' }).collect()
  }

  /// Decode a `0`/`1` string; its length becomes the mask size.
  pub fn from_binary_string(s: &str) -> Result<Self> {
    let mut mask = Self::new(s.len());
    for (i, c) in s.bytes().enumerate() {
      match c {
        b'1' => mask.write_bit(i, true),
        b'0' => {}
        other => {
          return Err(Error::InvalidTimesheet(format!(
            "unexpected {:?} at position {i} of availability mask",
            char::from(other)
          )));
        }
      }
    }
    Ok(mask)
  }

  fn bit(&self, i: usize) -> bool {
    self.words[i / WORD_BITS] & (1 << (i % WORD_BITS)) != 0
  }

  fn write_bit(&mut self, i: usize, on: bool) {
    let word = &mut self.words[i / WORD_BITS];
    let bit = 1u64 << (i % WORD_BITS);
    if on {
      *word |= bit;
    } else {
      *word &= !bit;
    }
  }

  fn check(&self, index: usize) -> Result<()> {
    if index >= self.size {
      return Err(Error::BinOutOfRange {
        index,
        size: self.size,
      });
    }
    Ok(())
  }

  fn check_range(&self, from: usize, to: usize) -> Result<()> {
    if from > to || to > self.size {
      return Err(Error::InvalidRange {
        from,
        to,
        size: self.size,
      });
    }
    Ok(())
  }
}

impl fmt::Display for AvailabilityMask {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_binary_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_empty() {
    let m = AvailabilityMask::new(336);
    assert_eq!(m.size(), 336);
    assert_eq!(m.cardinality(), 0);
    assert!(!m.get(0).unwrap());
  }

  #[test]
  fn set_and_get_single_bins() {
    let mut m = AvailabilityMask::new(100);
    m.set(0, true).unwrap();
    m.set(63, true).unwrap();
    m.set(64, true).unwrap();
    m.set(99, true).unwrap();
    assert!(m.get(63).unwrap() && m.get(64).unwrap());
    assert_eq!(m.cardinality(), 4);

    m.set(63, false).unwrap();
    assert!(!m.get(63).unwrap());
    assert_eq!(m.cardinality(), 3);
  }

  #[test]
  fn index_bounds_are_checked() {
    let mut m = AvailabilityMask::new(10);
    assert!(matches!(m.get(10), Err(Error::BinOutOfRange { index: 10, size: 10 })));
    assert!(m.set(10, true).is_err());
    assert!(m.toggle(42).is_err());
  }

  #[test]
  fn set_range_is_half_open() {
    let mut m = AvailabilityMask::new(336);
    m.set_range(60, 130, true).unwrap();
    assert_eq!(m.cardinality(), 70);
    assert!(!m.get(59).unwrap());
    assert!(m.get(60).unwrap());
    assert!(m.get(129).unwrap());
    assert!(!m.get(130).unwrap());

    m.set_range(100, 110, false).unwrap();
    assert_eq!(m.cardinality(), 60);
    assert!(m.all_set(60, 100).unwrap());
    assert!(!m.all_set(60, 101).unwrap());
  }

  #[test]
  fn range_bounds_are_checked() {
    let mut m = AvailabilityMask::new(10);
    assert!(matches!(
      m.set_range(5, 11, true),
      Err(Error::InvalidRange { from: 5, to: 11, size: 10 })
    ));
    assert!(m.set_range(6, 5, true).is_err());
    assert!(m.set_range(10, 10, true).is_ok());
    assert!(m.all_set(3, 3).unwrap());
  }

  #[test]
  fn toggle_flips_and_reports() {
    let mut m = AvailabilityMask::new(8);
    assert!(m.toggle(3).unwrap());
    assert!(m.get(3).unwrap());
    assert!(!m.toggle(3).unwrap());
    assert_eq!(m.cardinality(), 0);
  }

  #[test]
  fn binary_string_round_trips() {
    let mut m = AvailabilityMask::new(336);
    m.set_range(0, 3, true).unwrap();
    m.set(200, true).unwrap();
    m.set(335, true).unwrap();

    let text = m.to_binary_string();
    assert_eq!(text.len(), 336);
    assert!(text.starts_with("1110"));
    assert!(text.ends_with('1'));

    let back = AvailabilityMask::from_binary_string(&text).unwrap();
    assert_eq!(back, m);
    assert_eq!(back.to_string(), text);
  }

  #[test]
  fn string_length_defines_size() {
    let m = AvailabilityMask::from_binary_string("0101").unwrap();
    assert_eq!(m.size(), 4);
    assert_eq!(m.iter().collect::<Vec<_>>(), [false, true, false, true]);
    assert_eq!(AvailabilityMask::from_binary_string("").unwrap().size(), 0);
  }

  #[test]
  fn rejects_non_binary_characters() {
    assert!(matches!(
      AvailabilityMask::from_binary_string("01x1"),
      Err(Error::InvalidTimesheet(_))
    ));
  }
}
