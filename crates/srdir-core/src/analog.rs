//! Analog sample encodings and conversion to `f32`.
//!
//! Acquisition drivers deliver analog samples in whatever representation the
//! hardware produces (12-bit ADC counts in 16-bit words, big-endian doubles,
//! ...). [`AnalogEncoding`] describes that representation and
//! [`AnalogEncoding::to_float`] turns a raw byte block into plain `f32`
//! values, applying `value * scale + offset`.

use crate::error::{SrdirError, SrdirResult};
use serde::{Deserialize, Serialize};

/// Exact rational number, used for scale and offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rational {
    /// Numerator.
    pub p: i64,
    /// Denominator, never zero in a valid encoding.
    pub q: u64,
}

impl Rational {
    /// `p / q`.
    pub const fn new(p: i64, q: u64) -> Self {
        Self { p, q }
    }

    /// The neutral scale factor.
    pub const ONE: Rational = Rational::new(1, 1);

    /// The neutral offset.
    pub const ZERO: Rational = Rational::new(0, 1);

    fn is_one(&self) -> bool {
        self.q != 0 && self.p >= 0 && self.p as u64 == self.q
    }

    fn is_zero(&self) -> bool {
        self.p == 0
    }

    fn as_f64(&self) -> f64 {
        self.p as f64 / self.q as f64
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ONE
    }
}

/// Byte-level representation of one analog sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalogEncoding {
    /// Bytes per sample (1, 2, 4 or 8).
    pub unitsize: usize,
    /// Integer samples are two's complement signed.
    pub is_signed: bool,
    /// Samples are IEEE 754 floats (`unitsize` 4 or 8).
    pub is_float: bool,
    /// Samples are stored most significant byte first.
    pub is_bigendian: bool,
    /// Multiplier applied to every decoded value.
    pub scale: Rational,
    /// Added to every scaled value.
    pub offset: Rational,
}

impl AnalogEncoding {
    /// Native little-endian `f32`, no scaling.
    pub const fn f32_le() -> Self {
        Self {
            unitsize: 4,
            is_signed: true,
            is_float: true,
            is_bigendian: false,
            scale: Rational::ONE,
            offset: Rational::ZERO,
        }
    }

    /// Integer ADC counts of `unitsize` bytes, little-endian.
    pub const fn integer(unitsize: usize, is_signed: bool) -> Self {
        Self {
            unitsize,
            is_signed,
            is_float: false,
            is_bigendian: false,
            scale: Rational::ONE,
            offset: Rational::ZERO,
        }
    }

    /// Set the scale factor.
    pub fn with_scale(mut self, scale: Rational) -> Self {
        self.scale = scale;
        self
    }

    /// Set the offset.
    pub fn with_offset(mut self, offset: Rational) -> Self {
        self.offset = offset;
        self
    }

    /// Set the byte order.
    pub fn with_bigendian(mut self, is_bigendian: bool) -> Self {
        self.is_bigendian = is_bigendian;
        self
    }

    /// Check that the encoding describes a representable sample type.
    pub fn validate(&self) -> SrdirResult<()> {
        let supported = if self.is_float {
            matches!(self.unitsize, 4 | 8)
        } else {
            matches!(self.unitsize, 1 | 2 | 4 | 8)
        };
        if !supported {
            return Err(SrdirError::Argument(format!(
                "unsupported analog encoding: {}-byte {}",
                self.unitsize,
                if self.is_float { "float" } else { "integer" }
            )));
        }
        if self.scale.q == 0 || self.offset.q == 0 {
            return Err(SrdirError::Argument(
                "analog encoding has a zero denominator".into(),
            ));
        }
        Ok(())
    }

    /// Decode `num_samples` values from `data`.
    ///
    /// Extra trailing bytes are ignored; a block shorter than
    /// `num_samples * unitsize` is rejected.
    pub fn to_float(&self, data: &[u8], num_samples: usize) -> SrdirResult<Vec<f32>> {
        self.validate()?;

        let needed = num_samples
            .checked_mul(self.unitsize)
            .ok_or_else(|| SrdirError::Argument("analog sample count overflows".into()))?;
        if data.len() < needed {
            return Err(SrdirError::Argument(format!(
                "analog block holds {} bytes, {} samples of {} bytes need {}",
                data.len(),
                num_samples,
                self.unitsize,
                needed
            )));
        }

        let apply_scale = !self.scale.is_one();
        let apply_offset = !self.offset.is_zero();
        let scale = self.scale.as_f64();
        let offset = self.offset.as_f64();

        let values = data[..needed]
            .chunks_exact(self.unitsize)
            .map(|raw| {
                let mut value = self.decode(raw);
                if apply_scale {
                    value *= scale;
                }
                if apply_offset {
                    value += offset;
                }
                value as f32
            })
            .collect();

        Ok(values)
    }

    fn decode(&self, raw: &[u8]) -> f64 {
        let mut buf = [0u8; 8];
        buf[..raw.len()].copy_from_slice(raw);
        if self.is_bigendian {
            buf[..raw.len()].reverse();
        }

        if self.is_float {
            return match self.unitsize {
                4 => f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as f64,
                _ => f64::from_le_bytes(buf),
            };
        }

        let unsigned = u64::from_le_bytes(buf);
        if !self.is_signed {
            return unsigned as f64;
        }
        // Sign-extend from the sample width.
        let shift = 64 - self.unitsize * 8;
        ((unsigned << shift) as i64 >> shift) as f64
    }
}

impl Default for AnalogEncoding {
    fn default() -> Self {
        Self::f32_le()
    }
}
