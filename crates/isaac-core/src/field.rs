//! Signed fixed-point reals packed into field elements
//!
//! The ledger stores every coordinate as an element of the prime field, scaled
//! by `10^20`. Negative values wrap around the prime, so anything above
//! `(PRIME - 1) / 2` is read back as `raw - PRIME`. All arithmetic here stays in
//! big integers; floats only appear in [`SignedReal::to_f64`].

use crate::constants::{half_prime, prime, scale, SCALE_DIGITS, SCALE_F64};
use crate::error::{DecodeError, DecodeResult};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Residue in `[0, PRIME)`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// Wrap a residue, rejecting anything at or above the prime
    pub fn new(value: BigUint) -> DecodeResult<Self> {
        if &value >= prime() {
            return Err(DecodeError::felt(value.to_string(), "not below the field prime"));
        }
        Ok(Self(value))
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

/// Parses decimal digits or a `0x` hex literal
impl FromStr for FieldElement {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            Some(hex) => (hex, 16),
            None => (text, 10),
        };

        if digits.is_empty() {
            return Err(DecodeError::felt(s, "empty"));
        }
        if !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(DecodeError::felt(s, "not a non-negative integer"));
        }

        let value = BigUint::parse_bytes(digits.as_bytes(), radix)
            .ok_or_else(|| DecodeError::felt(s, "unparseable digits"))?;
        Self::new(value)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exact real `scaled / 10^20`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignedReal {
    scaled: BigInt,
}

impl SignedReal {
    pub fn from_scaled(scaled: BigInt) -> Self {
        Self { scaled }
    }

    pub fn zero() -> Self {
        Self { scaled: BigInt::zero() }
    }

    pub fn from_integer(value: i64) -> Self {
        Self { scaled: BigInt::from(value) * BigInt::from(scale().clone()) }
    }

    /// Numerator over `10^20`
    pub fn scaled(&self) -> &BigInt {
        &self.scaled
    }

    pub fn is_zero(&self) -> bool {
        self.scaled.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.scaled.sign() == Sign::Minus
    }

    /// Nearest `f64`. Integer and fractional parts are converted separately so
    /// the fraction keeps its digits even when the integer part is large.
    pub fn to_f64(&self) -> f64 {
        let scale = BigInt::from(scale().clone());
        let whole = &self.scaled / &scale;
        let frac = &self.scaled % &scale;

        let whole = whole.to_f64().unwrap_or(f64::NAN);
        let frac = frac.to_f64().unwrap_or(0.0) / SCALE_F64;
        whole + frac
    }

    /// Leading `width` characters of the exact decimal form
    pub fn truncated(&self, width: usize) -> String {
        self.to_string().chars().take(width).collect()
    }
}

impl fmt::Display for SignedReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.scaled.magnitude();
        let whole = magnitude / scale();
        let frac = magnitude % scale();

        if self.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{}", whole)?;

        if !frac.is_zero() {
            let digits = format!("{:0>width$}", frac.to_string(), width = SCALE_DIGITS as usize);
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

/// Parses plain decimal notation with at most 20 fractional digits
impl FromStr for SignedReal {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, frac) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(DecodeError::real(s, "empty"));
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(DecodeError::real(s, "not a plain decimal"));
        }
        if frac.len() > SCALE_DIGITS as usize {
            return Err(DecodeError::real(s, "more than 20 fractional digits"));
        }

        let padded = format!("{}{:0<width$}", whole, frac, width = SCALE_DIGITS as usize);
        let magnitude = BigUint::parse_bytes(padded.as_bytes(), 10)
            .ok_or_else(|| DecodeError::real(s, "unparseable digits"))?;

        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Ok(Self { scaled: BigInt::from_biguint(sign, magnitude) })
    }
}

impl Serialize for SignedReal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Sub for &SignedReal {
    type Output = SignedReal;

    fn sub(self, rhs: &SignedReal) -> SignedReal {
        SignedReal { scaled: &self.scaled - &rhs.scaled }
    }
}

impl Sub for SignedReal {
    type Output = SignedReal;

    fn sub(self, rhs: SignedReal) -> SignedReal {
        SignedReal { scaled: self.scaled - rhs.scaled }
    }
}

impl Add for &SignedReal {
    type Output = SignedReal;

    fn add(self, rhs: &SignedReal) -> SignedReal {
        SignedReal { scaled: &self.scaled + &rhs.scaled }
    }
}

impl Add for SignedReal {
    type Output = SignedReal;

    fn add(self, rhs: SignedReal) -> SignedReal {
        SignedReal { scaled: self.scaled + rhs.scaled }
    }
}

/// Recover the signed real behind a residue.
///
/// `raw > HALF` is a wrapped negative. `raw == HALF` stays positive.
pub fn decode(raw: &FieldElement) -> SignedReal {
    let value = BigInt::from(raw.as_biguint().clone());

    let signed = if raw.as_biguint() > half_prime() {
        value - BigInt::from(prime().clone())
    } else {
        value
    };

    SignedReal::from_scaled(signed)
}

/// Parse then decode, for feeds that carry residues as text
pub fn decode_str(raw: &str) -> DecodeResult<SignedReal> {
    Ok(decode(&raw.parse::<FieldElement>()?))
}

/// Inverse of [`decode`]. Fails for reals outside `[-HALF, HALF] / 10^20`.
pub fn encode(real: &SignedReal) -> DecodeResult<FieldElement> {
    let half = half_prime();

    match real.scaled().to_biguint() {
        Some(non_negative) => {
            if &non_negative > half {
                return Err(DecodeError::felt(real.to_string(), "above the positive range"));
            }
            Ok(FieldElement(non_negative))
        }
        None => {
            let magnitude = real.scaled().magnitude();
            if magnitude > half {
                return Err(DecodeError::felt(real.to_string(), "below the negative range"));
            }
            Ok(FieldElement(prime() - magnitude))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn test_zero_decodes_to_zero() {
        let real = decode(&FieldElement::from_u64(0));
        assert!(real.is_zero());
        assert_eq!(real.to_string(), "0");
    }

    #[test]
    fn test_prime_minus_one_is_smallest_negative() {
        let raw = FieldElement::new(prime() - BigUint::one()).unwrap();
        let real = decode(&raw);

        assert!(real.is_negative());
        assert_eq!(real.scaled(), &BigInt::from(-1));
        assert_eq!(real.to_string(), "-0.00000000000000000001");
    }

    #[test]
    fn test_half_prime_is_not_wrapped() {
        let raw = FieldElement::new(half_prime().clone()).unwrap();
        let real = decode(&raw);

        assert!(!real.is_negative());
        assert_eq!(real.scaled(), &BigInt::from(half_prime().clone()));
    }

    #[test]
    fn test_half_prime_plus_one_is_wrapped() {
        let raw = FieldElement::new(half_prime() + BigUint::one()).unwrap();
        let real = decode(&raw);

        assert!(real.is_negative());
        assert_eq!(real.scaled(), &-BigInt::from(half_prime().clone()));
    }

    #[test]
    fn test_prime_is_rejected() {
        assert!(matches!(
            FieldElement::new(prime().clone()),
            Err(DecodeError::MalformedFieldElement { .. })
        ));

        let text = prime().to_string();
        assert!(text.parse::<FieldElement>().is_err());
    }

    #[test]
    fn test_non_integral_text_is_rejected() {
        for bad in ["", "1.5", "-3", "12abc", "1e20", "0x"] {
            assert!(bad.parse::<FieldElement>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_hex_and_decimal_agree() {
        let dec: FieldElement = "100000000000000000000".parse().unwrap();
        let hex: FieldElement = "0x56bc75e2d63100000".parse().unwrap();
        assert_eq!(dec, hex);
        assert_eq!(decode(&dec), SignedReal::from_integer(1));
    }

    #[test]
    fn test_negative_one_round_trip() {
        let minus_one = SignedReal::from_integer(-1);
        let raw = encode(&minus_one).unwrap();

        assert_eq!(raw.as_biguint(), &(prime() - scale()));
        assert_eq!(decode(&raw), minus_one);
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        let too_big = SignedReal::from_scaled(BigInt::from(half_prime().clone()) + 1);
        let too_small = SignedReal::from_scaled(-BigInt::from(half_prime().clone()) - 1);

        assert!(encode(&too_big).is_err());
        assert!(encode(&too_small).is_err());
    }

    #[test]
    fn test_decimal_parse_and_display() {
        let real: SignedReal = "-12.5".parse().unwrap();
        assert_eq!(real.to_string(), "-12.5");
        assert!((real.to_f64() + 12.5).abs() < 1e-12);

        let tiny: SignedReal = "0.00000000000000000001".parse().unwrap();
        assert_eq!(tiny.scaled(), &BigInt::from(1));

        assert!("0.000000000000000000001".parse::<SignedReal>().is_err());
        assert!("1,5".parse::<SignedReal>().is_err());
    }

    #[test]
    fn test_truncated_label() {
        let real: SignedReal = "-1.234567891".parse().unwrap();
        assert_eq!(real.truncated(6), "-1.234");
    }

    #[test]
    fn test_exact_subtraction() {
        let a: SignedReal = "0.30000000000000000001".parse().unwrap();
        let b: SignedReal = "0.1".parse().unwrap();
        let c: SignedReal = "0.2".parse().unwrap();

        assert_eq!(&(&a - &b) - &c, SignedReal::from_scaled(BigInt::from(1)));
        assert_eq!(&b + &c, "0.3".parse::<SignedReal>().unwrap());
    }
}
