//! CNPJ (Brazilian company tax identifier) checksum validation.
//!
//! A CNPJ has 12 base digits followed by two mod-11 check digits. Input may carry the usual
//! `00.000.000/0000-00` punctuation; everything that is not an ASCII digit is ignored.

use crate::error::{Error, Result};

pub const LEN: usize = 14;

const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Returns `true` when `raw` is a well-formed CNPJ.
///
/// Total: malformed input of any kind yields `false`, never a panic.
pub fn validate(raw: &str) -> bool {
    let Ok(digits) = <[u8; LEN]>::try_from(digits(raw).as_slice()) else {
        return false;
    };
    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }
    let Ok(base) = <[u8; 12]>::try_from(&digits[..12]) else {
        return false;
    };
    let (d1, d2) = check_digits(&base);
    digits[12] == d1 && digits[13] == d2
}

/// Extracts the ASCII digits of `raw` as numeric values (`'7'` → `7`).
pub fn digits(raw: &str) -> Vec<u8> {
    raw.bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

/// Computes both check digits for a 12-digit CNPJ base.
pub fn check_digits(base: &[u8; 12]) -> (u8, u8) {
    let d1 = check_digit(base, &FIRST_WEIGHTS);
    let mut with_first = [0u8; 13];
    with_first[..12].copy_from_slice(base);
    with_first[12] = d1;
    let d2 = check_digit(&with_first, &SECOND_WEIGHTS);
    (d1, d2)
}

fn check_digit(digits: &[u8], weights: &[u32]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(d, w)| u32::from(*d) * w)
        .sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        // 11 - remainder is in 2..=9 here.
        (11 - remainder) as u8
    }
}

/// Normalizes an identifier the way the prediction service expects it: trimmed and uppercased.
///
/// The service accepts both numeric CNPJs and synthetic ids such as `CNPJ_00004`, so no
/// punctuation is stripped here.
pub fn request_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Applies the `00.000.000/0000-00` mask to a valid CNPJ.
pub fn format(raw: &str) -> Option<String> {
    Cnpj::parse(raw).ok().map(|c| c.to_string())
}

/// A validated CNPJ, stored as its 14 digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cnpj([u8; LEN]);

impl Cnpj {
    pub fn parse(raw: &str) -> Result<Self> {
        if !validate(raw) {
            return Err(Error::InvalidIdentifier {
                raw: raw.to_string(),
            });
        }
        let digits = <[u8; LEN]>::try_from(digits(raw).as_slice()).map_err(|_| {
            Error::InvalidIdentifier {
                raw: raw.to_string(),
            }
        })?;
        Ok(Self(digits))
    }

    /// The bare 14-digit form (`11222333000181`).
    pub fn digits(&self) -> String {
        self.0.iter().map(|d| char::from(b'0' + d)).collect()
    }
}

impl std::fmt::Display for Cnpj {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = self.digits();
        write!(
            f,
            "{}.{}.{}/{}-{}",
            &d[0..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..14]
        )
    }
}

impl std::str::FromStr for Cnpj {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
