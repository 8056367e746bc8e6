use crate::alphabet::LETTER_COUNT;
use crate::error::{CfResult, CipherForgeError};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A bijection over the 26 letters.
///
/// `forward[i]` is the ciphertext letter that plaintext letter `i`
/// encrypts to; `inverse` is kept in sync so decryption is a lookup.
/// Every constructor validates, so a `Key` is always a permutation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key {
    forward: [u8; LETTER_COUNT],
    inverse: [u8; LETTER_COUNT],
}

impl Key {
    pub fn identity() -> Self {
        let mut forward = [0u8; LETTER_COUNT];
        for (i, slot) in forward.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self {
            forward,
            inverse: forward,
        }
    }

    /// Uniformly random permutation drawn from `rng`.
    pub fn random(rng: &mut Rng) -> Self {
        let mut forward = Self::identity().forward;
        rng.shuffle(&mut forward);
        Self::from_valid(forward)
    }

    /// Caesar shift as a permutation. Shift 0 (and anything outside
    /// `1..=25`) is rejected: it carries no information.
    pub fn caesar(shift: u8) -> CfResult<Self> {
        if !(1..LETTER_COUNT as u8).contains(&shift) {
            return Err(CipherForgeError::MalformedKey(format!(
                "Caesar shift must be in 1..=25, got {}",
                shift
            )));
        }
        let mut forward = [0u8; LETTER_COUNT];
        for (i, slot) in forward.iter_mut().enumerate() {
            *slot = ((i + shift as usize) % LETTER_COUNT) as u8;
        }
        Ok(Self::from_valid(forward))
    }

    /// Parses a 26-letter permutation string such as `"QWERTY..."`.
    pub fn from_permutation(s: &str) -> CfResult<Self> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != LETTER_COUNT {
            return Err(CipherForgeError::MalformedKey(format!(
                "expected {} letters, got {}",
                LETTER_COUNT,
                chars.len()
            )));
        }

        let mut forward = [0u8; LETTER_COUNT];
        for (i, c) in chars.iter().enumerate() {
            if !c.is_ascii_alphabetic() {
                return Err(CipherForgeError::MalformedKey(format!(
                    "'{}' at position {} is not a letter",
                    c, i
                )));
            }
            forward[i] = c.to_ascii_uppercase() as u8 - b'A';
        }
        Self::from_mapping(forward)
    }

    /// Validated construction from letter indices.
    pub fn from_mapping(forward: [u8; LETTER_COUNT]) -> CfResult<Self> {
        let mut seen = [false; LETTER_COUNT];
        for &image in &forward {
            let idx = image as usize;
            if idx >= LETTER_COUNT {
                return Err(CipherForgeError::MalformedKey(format!(
                    "letter index {} out of range",
                    image
                )));
            }
            if seen[idx] {
                return Err(CipherForgeError::MalformedKey(format!(
                    "duplicate symbol '{}'",
                    (b'A' + image) as char
                )));
            }
            seen[idx] = true;
        }
        Ok(Self::from_valid(forward))
    }

    fn from_valid(forward: [u8; LETTER_COUNT]) -> Self {
        let mut inverse = [0u8; LETTER_COUNT];
        for (plain, &cipher) in forward.iter().enumerate() {
            inverse[cipher as usize] = plain as u8;
        }
        Self { forward, inverse }
    }

    /// New key with positions `i` and `j` exchanged. `i == j` returns an
    /// identical key.
    pub fn swap(&self, i: usize, j: usize) -> Self {
        let mut next = *self;
        next.swap_in_place(i, j);
        next
    }

    #[inline(always)]
    pub(crate) fn swap_in_place(&mut self, i: usize, j: usize) {
        self.forward.swap(i, j);
        self.inverse[self.forward[i] as usize] = i as u8;
        self.inverse[self.forward[j] as usize] = j as u8;
    }

    /// Ciphertext letter index for plaintext letter index `plain`.
    #[inline(always)]
    pub fn image(&self, plain: u8) -> u8 {
        self.forward[plain as usize]
    }

    /// Plaintext letter index for ciphertext letter index `cipher`.
    #[inline(always)]
    pub fn preimage(&self, cipher: u8) -> u8 {
        self.inverse[cipher as usize]
    }

    pub fn forward(&self) -> &[u8; LETTER_COUNT] {
        &self.forward
    }

    pub fn inverse(&self) -> &[u8; LETTER_COUNT] {
        &self.inverse
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.forward {
            write!(f, "{}", (b'A' + c) as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self)
    }
}

impl FromStr for Key {
    type Err = CipherForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_permutation(s)
    }
}

impl TryFrom<String> for Key {
    type Error = CipherForgeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_permutation(&value)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// User-facing key input.
///
/// One or two digits select a Caesar shift, 26 characters a permutation,
/// and an empty string asks for a random key. Anything else is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySpec {
    Shift(u8),
    Permutation(Key),
    Random,
}

impl KeySpec {
    pub fn to_key(&self, rng: &mut Rng) -> CfResult<Key> {
        match self {
            KeySpec::Shift(s) => Key::caesar(*s),
            KeySpec::Permutation(k) => Ok(*k),
            KeySpec::Random => Ok(Key::random(rng)),
        }
    }
}

impl FromStr for KeySpec {
    type Err = CipherForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.len() {
            0 => Ok(KeySpec::Random),
            1 | 2 => {
                let shift: u8 = s.parse().map_err(|_| {
                    CipherForgeError::MalformedKey(format!("'{}' is not a shift", s))
                })?;
                Key::caesar(shift)?;
                Ok(KeySpec::Shift(shift))
            }
            _ => Ok(KeySpec::Permutation(Key::from_permutation(s)?)),
        }
    }
}
