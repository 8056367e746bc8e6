pub mod transposition;

use crate::error::CfResult;
use crate::key::{Key, KeySpec};
use fastrand::Rng;

/// Maps every ASCII letter through `code`, preserving case. Everything
/// else passes through untouched.
#[inline(always)]
fn transform(text: &str, code: &[u8; 26]) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                (b'A' + code[(c as u8 - b'A') as usize]) as char
            } else if c.is_ascii_lowercase() {
                (b'a' + code[(c as u8 - b'a') as usize]) as char
            } else {
                c
            }
        })
        .collect()
}

pub fn encrypt(text: &str, key: &Key) -> String {
    transform(text, key.forward())
}

pub fn decrypt(text: &str, key: &Key) -> String {
    transform(text, key.inverse())
}

/// A keyed monoalphabetic substitution. Caesar and random ciphers are
/// just different ways of producing the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionCipher {
    key: Key,
}

impl SubstitutionCipher {
    pub fn new(key: Key) -> Self {
        Self { key }
    }

    pub fn from_spec(spec: &KeySpec, rng: &mut Rng) -> CfResult<Self> {
        Ok(Self::new(spec.to_key(rng)?))
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn encrypt(&self, text: &str) -> String {
        encrypt(text, &self.key)
    }

    pub fn decrypt(&self, text: &str) -> String {
        decrypt(text, &self.key)
    }
}
