//! Core chain types for kiln.
//!
//! This module defines the fundamental values shared across all layers:
//! account/contract addresses, transaction hashes, chain identifiers, wei
//! amounts, and the gas policy used by network profiles.

use serde::de::{self, Deserialize, Deserializer, Visitor};

/// A 20-byte account or contract address.
///
/// Displayed as `0x`-prefixed lowercase hex. Addresses are derived
/// deterministically (see `kiln-chain`) so two nodes started from the same
/// genesis expose identical account lists.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

/// A 32-byte transaction hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; 32]);

impl TxHash {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

/// Numeric identifier distinguishing one chain from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
pub struct ChainId(pub u64);

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount in wei, the smallest unit of the chain's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Wei(pub u128);

impl std::fmt::Display for Wei {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wei", self.0)
    }
}

/// Gas price/limit policy for a network profile.
///
/// Deserializes from the literal string `"auto"` or from a numeric wei
/// value, so `gas = "auto"` and `gas_price = 84000000100` both parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GasPolicy {
    /// Let the backend estimate.
    #[default]
    Auto,
    /// Fixed value in wei.
    Fixed(Wei),
}

impl<'de> Deserialize<'de> for GasPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GasPolicyVisitor;

        impl Visitor<'_> for GasPolicyVisitor {
            type Value = GasPolicy;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("\"auto\" or a non-negative gas value in wei")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                if v.eq_ignore_ascii_case("auto") {
                    Ok(GasPolicy::Auto)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(GasPolicy::Fixed(Wei(u128::from(v))))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                if v < 0 {
                    return Err(E::invalid_value(de::Unexpected::Signed(v), &self));
                }
                Ok(GasPolicy::Fixed(Wei(v as u128)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                // Scientific notation is fine, fractional wei is not.
                if !v.is_finite() || v < 0.0 || v.trunc() != v || v > u128::MAX as f64 {
                    return Err(E::invalid_value(de::Unexpected::Float(v), &self));
                }
                Ok(GasPolicy::Fixed(Wei(v as u128)))
            }
        }

        deserializer.deserialize_any(GasPolicyVisitor)
    }
}

impl std::fmt::Display for GasPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GasPolicy::Auto => write!(f, "auto"),
            GasPolicy::Fixed(wei) => write!(f, "{wei}"),
        }
    }
}
