use std::fmt;
use std::str::FromStr;

use rand::TryCryptoRng;
use serde::{Deserialize, Serialize};

use crate::error::KeygenError;
use crate::evm::EvmEncoder;
use crate::solana::SolanaEncoder;
use crate::sui::SuiEncoder;

/// Supported key families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Evm,
    Solana,
    Sui,
}

impl KeyType {
    pub const ALL: [Self; 3] = [Self::Evm, Self::Solana, Self::Sui];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Evm => "evm",
            Self::Solana => "solana",
            Self::Sui => "sui",
        }
    }
}

impl KeyEncoder for KeyType {
    fn generate<R>(&self, rng: &mut R) -> Result<Keypair, KeygenError>
    where
        R: TryCryptoRng + ?Sized,
    {
        match self {
            Self::Evm => EvmEncoder.generate(rng),
            Self::Solana => SolanaEncoder.generate(rng),
            Self::Sui => SuiEncoder.generate(rng),
        }
    }

    fn validate(&self, keypair: &Keypair) -> Result<(), KeygenError> {
        match self {
            Self::Evm => EvmEncoder.validate(keypair),
            Self::Solana => SolanaEncoder.validate(keypair),
            Self::Sui => SuiEncoder.validate(keypair),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = KeygenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "evm" => Ok(Self::Evm),
            "solana" => Ok(Self::Solana),
            "sui" => Ok(Self::Sui),
            _ => Err(KeygenError::Input(format!(
                "key type must be 'evm', 'solana', or 'sui', got '{s}'"
            ))),
        }
    }
}

/// Encoded private key and the address derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypair {
    pub private_key: String,
    pub public_key: String,
}

/// A chain-specific way to turn fresh entropy into a [`Keypair`].
pub trait KeyEncoder {
    fn generate<R>(&self, rng: &mut R) -> Result<Keypair, KeygenError>
    where
        R: TryCryptoRng + ?Sized;

    /// Checks an already generated keypair before it is handed out.
    fn validate(&self, keypair: &Keypair) -> Result<(), KeygenError> {
        _ = keypair;
        Ok(())
    }
}

pub(crate) fn random_seed<R>(rng: &mut R) -> Result<[u8; 32], KeygenError>
where
    R: TryCryptoRng + ?Sized,
{
    let mut seed = [0u8; 32];
    rng.try_fill_bytes(&mut seed).map_err(KeygenError::generation)?;
    Ok(seed)
}
