//! ed25519 keys in the Solana keypair format.
//!
//! The private key is the base58 of the 64-byte `seed || public key` secret,
//! the address is the base58 of the 32-byte public key.

use ed25519_dalek::SigningKey;
use rand::TryCryptoRng;

use crate::error::KeygenError;
use crate::types::{KeyEncoder, Keypair, random_seed};

pub struct SolanaEncoder;

impl KeyEncoder for SolanaEncoder {
    fn generate<R>(&self, rng: &mut R) -> Result<Keypair, KeygenError>
    where
        R: TryCryptoRng + ?Sized,
    {
        let signing_key = SigningKey::from_bytes(&random_seed(rng)?);
        let public = signing_key.verifying_key();

        Ok(Keypair {
            private_key: bs58::encode(signing_key.to_keypair_bytes()).into_string(),
            public_key: bs58::encode(public.as_bytes()).into_string(),
        })
    }
}

/// Decodes a base58 64-byte secret and returns its base58 public key.
///
/// Fails if the public half does not belong to the seed half.
pub fn public_key_from_private_key(private_key: &str) -> Result<String, KeygenError> {
    let bytes = bs58::decode(private_key)
        .into_vec()
        .map_err(KeygenError::encoding)?;
    let bytes: [u8; 64] = bytes.try_into().map_err(|bytes: Vec<u8>| {
        KeygenError::Encoding(format!(
            "invalid secret key length: got {}, want 64",
            bytes.len()
        ))
    })?;

    let signing_key = SigningKey::from_keypair_bytes(&bytes).map_err(KeygenError::encoding)?;
    Ok(bs58::encode(signing_key.verifying_key().as_bytes()).into_string())
}
