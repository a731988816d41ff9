//! ed25519 keys in the Sui encodings.
//!
//! Private keys are bech32 strings with the `suiprivkey` HRP over
//! `flag || seed`. Addresses are `0x` followed by the hex of
//! `blake2b256(flag || public key)`.

use bech32::{FromBase32, ToBase32, Variant};
use blake2::Blake2b;
use blake2::digest::Digest;
use blake2::digest::consts::U32;
use ed25519_dalek::SigningKey;
use rand::TryCryptoRng;

use crate::error::{KeygenError, ValidationError};
use crate::types::{KeyEncoder, Keypair, random_seed};

pub const PRIVATE_KEY_PREFIX: &str = "suiprivkey";
pub const ED25519_FLAG: u8 = 0x00;

pub const SEED_LENGTH: usize = 32;
/// Flag byte plus seed.
pub const PAYLOAD_LENGTH: usize = 1 + SEED_LENGTH;
/// `0x` plus 64 hex characters.
pub const ADDRESS_LENGTH: usize = 2 + 64;

type Blake2b256 = Blake2b<U32>;

pub struct SuiEncoder;

impl KeyEncoder for SuiEncoder {
    fn generate<R>(&self, rng: &mut R) -> Result<Keypair, KeygenError>
    where
        R: TryCryptoRng + ?Sized,
    {
        let seed = random_seed(rng)?;

        Ok(Keypair {
            private_key: encode_private_key(ED25519_FLAG, &seed)?,
            public_key: address_from_seed(ED25519_FLAG, &seed),
        })
    }

    fn validate(&self, keypair: &Keypair) -> Result<(), KeygenError> {
        validate_private_key(&keypair.private_key).map_err(Into::into)
    }
}

/// Encodes `flag || seed` as a `suiprivkey` bech32 string.
pub fn encode_private_key(flag: u8, seed: &[u8]) -> Result<String, KeygenError> {
    if seed.len() != SEED_LENGTH {
        return Err(KeygenError::Encoding(format!(
            "invalid seed length: got {}, want {SEED_LENGTH}",
            seed.len()
        )));
    }

    let mut payload = Vec::with_capacity(PAYLOAD_LENGTH);
    payload.push(flag);
    payload.extend_from_slice(seed);

    bech32::encode(PRIVATE_KEY_PREFIX, payload.to_base32(), Variant::Bech32)
        .map_err(KeygenError::encoding)
}

pub fn address_from_seed(flag: u8, seed: &[u8; SEED_LENGTH]) -> String {
    let public = SigningKey::from_bytes(seed).verifying_key();

    let mut hasher = Blake2b256::new();
    hasher.update([flag]);
    hasher.update(public.as_bytes());
    let hash = hasher.finalize();

    format!("0x{}", hex::encode(hash))
}

/// Checks that a private key string decodes back into a flag and a seed.
pub fn validate_private_key(private_key: &str) -> Result<(), ValidationError> {
    decode_private_key(private_key).map(|_| ())
}

/// Decodes a `suiprivkey` string into its scheme flag and seed.
pub fn decode_private_key(private_key: &str) -> Result<(u8, [u8; SEED_LENGTH]), ValidationError> {
    let (hrp, data, variant) =
        bech32::decode(private_key).map_err(ValidationError::Bech32Decode)?;

    if variant != Variant::Bech32 {
        return Err(ValidationError::UnexpectedVariant(variant));
    }

    if hrp != PRIVATE_KEY_PREFIX {
        return Err(ValidationError::UnexpectedHrp {
            got: hrp,
            want: PRIVATE_KEY_PREFIX,
        });
    }

    let payload = Vec::<u8>::from_base32(&data).map_err(ValidationError::BitConversion)?;
    if payload.len() != PAYLOAD_LENGTH {
        return Err(ValidationError::InvalidKeyLength { got: payload.len() });
    }

    let (flag, seed) = (payload[0], &payload[1..]);
    let seed: [u8; SEED_LENGTH] = seed
        .try_into()
        .map_err(|_e| ValidationError::InvalidSeedLength { got: seed.len() })?;

    Ok((flag, seed))
}

/// Re-derives the address of a `suiprivkey` string.
pub fn address_from_private_key(private_key: &str) -> Result<String, KeygenError> {
    let (flag, seed) = decode_private_key(private_key)?;
    Ok(address_from_seed(flag, &seed))
}
