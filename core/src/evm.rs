//! secp256k1 keys with Ethereum-style addresses.
//!
//! The private key is rendered as 64 lower-case hex characters. The address is
//! the last 20 bytes of `keccak256(X || Y)` of the uncompressed public key,
//! rendered with the EIP-55 mixed-case checksum.

use std::sync::LazyLock;

use alloy_primitives::{Address, keccak256};
use rand::TryCryptoRng;
use secp256k1::{PublicKey, Secp256k1, SecretKey, SignOnly};

use crate::error::KeygenError;
use crate::types::{KeyEncoder, Keypair, random_seed};

static SECP256K1: LazyLock<Secp256k1<SignOnly>> = LazyLock::new(Secp256k1::signing_only);

/// Redraws allowed when random bytes fall outside the scalar range.
const MAX_SCALAR_ATTEMPTS: usize = 8;

const UNCOMPRESSED_TAG: u8 = 0x04;

pub struct EvmEncoder;

impl KeyEncoder for EvmEncoder {
    fn generate<R>(&self, rng: &mut R) -> Result<Keypair, KeygenError>
    where
        R: TryCryptoRng + ?Sized,
    {
        let secret = random_secret_key(rng)?;
        let address = address_from_secret(&secret)?;

        Ok(Keypair {
            private_key: hex::encode(secret.secret_bytes()),
            public_key: address,
        })
    }
}

fn random_secret_key<R>(rng: &mut R) -> Result<SecretKey, KeygenError>
where
    R: TryCryptoRng + ?Sized,
{
    for _ in 0..MAX_SCALAR_ATTEMPTS {
        let bytes = random_seed(rng)?;
        if let Ok(secret) = SecretKey::from_slice(&bytes) {
            return Ok(secret);
        }
    }

    Err(KeygenError::Generation(format!(
        "no valid secp256k1 scalar after {MAX_SCALAR_ATTEMPTS} attempts"
    )))
}

fn address_from_secret(secret: &SecretKey) -> Result<String, KeygenError> {
    let public = PublicKey::from_secret_key(&*SECP256K1, secret);
    let uncompressed = public.serialize_uncompressed();
    let Some((&UNCOMPRESSED_TAG, coords)) = uncompressed.split_first() else {
        return Err(KeygenError::Encoding(
            "public key is not an uncompressed curve point".to_owned(),
        ));
    };

    let hash = keccak256(coords);
    Ok(Address::from_slice(&hash[12..]).to_checksum(None))
}

/// Re-derives the checksummed address of a hex private key (`0x` is optional).
pub fn address_from_private_key(private_key: &str) -> Result<String, KeygenError> {
    let hex_key = private_key.strip_prefix("0x").unwrap_or(private_key);
    let bytes = hex::decode(hex_key).map_err(KeygenError::encoding)?;
    let secret = SecretKey::from_slice(&bytes).map_err(KeygenError::encoding)?;
    address_from_secret(&secret)
}

/// Renders a raw 20-byte address as an EIP-55 checksummed `0x` string.
pub fn to_checksum_address(address: &[u8; 20]) -> String {
    Address::from(*address).to_checksum(None)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn known_private_key() {
        let key = "0000000000000000000000000000000000000000000000000000000000000001";
        assert_eq!(
            address_from_private_key(key).unwrap(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
        assert_eq!(
            address_from_private_key(&format!("0x{key}")).unwrap(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn eip55_vectors() {
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let raw: [u8; 20] = hex::decode(&expected[2..].to_lowercase())
                .unwrap()
                .try_into()
                .unwrap();
            assert_eq!(to_checksum_address(&raw), expected);
        }
    }

    #[test]
    fn generated_keys_round_trip() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..32 {
            let keypair = EvmEncoder.generate(&mut rng).unwrap();
            assert_eq!(keypair.private_key.len(), 64);
            assert!(keypair.private_key.chars().all(|c| c.is_ascii_hexdigit()));
            assert_eq!(keypair.public_key.len(), 42);
            assert!(keypair.public_key.starts_with("0x"));

            let address = address_from_private_key(&keypair.private_key).unwrap();
            assert_eq!(address, keypair.public_key);
        }
    }

    #[test]
    fn invalid_private_keys() {
        // Zero is not a valid scalar.
        let zero = "00".repeat(32);
        assert!(matches!(
            address_from_private_key(&zero),
            Err(KeygenError::Encoding(_))
        ));
        assert!(matches!(
            address_from_private_key("not hex"),
            Err(KeygenError::Encoding(_))
        ));
        assert!(matches!(
            address_from_private_key("0102"),
            Err(KeygenError::Encoding(_))
        ));
    }
}
