use rand::TryCryptoRng;
use rand::rngs::OsRng;
use rayon::prelude::*;

use crate::error::KeygenError;
use crate::types::{KeyEncoder, KeyType, Keypair};

/// Generates `count` keypairs one after another from the given source.
///
/// The whole batch fails on the first encoder or validation error, the error
/// carries the 1-based position of the failed keypair.
pub fn generate_batch<R>(
    key_type: KeyType,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Keypair>, KeygenError>
where
    R: TryCryptoRng + ?Sized,
{
    check_count(count)?;
    tracing::debug!(%key_type, count, "generating keypairs");

    generate_with(&key_type, count, rng)
}

/// Same as [`generate_batch`] but spreads the work over the rayon pool.
///
/// Every keypair draws from the OS random source, the result keeps the
/// request order. When several keypairs fail, the error reports the lowest
/// position, same as the sequential driver.
pub fn generate_batch_par(key_type: KeyType, count: usize) -> Result<Vec<Keypair>, KeygenError> {
    check_count(count)?;
    tracing::debug!(%key_type, count, "generating keypairs in parallel");

    generate_par_with(&key_type, count, |_| OsRng)
}

fn generate_with<E, R>(
    encoder: &E,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Keypair>, KeygenError>
where
    E: KeyEncoder,
    R: TryCryptoRng + ?Sized,
{
    (1..=count)
        .map(|index| generate_one(encoder, &mut *rng).map_err(|e| e.at_keypair(index)))
        .collect()
}

fn generate_par_with<E, R, F>(
    encoder: &E,
    count: usize,
    make_rng: F,
) -> Result<Vec<Keypair>, KeygenError>
where
    E: KeyEncoder + Sync,
    R: TryCryptoRng,
    F: Fn(usize) -> R + Sync,
{
    let results = (1..=count)
        .into_par_iter()
        .map(|index| {
            let mut rng = make_rng(index);
            generate_one(encoder, &mut rng).map_err(|e| e.at_keypair(index))
        })
        .collect::<Vec<_>>();

    // Sequential collect picks the first failure in request order.
    results.into_iter().collect()
}

fn generate_one<E, R>(encoder: &E, rng: &mut R) -> Result<Keypair, KeygenError>
where
    E: KeyEncoder,
    R: TryCryptoRng + ?Sized,
{
    let keypair = encoder.generate(rng)?;
    encoder.validate(&keypair)?;
    Ok(keypair)
}

fn check_count(count: usize) -> Result<(), KeygenError> {
    if count == 0 {
        return Err(KeygenError::Input("count must be greater than 0".to_owned()));
    }
    Ok(())
}
