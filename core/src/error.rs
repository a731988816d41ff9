use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum KeygenError {
    #[error("invalid input: {0}")]
    Input(String),
    #[error("failed to generate key material: {0}")]
    Generation(String),
    #[error("failed to encode key: {0}")]
    Encoding(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to write {}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to generate keypair {index}")]
    Keypair {
        index: usize,
        #[source]
        source: Box<KeygenError>,
    },
}

impl KeygenError {
    pub(crate) fn generation(err: impl std::fmt::Display) -> Self {
        Self::Generation(err.to_string())
    }

    pub(crate) fn encoding(err: impl std::fmt::Display) -> Self {
        Self::Encoding(err.to_string())
    }

    pub(crate) fn at_keypair(self, index: usize) -> Self {
        Self::Keypair {
            index,
            source: Box::new(self),
        }
    }

    /// Strips the keypair index wrapper, if any.
    pub fn root(&self) -> &Self {
        match self {
            Self::Keypair { source, .. } => source.root(),
            err => err,
        }
    }
}

/// Sui private key round-trip failure.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("failed to decode bech32")]
    Bech32Decode(#[source] bech32::Error),
    #[error("unexpected bech32 variant: {0:?}")]
    UnexpectedVariant(bech32::Variant),
    #[error("unexpected HRP: got {got}, want {want}")]
    UnexpectedHrp { got: String, want: &'static str },
    #[error("failed to convert bits")]
    BitConversion(#[source] bech32::Error),
    #[error("invalid key length: got {got}, want 33")]
    InvalidKeyLength { got: usize },
    #[error("invalid seed length: got {got}, want 32")]
    InvalidSeedLength { got: usize },
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn each_cause_is_reported_once() {
        let err = KeygenError::from(ValidationError::Bech32Decode(
            bech32::Error::InvalidChecksum,
        ))
        .at_keypair(2);

        let mut messages = vec![err.to_string()];
        let mut source = err.source();
        while let Some(cause) = source {
            messages.push(cause.to_string());
            source = cause.source();
        }

        assert_eq!(messages.len(), 3, "{messages:?}");
        assert_eq!(messages[0], "failed to generate keypair 2");
        assert_eq!(messages[1], "failed to decode bech32");
        assert_eq!(messages[2], bech32::Error::InvalidChecksum.to_string());
    }
}
