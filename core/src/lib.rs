pub use self::batch::{generate_batch, generate_batch_par};
pub use self::document::KeysDocument;
pub use self::error::{KeygenError, ValidationError};
pub use self::types::{KeyEncoder, KeyType, Keypair};

pub mod batch;
pub mod document;
pub mod error;
pub mod evm;
pub mod solana;
pub mod sui;

mod types;
