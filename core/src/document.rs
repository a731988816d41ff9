use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::KeygenError;
use crate::types::{KeyType, Keypair};

/// Output file contents.
///
/// `private_keys[i]` and `public_keys[i]` always come from the same keypair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysDocument {
    pub key_type: KeyType,
    pub count: usize,
    #[serde(with = "rfc3339")]
    pub timestamp: SystemTime,
    pub private_keys: Vec<String>,
    pub public_keys: Vec<String>,
}

impl KeysDocument {
    pub fn new(key_type: KeyType, timestamp: SystemTime, keypairs: Vec<Keypair>) -> Self {
        let (private_keys, public_keys): (Vec<_>, Vec<_>) = keypairs
            .into_iter()
            .map(|k| (k.private_key, k.public_key))
            .unzip();

        Self {
            key_type,
            count: private_keys.len(),
            timestamp: truncate_to_seconds(timestamp),
            private_keys,
            public_keys,
        }
    }

    /// `<type>_keys_<YYYYMMDD>_<HHMMSS>.json` in UTC.
    pub fn file_name(&self) -> String {
        let stamp = humantime::format_rfc3339_seconds(self.timestamp)
            .to_string()
            .chars()
            .filter_map(|c| match c {
                '0'..='9' => Some(c),
                'T' => Some('_'),
                _ => None,
            })
            .collect::<String>();

        format!("{}_keys_{stamp}.json", self.key_type)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the document into `dir` under [`KeysDocument::file_name`].
    ///
    /// The data goes to a temporary file first, so a failed write never
    /// leaves a truncated document behind.
    pub fn save_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, KeygenError> {
        let dir = dir.as_ref();
        let path = dir.join(self.file_name());

        self.to_json()
            .map_err(std::io::Error::from)
            .and_then(|data| write_atomically(dir, &path, data.as_bytes()))
            .map_err(|source| KeygenError::FileWrite {
                path: path.clone(),
                source,
            })?;

        tracing::info!(
            key_type = %self.key_type,
            count = self.count,
            path = %path.display(),
            "saved keys",
        );
        Ok(path)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, KeygenError> {
        let path = path.as_ref();
        let read = || -> std::io::Result<Self> {
            let data = std::fs::read_to_string(path)?;
            let de = &mut serde_json::Deserializer::from_str(&data);
            serde_path_to_error::deserialize(de)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        };

        read().map_err(|source| KeygenError::FileRead {
            path: path.to_owned(),
            source,
        })
    }
}

fn write_atomically(dir: &Path, path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn truncate_to_seconds(time: SystemTime) -> SystemTime {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    UNIX_EPOCH + Duration::from_secs(secs)
}

mod rfc3339 {
    use std::borrow::Cow;
    use std::time::SystemTime;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_rfc3339_seconds(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SystemTime, D::Error> {
        let value = <Cow<'de, str>>::deserialize(deserializer)?;
        humantime::parse_rfc3339(&value).map_err(Error::custom)
    }
}
