use std::path::Path;

use anyhow::{Context, Result};
use serde::de::Visitor;
use serde::{Deserialize, Deserializer};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

const DEFAULT_FILTER: &str = "warn";

/// Logs go to stderr, stdout is left for the command output.
pub fn init_logger(targets: Option<&Path>) -> Result<()> {
    let filter = match targets {
        Some(path) => LoggerTargets::load_from(path)
            .with_context(|| format!("failed to load logger config {}", path.display()))?
            .build_subscriber(),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_e| EnvFilter::new(DEFAULT_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init logger: {e}"))
}

/// A JSON map of `target -> level`.
#[derive(Debug)]
pub struct LoggerTargets {
    directives: Vec<Directive>,
}

impl LoggerTargets {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        super::load_json_from_file(path)
    }

    pub fn build_subscriber(&self) -> EnvFilter {
        let mut builder = EnvFilter::default();
        for item in &self.directives {
            builder = builder.add_directive(item.clone());
        }
        builder
    }
}

impl<'de> Deserialize<'de> for LoggerTargets {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LoggerVisitor;

        impl<'de> Visitor<'de> for LoggerVisitor {
            type Value = LoggerTargets;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a list of targets")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut directives = Vec::new();

                while let Some((target, level)) = map.next_entry::<String, String>()? {
                    let directive = format!("{target}={level}")
                        .parse::<Directive>()
                        .map_err(serde::de::Error::custom)?;

                    directives.push(directive);
                }

                Ok(LoggerTargets { directives })
            }
        }

        deserializer.deserialize_map(LoggerVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_targets() {
        let targets: LoggerTargets = serde_json::from_str(
            r#"{ "chainkeys_core": "debug", "chainkeys": "info" }"#,
        )
        .unwrap();
        assert_eq!(targets.directives.len(), 2);

        let filter = targets.build_subscriber().to_string();
        assert!(filter.contains("chainkeys_core=debug"), "{filter}");
        assert!(filter.contains("chainkeys=info"), "{filter}");
    }

    #[test]
    fn invalid_level() {
        let res = serde_json::from_str::<LoggerTargets>(r#"{ "chainkeys": "loud" }"#);
        assert!(res.is_err());
    }

    #[test]
    fn load_from_file_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logger.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        assert!(LoggerTargets::load_from(&path).is_err());
        assert!(LoggerTargets::load_from(dir.path().join("missing.json")).is_err());
    }
}
