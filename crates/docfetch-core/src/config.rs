//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Typed views for the fetch phase (`mappings`, `fetch.stored_fields`) are
//! extracted on demand.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::env;
use std::path::{Path, PathBuf};

use crate::types::{MappingConfig, SearchExecutionContext, StoredFieldsContext};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(toml: &str) -> anyhow::Result<Self> {
        let config = Self { figment: Figment::new().merge(Toml::string(toml)) };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Type mappings; an absent `mappings` section means no type has a parent.
    pub fn mappings(&self) -> anyhow::Result<MappingConfig> {
        if self.figment.find_value("mappings").is_err() {
            return Ok(MappingConfig::default());
        }
        self.get("mappings")
    }

    pub fn stored_fields(&self) -> anyhow::Result<Option<StoredFieldsContext>> {
        if self.figment.find_value("fetch.stored_fields").is_err() {
            return Ok(None);
        }
        let names: Vec<String> = self.get("fetch.stored_fields")?;
        Ok(Some(StoredFieldsContext::from_list(names)?))
    }

    pub fn execution_context(&self) -> anyhow::Result<SearchExecutionContext> {
        let mut ctx = SearchExecutionContext::new(self.mappings()?);
        ctx.stored_fields = self.stored_fields()?;
        Ok(ctx)
    }

    pub fn index_dir(&self) -> anyhow::Result<PathBuf> {
        let dir: String = self.get("data.index_dir")?;
        Ok(expand_path(dir))
    }

    fn validate(&self) -> anyhow::Result<()> {
        let mappings = self.mappings()?;
        for (doc_type, mapping) in &mappings.types {
            if mapping.parent.active && mapping.parent.field_name.is_empty() {
                anyhow::bail!("type '{}' has an active parent field with an empty name", doc_type);
            }
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
