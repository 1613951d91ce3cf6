use crate::error::{DriverError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const BUILTIN_CATEGORIES: &str = include_str!("../../../categories/api-categories.toml");

/// Seed configuration for one package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageCategories {
    /// Module whose category listing is used for unprocessed TypeDoc documents
    #[serde(default)]
    pub root_package: Option<String>,

    /// Top-level API categories
    #[serde(default)]
    pub categories: Vec<String>,

    /// Sub-categories, walked after `categories`
    #[serde(default)]
    pub sub_categories: Vec<String>,
}

impl PackageCategories {
    /// Seed names in traversal order
    pub fn seed_names(&self) -> Vec<&str> {
        self.categories
            .iter()
            .chain(&self.sub_categories)
            .map(String::as_str)
            .collect()
    }
}

/// Package name -> seed configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    #[serde(default)]
    pub packages: BTreeMap<String, PackageCategories>,
}

impl CategoryConfig {
    /// Configuration bundled with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_bytes(BUILTIN_CATEGORIES.as_bytes())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|err| {
            DriverError::Config(format!("Failed to read {}: {err}", path.display()))
        })?;
        Self::from_bytes(&bytes)
            .map_err(|err| DriverError::Config(format!("{}: {err}", path.display())))
    }

    /// Parse JSON, falling back to TOML
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let config: Self = match serde_json::from_slice(bytes) {
            Ok(config) => config,
            Err(json_err) => {
                let utf8 = std::str::from_utf8(bytes)
                    .map_err(|err| DriverError::Config(format!("{json_err}; {err}")))?;
                toml::from_str(utf8).map_err(|toml_err| {
                    DriverError::Config(format!(
                        "not valid JSON ({json_err}) or TOML ({toml_err})"
                    ))
                })?
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Seed configuration for `package`
    pub fn package(&self, package: &str) -> Result<&PackageCategories> {
        self.packages
            .get(package)
            .ok_or_else(|| DriverError::UnknownPackage(package.to_string()))
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        for (package, entry) in &self.packages {
            if package.trim().is_empty() {
                problems.push("packages: package name must not be empty".to_string());
            }
            for (field, names) in [
                ("categories", &entry.categories),
                ("sub_categories", &entry.sub_categories),
            ] {
                for (idx, name) in names.iter().enumerate() {
                    if name.trim().is_empty() {
                        problems.push(format!("packages.{package}.{field}[{idx}] must not be empty"));
                    }
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DriverError::Config(problems.join("; ")))
        }
    }
}
