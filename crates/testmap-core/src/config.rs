//! Component configuration files.
//!
//! A components file is either JSON:
//!
//! ```json
//! { "components": [ { "name": "DNS", "default_jira_component": "DNS", "namespaces": ["openshift-dns"] } ] }
//! ```
//!
//! or TOML with `[[components]]` tables. The format follows the file extension.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::component::Component;
use crate::domain::{MappingError, Result};
use crate::obs::{emit_catch_all_matcher, emit_components_loaded};

/// On-disk layout of a components file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ComponentsFile {
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Supported configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(MappingError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Parse components from file contents.
pub fn parse_components(
    contents: &str,
    format: ConfigFormat,
    path: &Path,
) -> Result<Vec<Component>> {
    let file: ComponentsFile = match format {
        ConfigFormat::Json => serde_json::from_str(contents).map_err(|source| MappingError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        ConfigFormat::Toml => toml::from_str(contents).map_err(|source| MappingError::Toml {
            path: path.to_path_buf(),
            source,
        })?,
    };
    Ok(file.components)
}

/// Load components from a file, or from every `.json`/`.toml` file in a
/// directory (sorted by file name). The result is validated.
pub fn load_components(path: &Path) -> Result<Vec<Component>> {
    let files = if path.is_dir() {
        config_files_in(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut components = Vec::new();
    for file in &files {
        let format = ConfigFormat::from_path(file)?;
        let contents = std::fs::read_to_string(file).map_err(|source| MappingError::Io {
            path: file.clone(),
            source,
        })?;
        components.extend(parse_components(&contents, format, file)?);
    }

    validate_components(&components)?;
    emit_components_loaded(&path.display().to_string(), components.len());
    Ok(components)
}

fn config_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source: std::io::Error| MappingError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && ConfigFormat::from_path(&path).is_ok() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Check names are present and unique and variants are `category:value`.
/// Catch-all matchers are accepted but logged.
pub fn validate_components(components: &[Component]) -> Result<()> {
    let mut seen = HashSet::new();

    for component in components {
        if component.name.trim().is_empty() {
            return Err(MappingError::InvalidComponent {
                component: "<unnamed>".to_string(),
                reason: "name must not be empty".to_string(),
            });
        }
        if !seen.insert(component.name.as_str()) {
            return Err(MappingError::DuplicateComponent(component.name.clone()));
        }

        for variant in &component.variants {
            let valid = variant
                .split_once(':')
                .is_some_and(|(category, value)| !category.is_empty() && !value.is_empty());
            if !valid {
                return Err(MappingError::InvalidComponent {
                    component: component.name.clone(),
                    reason: format!("variant '{}' is not category:value", variant),
                });
            }
        }

        for (index, matcher) in component.matchers.iter().enumerate() {
            if matcher.is_catch_all() {
                emit_catch_all_matcher(&component.name, index);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/b.json")).unwrap(),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("b.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert!(matches!(
            ConfigFormat::from_path(Path::new("b.yaml")),
            Err(MappingError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[[components]]
name = "DNS"
default_jira_project = "OCPBUGS"
default_jira_component = "DNS"
operators = ["dns"]
namespaces = ["openshift-dns", "openshift-dns-operator"]

[[components.matchers]]
include_all = ["[sig-network]", "DNS"]
exclude_any = ["[sig-network-edge]"]
capabilities = ["Resolution"]

[components.test_renames]
"new dns test" = "old dns test"
"#;
        let components = parse_components(toml, ConfigFormat::Toml, Path::new("dns.toml")).unwrap();
        assert_eq!(components.len(), 1);
        let dns = &components[0];
        assert_eq!(dns.operators, vec!["dns".to_string()]);
        assert_eq!(dns.matchers.len(), 1);
        assert_eq!(dns.matchers[0].capabilities, vec!["Resolution".to_string()]);
        assert_eq!(dns.test_renames["new dns test"], "old dns test");
    }

    #[test]
    fn test_parse_json_error_names_path() {
        let err = parse_components("{ not json", ConfigFormat::Json, Path::new("bad.json"))
            .unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let components = vec![
            Component::new("DNS", "OCPBUGS", "DNS"),
            Component::new("DNS", "OCPBUGS", "DNS"),
        ];
        assert!(matches!(
            validate_components(&components),
            Err(MappingError::DuplicateComponent(name)) if name == "DNS"
        ));
    }

    #[test]
    fn test_validate_rejects_empty_name_and_bad_variant() {
        assert!(validate_components(&[Component::new(" ", "", "")]).is_err());

        let mut component = Component::new("Etcd", "OCPBUGS", "Etcd");
        component.variants = vec!["Platform:aws".to_string(), "metal".to_string()];
        let err = validate_components(&[component]).unwrap_err();
        assert!(err.to_string().contains("metal"));
    }

    #[test]
    fn test_validate_accepts_catch_all_matcher() {
        let component = Component::new("Everything", "OCPBUGS", "Unknown")
            .with_matcher(Default::default());
        assert!(validate_components(&[component]).is_ok());
    }
}
