use crate::config::{self, AppConfig};
use crate::error::Error;
use crate::model::{Command, Scenario};
use crate::store::RecordStore;
use glob::Pattern;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::WalkDir;

/// Catalog files compiled into the crate.
const BUNDLED: &[(&str, &str)] = &[
    ("docker.toml", include_str!("../data/docker.toml")),
    ("git.toml", include_str!("../data/git.toml")),
    ("helm.toml", include_str!("../data/helm.toml")),
    ("kubernetes.toml", include_str!("../data/kubernetes.toml")),
    ("terraform.toml", include_str!("../data/terraform.toml")),
];

/// On-disk shape of one catalog file.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFile {
    pub name: Option<String>,
    #[serde(default)]
    pub commands: Vec<Command>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

/// Records from a single catalog file, e.g. everything about one tool.
#[derive(Debug, Clone)]
pub struct Collection {
    /// File stem, used to pick the collection on the command line.
    pub key: String,
    pub name: String,
    pub commands: RecordStore<Command>,
    pub scenarios: RecordStore<Scenario>,
}

/// Every loaded collection, plus stores spanning all of them.
#[derive(Debug, Clone)]
pub struct Catalog {
    collections: Vec<Collection>,
    commands: RecordStore<Command>,
    scenarios: RecordStore<Scenario>,
}

impl Catalog {
    /// Only the catalog compiled into the crate.
    pub fn bundled() -> Result<Self, Error> {
        Self::from_sources(bundled_sources()?)
    }

    /// Bundled catalog (unless disabled) followed by every file found under
    /// the configured paths.
    pub fn load(config: &AppConfig) -> Result<Self, Error> {
        let mut sources = Vec::new();
        if config.include_bundled {
            sources.extend(bundled_sources()?);
        }

        let roots = config::non_overlapping_paths(config.catalog_paths.clone());
        let root_slices: Vec<&str> = roots.iter().map(|s| s.as_str()).collect();
        let ignore_slices: Vec<&str> = config.ignore_patterns.iter().map(|s| s.as_str()).collect();

        for path in discover_catalog_files(&root_slices, &ignore_slices)? {
            let text = fs::read_to_string(&path)?;
            let file = parse_catalog(&path, &text)?;
            sources.push((collection_key(&path), file));
        }

        Self::from_sources(sources)
    }

    /// Build stores from `(key, file)` pairs. Ids must be unique across all of them.
    pub fn from_sources(sources: Vec<(String, CatalogFile)>) -> Result<Self, Error> {
        let mut collections = Vec::with_capacity(sources.len());
        let mut all_commands = Vec::new();
        let mut all_scenarios = Vec::new();

        for (key, file) in sources {
            all_commands.extend(file.commands.iter().cloned());
            all_scenarios.extend(file.scenarios.iter().cloned());

            let collection = Collection {
                name: file.name.unwrap_or_else(|| key.clone()),
                key,
                commands: RecordStore::new(file.commands)?,
                scenarios: RecordStore::new(file.scenarios)?,
            };
            debug!(
                "Collection '{}': {} commands, {} scenarios",
                collection.key,
                collection.commands.len(),
                collection.scenarios.len()
            );
            collections.push(collection);
        }

        let catalog = Self {
            collections,
            commands: RecordStore::new(all_commands)?,
            scenarios: RecordStore::new(all_scenarios)?,
        };
        info!(
            "Loaded {} collections: {} commands, {} scenarios",
            catalog.collections.len(),
            catalog.commands.len(),
            catalog.scenarios.len()
        );
        Ok(catalog)
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collection(&self, key: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.key == key)
    }

    pub fn commands(&self) -> &RecordStore<Command> {
        &self.commands
    }

    pub fn scenarios(&self) -> &RecordStore<Scenario> {
        &self.scenarios
    }
}

fn bundled_sources() -> Result<Vec<(String, CatalogFile)>, Error> {
    BUNDLED
        .iter()
        .map(|(file_name, text)| {
            let path = Path::new(file_name);
            Ok((collection_key(path), parse_catalog(path, text)?))
        })
        .collect()
}

fn collection_key(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parse catalog text, picking the format from the file extension.
pub fn parse_catalog(path: &Path, text: &str) -> Result<CatalogFile, Error> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(text).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        }),
        Some("json") => serde_json::from_str(text).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        }),
        _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
    }
}

fn is_catalog_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("toml") | Some("json")
    )
}

fn is_permission_denied(err: &walkdir::Error) -> bool {
    err.io_error().map(|e| e.kind()) == Some(io::ErrorKind::PermissionDenied)
}

/// Collect `.toml` and `.json` files under `roots` in a stable order, skipping
/// anything matched by `ignore_globs`. Missing roots and unreadable
/// directories are logged and skipped.
pub fn discover_catalog_files(
    roots: &[&str],
    ignore_globs: &[&str],
) -> Result<Vec<PathBuf>, Error> {
    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();
    let ignored = |path: &Path| ignore_patterns.iter().any(|p| p.matches_path(path));

    let mut files = Vec::new();
    for root in roots {
        let root = Path::new(root);
        if !root.exists() {
            error!("Catalog path {} does not exist", root.display());
            continue;
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !ignored(entry.path()));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_permission_denied(&err) => {
                    let path = err.path().unwrap_or(root).display().to_string();
                    error!("Access denied reading {}: {}", path, err);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if entry.file_type().is_file() && is_catalog_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    debug!("Discovered {} catalog files", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.collections().len(), 5);
        assert!(catalog.commands().get("docker-run").is_some());
        assert!(catalog.scenarios().get("combine-commits").is_some());
        let git = catalog.collection("git").unwrap();
        assert_eq!(git.name, "Git");
        assert!(!git.scenarios.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_extension() {
        let err = parse_catalog(Path::new("notes.yaml"), "").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
