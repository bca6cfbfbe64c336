use std::fs;
use tempfile::tempdir;

use cmdref_core::catalog::{discover_catalog_files, parse_catalog};
use cmdref_core::{AppConfig, Catalog, Error, FacetCache, RecordStore};

const TOOLBOX_TOML: &str = r#"
name = "Toolbox"

[[commands]]
id = "tb-list"
title = "List tools"
command = "toolbox list"
description = "Show installed tools."
category = "Inspection"

[[commands]]
id = "tb-add"
title = "Add tool"
command = "toolbox add <name>"
description = "Install a tool."
category = "Setup"
examples = ["toolbox add jq"]

[[scenarios]]
id = "tb-bootstrap"
title = "Bootstrapping a machine"
description = "Install the basics."
category = "Setup"
difficulty = "Beginner"
estimated_time = "10 minutes"
tags = ["setup"]

[[scenarios.steps]]
step_number = 1
title = "Add jq"
command = "toolbox add jq"
description = "Install jq."
explanation = "jq is needed by later steps."
"#;

const EXTRA_JSON: &str = r#"{
  "commands": [
    {
      "id": "extra-one",
      "title": "Extra",
      "command": "extra run",
      "description": "An extra command.",
      "category": "Misc"
    }
  ],
  "scenarios": [
    {
      "id": "extra-scenario",
      "title": "Extra scenario",
      "description": "Uses camelCase keys.",
      "category": "Misc",
      "difficulty": "Advanced",
      "estimatedTime": "1 hour",
      "steps": [
        {
          "stepNumber": 1,
          "title": "Go",
          "command": "extra run --all",
          "description": "Run everything.",
          "explanation": "It runs."
        }
      ],
      "relatedCommands": ["extra run"]
    }
  ]
}"#;

fn config_for(paths: Vec<String>) -> AppConfig {
    AppConfig {
        catalog_paths: paths,
        ignore_patterns: vec![],
        include_bundled: false,
    }
}

#[test]
fn test_load_from_directory() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("toolbox.toml"), TOOLBOX_TOML).unwrap();
    fs::create_dir_all(tmp.path().join("nested")).unwrap();
    fs::write(tmp.path().join("nested/extra.json"), EXTRA_JSON).unwrap();
    fs::write(tmp.path().join("README.md"), "# not a catalog").unwrap();

    let config = config_for(vec![tmp.path().to_string_lossy().into_owned()]);
    let catalog = Catalog::load(&config).unwrap();

    assert_eq!(catalog.collections().len(), 2);
    assert_eq!(catalog.commands().len(), 3);
    assert_eq!(catalog.scenarios().len(), 2);

    let toolbox = catalog.collection("toolbox").unwrap();
    assert_eq!(toolbox.name, "Toolbox");
    assert_eq!(toolbox.commands.len(), 2);

    let extra = catalog.collection("extra").unwrap();
    assert_eq!(extra.name, "extra");
    let scenario = extra.scenarios.get("extra-scenario").unwrap();
    assert_eq!(scenario.estimated_time, "1 hour");
    assert_eq!(scenario.related_commands, vec!["extra run"]);
}

#[test]
fn test_discovery_order_is_stable_and_ignores_globs() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("b.toml"), "").unwrap();
    fs::write(tmp.path().join("a.toml"), "").unwrap();
    fs::create_dir_all(tmp.path().join("drafts")).unwrap();
    fs::write(tmp.path().join("drafts/c.toml"), "").unwrap();

    let root = tmp.path().to_string_lossy().into_owned();
    let files = discover_catalog_files(&[root.as_str()], &["*/drafts"]).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.toml", "b.toml"]);
}

#[test]
fn test_missing_path_is_skipped() {
    let config = config_for(vec!["/definitely/not/here".to_string()]);
    let catalog = Catalog::load(&config).unwrap();
    assert!(catalog.commands().is_empty());
    assert!(catalog.collections().is_empty());
}

#[test]
fn test_duplicate_ids_across_files_rejected() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("one.toml"), TOOLBOX_TOML).unwrap();
    fs::write(tmp.path().join("two.toml"), TOOLBOX_TOML).unwrap();

    let config = config_for(vec![tmp.path().to_string_lossy().into_owned()]);
    let err = Catalog::load(&config).unwrap_err();
    assert!(matches!(err, Error::DuplicateId(id) if id == "tb-list"));
}

#[test]
fn test_user_file_cannot_shadow_bundled_id() {
    let tmp = tempdir().unwrap();
    fs::write(
        tmp.path().join("mine.toml"),
        r#"
[[commands]]
id = "docker-run"
title = "Mine"
command = "docker run"
description = "Shadow"
category = "Mine"
"#,
    )
    .unwrap();

    let config = AppConfig {
        catalog_paths: vec![tmp.path().to_string_lossy().into_owned()],
        ignore_patterns: vec![],
        include_bundled: true,
    };
    assert!(matches!(Catalog::load(&config), Err(Error::DuplicateId(_))));
}

#[test]
fn test_empty_category_rejected() {
    let text = r#"
[[commands]]
id = "blank"
title = "Blank"
command = "blank"
description = "No category"
category = ""
"#;
    let file = parse_catalog(std::path::Path::new("blank.toml"), text).unwrap();
    let err = RecordStore::new(file.commands).unwrap_err();
    assert!(matches!(err, Error::EmptyCategory(id) if id == "blank"));
}

#[test]
fn test_invalid_difficulty_is_parse_error() {
    let text = TOOLBOX_TOML.replace("difficulty = \"Beginner\"", "difficulty = \"Expert\"");
    let err = parse_catalog(std::path::Path::new("toolbox.toml"), &text).unwrap_err();
    assert!(matches!(err, Error::Toml { .. }));
    assert!(err.to_string().contains("toolbox.toml"));
}

#[test]
fn test_facet_cache_follows_store_identity() {
    let catalog = Catalog::bundled().unwrap();
    let docker = catalog.collection("docker").unwrap();
    let git = catalog.collection("git").unwrap();

    let mut cache = FacetCache::new();
    let docker_categories = cache.get(&docker.commands).categories.clone();
    assert!(docker_categories.contains(&"Container Management".to_string()));

    // a clone shares identity and contents
    let same = docker.commands.clone();
    assert_eq!(cache.get(&same).categories, docker_categories);

    let git_categories = cache.get(&git.commands).categories.clone();
    assert_ne!(git_categories, docker_categories);
    assert!(git_categories.windows(2).all(|w| w[0] < w[1]));

    let scenario_difficulties = cache.get(&git.scenarios).difficulties.clone();
    assert!(!scenario_difficulties.is_empty());
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("toolbox.toml"), TOOLBOX_TOML).unwrap();
    let locked = tmp.path().join("locked");
    fs::create_dir_all(&locked).unwrap();
    fs::write(locked.join("notes.txt"), "not a catalog").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let root = tmp.path().to_string_lossy().into_owned();
    let files = discover_catalog_files(&[root.as_str()], &[]);
    let catalog = Catalog::load(&config_for(vec![root.clone()]));

    // restore so the temp dir can be cleaned up
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let files = files.unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("toolbox.toml"));
    assert_eq!(catalog.unwrap().commands().len(), 2);
}
