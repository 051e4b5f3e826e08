//! Integration tests for layered configuration loading

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wmiq::config::ConfigLoader;
use wmiq::query::HostErrorPolicy;

use crate::integration::with_xdg_env;

#[test]
fn test_no_files_yields_defaults() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load().unwrap();
        assert!(config.query.apply_formatting);
        assert_eq!(config.query.on_host_error, HostErrorPolicy::Abort);
        assert_eq!(config.format.group_separator, ",");
        assert_eq!(config.logging.level, "warn");
    });
}

#[test]
fn test_explicit_file_overrides_global_file() {
    let test_dir = TempDir::new().unwrap();
    fs::create_dir_all(test_dir.path().join("wmiq")).unwrap();
    fs::write(
        test_dir.path().join("wmiq").join("config.toml"),
        r#"
[query]
show_host = true
max_items = 10

[connection]
snapshot_dir = "/srv/global-snapshots"
"#,
    )
    .unwrap();

    let explicit = test_dir.path().join("site.toml");
    fs::write(
        &explicit,
        r#"
[query]
max_items = 3
on_host_error = "continue"
"#,
    )
    .unwrap();

    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load_from_file(&explicit).unwrap();
        assert!(config.query.show_host, "global value survives");
        assert_eq!(config.query.max_items, Some(3), "explicit file wins");
        assert_eq!(config.query.on_host_error, HostErrorPolicy::Continue);
        assert_eq!(
            config.connection.snapshot_dir,
            Some(PathBuf::from("/srv/global-snapshots"))
        );
    });
}

#[test]
fn test_wmiq_config_env_names_explicit_file() {
    let test_dir = TempDir::new().unwrap();
    let explicit = test_dir.path().join("team.toml");
    fs::write(&explicit, "[format]\ngroup_separator = \" \"\n").unwrap();

    with_xdg_env(&test_dir, || {
        std::env::set_var("WMIQ_CONFIG", &explicit);
        let config = ConfigLoader::load();
        std::env::remove_var("WMIQ_CONFIG");
        assert_eq!(config.unwrap().format.group_separator, " ");
    });
}

#[test]
fn test_malformed_global_file_is_configuration_error() {
    let test_dir = TempDir::new().unwrap();
    fs::create_dir_all(test_dir.path().join("wmiq")).unwrap();
    fs::write(
        test_dir.path().join("wmiq").join("config.toml"),
        "[query\nshow_host = ",
    )
    .unwrap();

    with_xdg_env(&test_dir, || {
        let err = ConfigLoader::load().unwrap_err();
        assert!(err.is_configuration());
    });
}
