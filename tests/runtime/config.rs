//! Integration tests for ShellConfig

use std::fs;

use parley_foundation::{Invoker, InvokerKind};
use parley_runtime::{ConfigError, ShellConfig};

#[test]
fn loads_from_file() {
    let path = std::env::temp_dir().join(format!("parley-config-{}.toml", std::process::id()));
    fs::write(
        &path,
        r#"
prompt = "shop> "
banner = false
invoker = "Bob"
kind = "player"
players = ["Bob", "Dave"]
"#,
    )
    .unwrap();

    let config = ShellConfig::load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(config.prompt, "shop> ");
    assert!(!config.banner);
    assert_eq!(config.players, vec!["Bob", "Dave"]);
    assert_eq!(config.history_size, ShellConfig::default().history_size);

    let identity = config.identity();
    assert_eq!(identity.kind(), InvokerKind::Player);
    assert!(!identity.has_permission("shop.admin"));
}

#[test]
fn reports_bad_types() {
    let err = ShellConfig::from_toml_str("history_size = \"lots\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("invalid configuration"));
}
