#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::fs;

use clap::Parser;
use frontmark::{
  cli::{Cli, OutputFormat},
  config::Config,
};
use tempfile::tempdir;

#[test]
fn test_toml_config_with_defaults() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let path = temp_dir.path().join("frontmark.toml");
  fs::write(
    &path,
    r#"
[render]
smart_punctuation = false

[render.highlight]
theme = "Dracula"

[render.highlight.language_aliases]
rs = "rust"

[output]
format = "html"
"#,
  )
  .expect("Failed to write config in test");

  let config = Config::from_file(&path).expect("valid config");
  assert!(config.render.gfm);
  assert!(!config.render.smart_punctuation);
  assert!(config.render.heading_ids);
  assert!(config.render.highlight.enabled);
  assert_eq!(config.render.highlight.theme.as_deref(), Some("Dracula"));
  assert_eq!(
    config
      .render
      .highlight
      .language_aliases
      .get("rs")
      .map(String::as_str),
    Some("rust")
  );
  assert_eq!(config.output.format, OutputFormat::Html);
  assert!(!config.output.require_frontmatter);
}

#[test]
fn test_json_config() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let path = temp_dir.path().join("frontmark.json");
  fs::write(
    &path,
    r#"{ "render": { "heading_ids": false }, "output": { "require_frontmatter": true } }"#,
  )
  .expect("Failed to write config in test");

  let config = Config::from_file(&path).expect("valid config");
  assert!(!config.render.heading_ids);
  assert!(config.output.require_frontmatter);
  assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
fn test_unsupported_extension() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let path = temp_dir.path().join("frontmark.yaml");
  fs::write(&path, "render: {}").expect("Failed to write config in test");

  let err = Config::from_file(&path).expect_err("yaml is not supported");
  assert!(err.to_string().contains("Unsupported config file format"));
}

#[test]
fn test_malformed_toml() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let path = temp_dir.path().join("frontmark.toml");
  fs::write(&path, "[render\ngfm = ").expect("Failed to write config in test");

  assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_cli_overrides_file() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let path = temp_dir.path().join("frontmark.toml");
  fs::write(
    &path,
    "[render.highlight]\ntheme = \"Dracula\"\n\n[output]\nformat = \"html\"\n",
  )
  .expect("Failed to write config in test");

  let path = path.to_str().expect("temp path is UTF-8");

  let cli = Cli::try_parse_from([
    "frontmark",
    "-c",
    path,
    "--theme",
    "Nord",
    "--no-highlight",
    "-f",
    "json",
    "doc.md",
  ])
  .expect("valid args");

  let config = Config::load(&cli).expect("config loads");
  assert_eq!(config.render.highlight.theme.as_deref(), Some("Nord"));
  assert!(!config.render.highlight.enabled);
  assert_eq!(config.output.format, OutputFormat::Json);
  assert!(!config.processor_options().render.highlight.enabled);
}

#[test]
fn test_load_without_file_is_default() {
  let cli = Cli::try_parse_from(["frontmark", "doc.md"]).expect("valid args");
  assert_eq!(Config::load(&cli).expect("config loads"), Config::default());
}
