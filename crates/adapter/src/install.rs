//! Host-application registration.
//!
//! `apisearch-mcp install` merges a server entry into the host's JSON config
//! file so the adapter is launched as a subprocess (`apisearch-mcp run`).
//! Existing entries and unrelated keys in the file are preserved.

use anyhow::Context as _;
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};

const HOST_DIR: &str = "Claude";
const HOST_CONFIG_FILE: &str = "claude_desktop_config.json";

pub fn run(name: &str, config_path: Option<&Path>) -> anyhow::Result<()> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    let exe = std::env::current_exe().context("resolve current executable path")?;
    register_server(&path, name, &exe)?;
    tracing::info!(config = %path.display(), name, "registered MCP server entry");
    Ok(())
}

/// Host config file location for this platform.
///
/// # Errors
///
/// Returns an error if the platform has no config directory.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let base = dirs::config_dir().context("no config directory known for this platform")?;
    Ok(base.join(HOST_DIR).join(HOST_CONFIG_FILE))
}

/// Upsert `mcpServers.<name>` in the config file at `path`.
///
/// A missing file starts from an empty document; a present but unparsable
/// file is an error and is left untouched.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or written, or if
/// the document's top level (or its `mcpServers` key) is not a JSON object.
pub fn register_server(path: &Path, name: &str, command: &Path) -> anyhow::Result<()> {
    let mut doc = load_document(path)?;
    let root = doc
        .as_object_mut()
        .with_context(|| format!("top level of {} is not a JSON object", path.display()))?;

    let servers = root
        .entry("mcpServers".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let servers = servers
        .as_object_mut()
        .with_context(|| format!("'mcpServers' in {} is not a JSON object", path.display()))?;

    servers.insert(
        name.to_string(),
        json!({
            "command": command.to_string_lossy(),
            "args": ["run"],
        }),
    );

    save_document(path, &doc)
}

fn load_document(path: &Path) -> anyhow::Result<Value> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(json!({})),
        Err(e) => return Err(e).with_context(|| format!("read config {}", path.display())),
    };
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

fn save_document(path: &Path, doc: &Value) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    let bytes = serde_json::to_vec_pretty(doc).context("serialize config as json")?;
    std::fs::write(path, bytes).with_context(|| format!("write config {}", path.display()))?;
    Ok(())
}
