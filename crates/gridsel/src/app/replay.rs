//! Loading recorded message scripts and replaying them into a store.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::app::store::SelectionStore;
use crate::domain::model::Message;

/// On-disk encodings accepted for message scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    /// A single JSON array of messages.
    Json,
    /// One JSON message per line; blank lines are skipped.
    JsonLines,
    /// A YAML sequence of messages.
    Yaml,
}

impl ScriptFormat {
    /// Pick a format from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("jsonl") | Some("ndjson") => ScriptFormat::JsonLines,
            Some("yaml") | Some("yml") => ScriptFormat::Yaml,
            _ => ScriptFormat::Json,
        }
    }
}

/// Parse a message script from its textual contents.
pub fn parse_script(contents: &str, format: ScriptFormat) -> Result<Vec<Message>> {
    match format {
        ScriptFormat::Json => {
            serde_json::from_str(contents).context("invalid JSON message script")
        }
        ScriptFormat::JsonLines => contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("invalid message on line {}", index + 1))
            })
            .collect(),
        ScriptFormat::Yaml => {
            serde_yaml::from_str(contents).context("invalid YAML message script")
        }
    }
}

/// Read a message script from `path`.
pub fn load_script(path: &Path) -> Result<Vec<Message>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read message script at {}", path.display()))?;
    parse_script(&data, ScriptFormat::from_path(path))
        .with_context(|| format!("failed to parse message script {}", path.display()))
}

/// Dispatch every message in order.
pub fn replay<'a>(store: &mut SelectionStore, messages: impl IntoIterator<Item = &'a Message>) {
    let mut applied = 0usize;
    for message in messages {
        store.dispatch(message);
        applied += 1;
    }
    tracing::info!(applied, resources = store.len(), "replayed message script");
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::model::{MessageKind, RowId};

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(ScriptFormat::from_path(Path::new("a.jsonl")), ScriptFormat::JsonLines);
        assert_eq!(ScriptFormat::from_path(Path::new("a.YML")), ScriptFormat::Yaml);
        assert_eq!(ScriptFormat::from_path(Path::new("a.json")), ScriptFormat::Json);
        assert_eq!(ScriptFormat::from_path(Path::new("script")), ScriptFormat::Json);
    }

    #[test]
    fn parses_json_lines_and_skips_blanks() {
        let script = r#"
{"type": "AOR/SET_RESOURCE_SELECTION", "payload": ["a"], "meta": {"resource": "posts"}}

{"type": "OTHER"}
"#;
        let messages = parse_script(script, ScriptFormat::JsonLines).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].kind, MessageKind::SetResourceSelection);
        assert!(messages[1].payload.is_empty());
    }

    #[test]
    fn reports_offending_line() {
        let err = parse_script("{}\nnot json", ScriptFormat::JsonLines).unwrap_err();
        assert!(format!("{err:#}").contains("line 1"));
    }

    #[test]
    fn parses_yaml_sequence() {
        let script = r#"
- type: AOR/SET_RESOURCE_SELECTION
  payload: [1, 2]
  meta:
    resource: comments
"#;
        let messages = parse_script(script, ScriptFormat::Yaml).unwrap();
        assert_eq!(messages[0].payload, vec![RowId::from(1), RowId::from(2)]);
        assert_eq!(messages[0].resource(), Some("comments"));
    }

    #[test]
    fn replay_applies_in_order() {
        let script = r#"[
            {"type": "AOR/SET_RESOURCE_SELECTION", "payload": ["a", "b"], "meta": {"resource": "posts"}},
            {"type": "AOR/SET_RESOURCE_SELECTION", "payload": ["c"], "meta": {"resource": "posts"}}
        ]"#;
        let messages = parse_script(script, ScriptFormat::Json).unwrap();
        let mut store = SelectionStore::new();
        replay(&mut store, &messages);
        assert_eq!(store.selection("posts"), &[RowId::from("c")]);
    }

    #[test]
    fn load_script_reads_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("script.json");
        fs::write(&path, r#"[{"type": "OTHER"}]"#)?;
        assert_eq!(load_script(&path)?.len(), 1);
        assert!(load_script(&dir.path().join("missing.json")).is_err());
        Ok(())
    }
}
