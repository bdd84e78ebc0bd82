use directories::ProjectDirs;
use modeterm_core::{
    Binding, Command, CommandId, IntegrationConfig, KeyCombo, RemapTable, SyncPolicy,
    TerminalCommands,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB
const MAX_ENTRIES_PER_TABLE: usize = 512;
const MAX_SEQUENCE_KEYS: usize = 16;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    integration: Option<IntegrationSection>,
    remap: Option<BTreeMap<String, String>>,
    terminal: Option<TerminalSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IntegrationSection {
    policy: Option<String>,
    sync: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TerminalSection {
    bindings: Option<BTreeMap<String, String>>,
    commands: Option<BTreeMap<String, Vec<String>>>,
}

/// Load the integration configuration.
///
/// Never fails: every problem becomes a warning and the shipped configuration
/// is used instead.
pub fn load_config(
    config_file: Option<&PathBuf>,
    use_user_config: bool,
) -> (IntegrationConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = config_file
        .cloned()
        .or_else(|| use_user_config.then(user_config_path).flatten());

    let Some(path) = config_path else {
        return (IntegrationConfig::default(), warnings);
    };
    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (IntegrationConfig::default(), warnings);
    }

    let content = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };
    let Some(content) = content else {
        return (IntegrationConfig::default(), warnings);
    };

    match parse_config(&content) {
        Ok(config) => {
            debug!(path = %path.display(), "loaded configuration");
            (config, warnings)
        }
        Err(errors) => {
            warnings.extend(
                errors
                    .into_iter()
                    .map(|err| format!("{}: {}", path.display(), err)),
            );
            warnings.push("Falling back to the default configuration".to_string());
            (IntegrationConfig::default(), warnings)
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "modeterm")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("modeterm.toml");
    Some(path)
}

/// Parse configuration text on top of the shipped defaults.
pub(crate) fn parse_config(content: &str) -> Result<IntegrationConfig, Vec<String>> {
    let file = toml::from_str::<ConfigFile>(content)
        .map_err(|err| vec![format!("Failed to parse: {}", err)])?;
    build_config(&file)
}

fn build_config(file: &ConfigFile) -> Result<IntegrationConfig, Vec<String>> {
    let mut errors: Vec<String> = Vec::new();
    let mut config = IntegrationConfig::default();

    if let Some(integration) = file.integration.as_ref()
        && let Some(name) = integration.policy.as_ref()
    {
        match SyncPolicy::from_name(name) {
            Some(policy) => config.policy = policy,
            None => errors.push(format!("Unknown policy '{}'", name)),
        }
    }

    let sync = file
        .integration
        .as_ref()
        .and_then(|integration| integration.sync.as_ref());
    if file.remap.is_some() || sync.is_some() {
        config.remaps = parse_remaps(file.remap.as_ref(), sync, &mut errors);
    }

    if let Some(terminal) = file.terminal.as_ref() {
        if let Some(commands) = terminal.commands.as_ref() {
            parse_terminal_commands(commands, &mut config.terminal_commands, &mut errors);
        }
        if let Some(bindings) = terminal.bindings.as_ref() {
            config.terminal_bindings = parse_terminal_bindings(bindings, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(config)
    } else {
        Err(errors)
    }
}

fn parse_remaps(
    remap: Option<&BTreeMap<String, String>>,
    sync: Option<&Vec<String>>,
    errors: &mut Vec<String>,
) -> RemapTable {
    let mut table = RemapTable::new();
    let total = remap.map_or(0, BTreeMap::len) + sync.map_or(0, Vec::len);
    if total > MAX_ENTRIES_PER_TABLE {
        errors.push(format!(
            "Too many remap entries: {} (max {})",
            total, MAX_ENTRIES_PER_TABLE
        ));
        return table;
    }

    for (source, replacement) in remap.into_iter().flatten() {
        let (source, replacement) = (source.trim(), replacement.trim());
        if source.is_empty() || replacement.is_empty() {
            errors.push(format!(
                "Invalid remap entry '{}' = '{}': empty command name",
                source, replacement
            ));
            continue;
        }
        if table.get(&CommandId::from(source)).is_some() {
            errors.push(format!("Duplicate '{}' in [remap]", source));
            continue;
        }
        table.remap(source, replacement);
    }

    for source in sync.into_iter().flatten() {
        let source = CommandId::from(source.trim());
        if source.as_str().is_empty() {
            errors.push("Empty command name in integration.sync".to_string());
            continue;
        }
        match table.get(&source) {
            Some(Some(_)) => errors.push(format!(
                "'{}' is listed in both [remap] and integration.sync",
                source
            )),
            Some(None) => errors.push(format!("Duplicate '{}' in integration.sync", source)),
            None => table.sync(source),
        }
    }
    table
}

fn parse_terminal_bindings(
    raw: &BTreeMap<String, String>,
    errors: &mut Vec<String>,
) -> Vec<Binding> {
    let mut bindings: Vec<Binding> = Vec::new();
    if raw.len() > MAX_ENTRIES_PER_TABLE {
        errors.push(format!(
            "Too many terminal bindings: {} (max {})",
            raw.len(),
            MAX_ENTRIES_PER_TABLE
        ));
        return bindings;
    }
    for (combo_str, command) in raw {
        let command = command.trim();
        match combo_str.parse::<KeyCombo>() {
            Ok(_) if command.is_empty() => errors.push(format!(
                "Empty command for '{}' in terminal bindings",
                combo_str
            )),
            Ok(combo) => {
                if bindings.iter().any(|binding| binding.combo == combo) {
                    errors.push(format!(
                        "Duplicate key '{}' in terminal bindings",
                        combo.display()
                    ));
                    continue;
                }
                bindings.push(Binding::new(combo, Command::terminal(command)));
            }
            Err(err) => errors.push(format!("{} in terminal bindings", err)),
        }
    }
    bindings
}

fn parse_terminal_commands(
    raw: &BTreeMap<String, Vec<String>>,
    catalog: &mut TerminalCommands,
    errors: &mut Vec<String>,
) {
    if raw.len() > MAX_ENTRIES_PER_TABLE {
        errors.push(format!(
            "Too many terminal commands: {} (max {})",
            raw.len(),
            MAX_ENTRIES_PER_TABLE
        ));
        return;
    }
    for (name, keys) in raw {
        let name = name.trim();
        if name.is_empty() {
            errors.push("Empty terminal command name".to_string());
            continue;
        }
        if keys.is_empty() || keys.len() > MAX_SEQUENCE_KEYS {
            errors.push(format!(
                "Terminal command '{}' needs 1 to {} keys, got {}",
                name,
                MAX_SEQUENCE_KEYS,
                keys.len()
            ));
            continue;
        }
        let parsed: Result<Vec<KeyCombo>, _> =
            keys.iter().map(|key| key.parse::<KeyCombo>()).collect();
        match parsed {
            Ok(sequence) => catalog.insert(name, sequence),
            Err(err) => errors.push(format!("{} in terminal command '{}'", err, name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use modeterm_core::command;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("modeterm.toml");
        std::fs::write(&path, content).expect("write temp config");
        path
    }

    #[test]
    fn no_config_file_yields_defaults() {
        let (config, warnings) = load_config(None, false);
        assert_eq!(config, IntegrationConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn missing_explicit_file_warns() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");

        let (config, warnings) = load_config(Some(&path), false);
        assert_eq!(config, IntegrationConfig::default());
        assert!(warnings.iter().any(|w| w.contains("Config file not found")));
    }

    #[test]
    fn remap_table_replaces_shipped_entries() {
        let config = parse_config(
            r#"
[integration]
policy = "sync-before-delegate"
sync = ["left"]

[remap]
undo = "terminal-undo"
"#,
        )
        .expect("config");

        assert_eq!(config.policy, SyncPolicy::SyncBeforeDelegate);
        assert_eq!(config.remaps.len(), 2);
        assert_eq!(
            config.remaps.get(&CommandId::from("undo")),
            Some(Some(&CommandId::from(command::UNDO)))
        );
        assert_eq!(config.remaps.get(&CommandId::from("left")), Some(None));
        assert_eq!(config.remaps.get(&CommandId::from("kill-line")), None);
    }

    #[test]
    fn terminal_tables_override_and_extend() {
        let config = parse_config(
            r#"
[terminal.bindings]
"C-j" = "terminal-send-return"

[terminal.commands]
terminal-beginning = ["C-a"]
"#,
        )
        .expect("config");

        assert_eq!(config.remaps, RemapTable::shipped());
        assert_eq!(config.terminal_bindings.len(), 1);
        assert_eq!(config.terminal_bindings[0].combo, KeyCombo::ctrl('j'));
        let beginning = CommandId::from("terminal-beginning");
        assert_eq!(
            config.terminal_commands.sequence(&beginning),
            Some(&[KeyCombo::ctrl('a')][..])
        );
        assert!(
            config
                .terminal_commands
                .recognizes(&CommandId::from(command::SEND_RETURN))
        );
    }

    #[test]
    fn command_in_remap_and_sync_is_rejected() {
        let errors = parse_config(
            r#"
[integration]
sync = ["undo"]

[remap]
undo = "terminal-undo"
"#,
        )
        .unwrap_err();
        assert!(errors.iter().any(|e| e.contains("both [remap]")));
    }

    #[test]
    fn remap_keys_equal_after_trimming_are_duplicates() {
        let errors = parse_config(
            r#"
[remap]
undo = "terminal-undo"
" undo" = "terminal-kill-line"
"#,
        )
        .unwrap_err();
        assert!(errors.iter().any(|e| e == "Duplicate 'undo' in [remap]"));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let errors = parse_config("[integration]\npolicy = \"eager\"\n").unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Unknown policy 'eager'")));
    }

    #[test]
    fn duplicate_terminal_binding_is_rejected() {
        let errors = parse_config(
            r#"
[terminal.bindings]
"C-j" = "terminal-send-return"
"ctrl-j" = "terminal-interrupt"
"#,
        )
        .unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.contains("Duplicate key") && e.contains("terminal bindings"))
        );
    }

    #[test]
    fn empty_key_sequence_is_rejected() {
        let errors = parse_config("[terminal.commands]\nterminal-noop = []\n").unwrap_err();
        assert!(errors.iter().any(|e| e.contains("needs 1 to")));
    }

    #[test]
    fn bad_key_in_sequence_is_rejected() {
        let errors =
            parse_config("[terminal.commands]\nterminal-odd = [\"C-nope\"]\n").unwrap_err();
        assert!(errors.iter().any(|e| e.contains("terminal-odd")));
    }

    #[test]
    fn load_config_falls_back_with_warning() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[remap]\nundo = \"\"\n");

        let (config, warnings) = load_config(Some(&path), false);
        assert_eq!(config, IntegrationConfig::default());
        assert!(warnings.iter().any(|w| w.contains("empty command name")));
        assert!(warnings.iter().any(|w| w.contains("Falling back")));
    }

    #[test]
    fn load_config_rejects_oversized_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let oversized = "#".repeat(MAX_CONFIG_FILE_BYTES as usize + 1);
        let path = write_config(&dir, &oversized);

        let (config, warnings) = load_config(Some(&path), false);
        assert_eq!(config, IntegrationConfig::default());
        assert!(
            warnings
                .iter()
                .any(|w| w.contains("file too large") && w.contains("Refusing to read"))
        );
    }

    #[test]
    fn load_config_rejects_excessive_bindings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut content = String::from("[terminal.bindings]\n");
        for i in 0..=MAX_ENTRIES_PER_TABLE {
            content.push_str(&format!("\"F{}\" = \"terminal-send-return\"\n", i));
        }
        let path = write_config(&dir, &content);

        let (config, warnings) = load_config(Some(&path), false);
        assert_eq!(config, IntegrationConfig::default());
        assert!(
            warnings
                .iter()
                .any(|w| w.contains("Too many terminal bindings"))
        );
    }

    #[test]
    fn load_config_rejects_unknown_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[integration]\nmode = \"terminal\"\n");

        let (config, warnings) = load_config(Some(&path), false);
        assert_eq!(config, IntegrationConfig::default());
        assert!(warnings.iter().any(|w| w.contains("Failed to parse")));
    }

    #[test]
    fn valid_file_is_loaded_without_warnings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[terminal.bindings]\nTab = \"terminal-send-tab\"\n");

        let (config, warnings) = load_config(Some(&path), false);
        assert!(warnings.is_empty(), "{:?}", warnings);
        assert_eq!(config.terminal_bindings[0].combo, KeyCombo::plain(KeyCode::Tab));
    }
}
