//! Remapping of editor commands onto terminal-native commands.
//!
//! The overlay is built once from a snapshot of the editor's NORMAL keymap;
//! later edits to that keymap are not picked up until the overlay is rebuilt.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::command::{self, Command, CommandId, TerminalCommands};
use crate::error::{Error, Result};
use crate::keymap::{Binding, Keymap};
use crate::keys::KeyCombo;
use crate::overlay::OVERLAY_KEYMAP;

/// What happens to NORMAL bindings that have no remap entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncPolicy {
    /// Leave them unbound in the overlay; position sync relies on mode hooks.
    #[default]
    HooksOnly,
    /// Wrap each of them in a sync-then-delegate command.
    SyncBeforeDelegate,
}

impl SyncPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HooksOnly => "hooks-only",
            Self::SyncBeforeDelegate => "sync-before-delegate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hooks-only" | "hooks" => Some(Self::HooksOnly),
            "sync-before-delegate" | "sync" => Some(Self::SyncBeforeDelegate),
            _ => None,
        }
    }
}

/// One row of the remap table. A `None` replacement asks for a generated
/// sync-then-delegate command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemapEntry {
    pub source: CommandId,
    pub replacement: Option<CommandId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemapTable {
    entries: BTreeMap<CommandId, Option<CommandId>>,
}

impl RemapTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The remaps used when no configuration overrides them.
    pub fn shipped() -> Self {
        let mut table = Self::new();
        table.remap("undo", command::UNDO);
        table.remap("kill-line", command::KILL_LINE);
        table.remap("yank", command::YANK);
        table
    }

    /// Insert an entry, replacing any entry with the same source.
    pub fn insert(&mut self, entry: RemapEntry) -> Option<Option<CommandId>> {
        self.entries.insert(entry.source, entry.replacement)
    }

    pub fn remap(&mut self, source: impl Into<CommandId>, replacement: impl Into<CommandId>) {
        self.entries.insert(source.into(), Some(replacement.into()));
    }

    pub fn sync(&mut self, source: impl Into<CommandId>) {
        self.entries.insert(source.into(), None);
    }

    pub fn get(&self, source: &CommandId) -> Option<Option<&CommandId>> {
        self.entries.get(source).map(Option::as_ref)
    }

    pub fn entries(&self) -> impl Iterator<Item = RemapEntry> + '_ {
        self.entries.iter().map(|(source, replacement)| RemapEntry {
            source: source.clone(),
            replacement: replacement.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every replacement and terminal binding against the catalog.
    pub fn validate(
        &self,
        catalog: &TerminalCommands,
        terminal_bindings: &[Binding],
    ) -> Result<()> {
        for (source, replacement) in &self.entries {
            if let Some(replacement) = replacement
                && !catalog.recognizes(replacement)
            {
                return Err(Error::Configuration {
                    entry: format!("{} -> {}", source, replacement),
                    reason: format!("unknown terminal command '{}'", replacement),
                });
            }
        }
        for binding in terminal_bindings {
            if let Command::Terminal(id) = &binding.command
                && !catalog.recognizes(id)
            {
                return Err(Error::Configuration {
                    entry: format!("{} -> {}", binding.combo, id),
                    reason: format!("unknown terminal command '{}'", id),
                });
            }
        }
        Ok(())
    }

    /// Keys of `source` whose remap entry never takes effect because a
    /// terminal binding uses the same key.
    pub fn shadowed(&self, source: &Keymap, terminal_bindings: &[Binding]) -> Vec<KeyCombo> {
        source
            .bindings()
            .iter()
            .filter(|binding| match &binding.command {
                Command::Editor(id) => self.entries.contains_key(id),
                _ => false,
            })
            .filter(|binding| terminal_bindings.iter().any(|t| t.combo == binding.combo))
            .map(|binding| binding.combo)
            .collect()
    }

    /// Build the overlay keymap from a snapshot of the editor's NORMAL keymap.
    ///
    /// `terminal_bindings` come first and win over remapped keys; each key
    /// that loses its remap this way is logged as a warning. Only the
    /// snapshot's own bindings are considered, not its parents. Nothing is
    /// built when validation fails.
    pub fn build(
        &self,
        source: &Keymap,
        catalog: &TerminalCommands,
        policy: SyncPolicy,
        terminal_bindings: &[Binding],
    ) -> Result<Keymap> {
        self.validate(catalog, terminal_bindings)?;

        for combo in self.shadowed(source, terminal_bindings) {
            warn!(key = %combo, "remapped key is shadowed by a terminal binding");
        }

        let mut overlay = Keymap::new(OVERLAY_KEYMAP);
        for binding in terminal_bindings {
            overlay.bind(binding.combo, binding.command.clone());
        }

        for binding in source.bindings() {
            if overlay.binds(&binding.combo) {
                continue;
            }
            let Command::Editor(source_id) = &binding.command else {
                continue;
            };
            let command = match self.entries.get(source_id) {
                Some(Some(replacement)) => Command::Terminal(replacement.clone()),
                Some(None) => Command::SyncThenDelegate(source_id.clone()),
                None if policy == SyncPolicy::SyncBeforeDelegate => {
                    Command::SyncThenDelegate(source_id.clone())
                }
                None => continue,
            };
            overlay.bind(binding.combo, command);
        }

        debug!(
            source = %source.id(),
            bindings = overlay.len(),
            policy = policy.name(),
            "built overlay"
        );
        Ok(overlay)
    }
}

impl FromIterator<RemapEntry> for RemapTable {
    fn from_iter<I: IntoIterator<Item = RemapEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}
