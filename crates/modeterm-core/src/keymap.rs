//! Keymaps and the per-surface chain they are consulted through.
//!
//! A surface resolves a key by walking, in order:
//! 1. the overlay list (front = highest precedence),
//! 2. the keymap of the current mode, including its parents,
//! 3. the base keymap (the terminal session's own defaults).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::command::Command;
use crate::keys::KeyCombo;
use crate::mode::EditorMode;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeymapId(String);

impl KeymapId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeymapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub combo: KeyCombo,
    pub command: Command,
}

impl Binding {
    pub fn new(combo: KeyCombo, command: Command) -> Self {
        Self { combo, command }
    }
}

/// An ordered set of key bindings with an optional fallback parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keymap {
    id: KeymapId,
    bindings: Vec<Binding>,
    parent: Option<Arc<Keymap>>,
}

impl Keymap {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: KeymapId::new(id),
            bindings: Vec::new(),
            parent: None,
        }
    }

    pub fn with_parent(id: impl Into<String>, parent: Arc<Keymap>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new(id)
        }
    }

    /// Builder form of [`bind`](Self::bind).
    pub fn with(mut self, combo: KeyCombo, command: Command) -> Self {
        self.bind(combo, command);
        self
    }

    /// Bind `combo`, replacing an existing binding for the identical combo.
    pub fn bind(&mut self, combo: KeyCombo, command: Command) {
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.combo == combo) {
            existing.command = command;
        } else {
            self.bindings.push(Binding { combo, command });
        }
    }

    pub fn id(&self) -> &KeymapId {
        &self.id
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn parent(&self) -> Option<&Arc<Keymap>> {
        self.parent.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether this keymap itself (not its parents) binds exactly `combo`.
    pub fn binds(&self, combo: &KeyCombo) -> bool {
        self.bindings.iter().any(|b| b.combo == *combo)
    }

    /// Look up a key in this keymap only. Bindings with modifiers win over
    /// bare ones when both match.
    pub fn lookup_own(&self, key: &KeyCombo) -> Option<&Command> {
        self.bindings
            .iter()
            .filter(|binding| !binding.combo.modifiers.is_empty())
            .find(|binding| binding.combo.matches(key))
            .or_else(|| {
                self.bindings
                    .iter()
                    .filter(|binding| binding.combo.modifiers.is_empty())
                    .find(|binding| binding.combo.matches(key))
            })
            .map(|binding| &binding.command)
    }

    /// Look up a key here, then through the parent chain.
    pub fn lookup(&self, key: &KeyCombo) -> Option<&Command> {
        let mut current = Some(self);
        while let Some(keymap) = current {
            if let Some(command) = keymap.lookup_own(key) {
                return Some(command);
            }
            current = keymap.parent.as_deref();
        }
        None
    }
}

/// Ordered keymaps consulted by one editing surface.
#[derive(Clone, Debug, Default)]
pub struct KeymapChain {
    overlays: Vec<Arc<Keymap>>,
    modes: HashMap<EditorMode, Arc<Keymap>>,
    base: Option<Arc<Keymap>>,
}

impl KeymapChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlays(&self) -> &[Arc<Keymap>] {
        &self.overlays
    }

    pub fn insert_front(&mut self, keymap: Arc<Keymap>) {
        self.overlays.insert(0, keymap);
    }

    /// Remove every overlay with the given id, returning how many were removed.
    pub fn remove_all(&mut self, id: &KeymapId) -> usize {
        let before = self.overlays.len();
        self.overlays.retain(|keymap| keymap.id() != id);
        before - self.overlays.len()
    }

    pub fn count(&self, id: &KeymapId) -> usize {
        self.overlays.iter().filter(|keymap| keymap.id() == id).count()
    }

    pub fn contains(&self, id: &KeymapId) -> bool {
        self.count(id) > 0
    }

    pub fn mode_keymap(&self, mode: EditorMode) -> Option<&Arc<Keymap>> {
        self.modes.get(&mode)
    }

    /// Set or clear the keymap for a mode, returning the previous one.
    pub fn set_mode_keymap(
        &mut self,
        mode: EditorMode,
        keymap: Option<Arc<Keymap>>,
    ) -> Option<Arc<Keymap>> {
        match keymap {
            Some(keymap) => self.modes.insert(mode, keymap),
            None => self.modes.remove(&mode),
        }
    }

    pub fn base(&self) -> Option<&Arc<Keymap>> {
        self.base.as_ref()
    }

    pub fn set_base(&mut self, keymap: Option<Arc<Keymap>>) {
        self.base = keymap;
    }

    /// Resolve a key for a surface currently in `mode`.
    pub fn resolve(&self, mode: EditorMode, key: &KeyCombo) -> Option<&Command> {
        self.overlays
            .iter()
            .find_map(|keymap| keymap.lookup_own(key))
            .or_else(|| self.modes.get(&mode).and_then(|keymap| keymap.lookup(key)))
            .or_else(|| self.base.as_ref().and_then(|keymap| keymap.lookup(key)))
    }
}
