//! Per-surface lifecycle of the terminal integration.

use std::sync::Arc;

use crossterm::event::KeyCode;
use tracing::{debug, info, warn};

use crate::bridge::PositionBridge;
use crate::command::{self, Command, TerminalCommands};
use crate::error::{Error, Result};
use crate::interceptor::TerminalExitInsert;
use crate::keymap::{Binding, Keymap};
use crate::keys::KeyCombo;
use crate::mode::EditorMode;
use crate::overlay::{ModeOverlay, ModeSync};
use crate::remap::{RemapTable, SyncPolicy};
use crate::surface::{EditorSurface, SubscriptionId, SurfaceId};
use crate::terminal_mode::{TerminalNormalLike, terminal_keymap};

/// Everything the integration needs to build its overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegrationConfig {
    pub remaps: RemapTable,
    /// Overlay-only bindings for terminal-specific commands.
    pub terminal_bindings: Vec<Binding>,
    pub terminal_commands: TerminalCommands,
    pub policy: SyncPolicy,
}

impl IntegrationConfig {
    pub fn default_terminal_bindings() -> Vec<Binding> {
        vec![
            Binding::new(
                KeyCombo::plain(KeyCode::Enter),
                Command::terminal(command::SEND_RETURN),
            ),
            Binding::new(KeyCombo::ctrl('c'), Command::terminal(command::INTERRUPT)),
        ]
    }

    /// Build the overlay keymap for a NORMAL keymap snapshot.
    pub fn build_overlay(&self, normal: &Keymap) -> Result<Keymap> {
        self.remaps.build(
            normal,
            &self.terminal_commands,
            self.policy,
            &self.terminal_bindings,
        )
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            remaps: RemapTable::shipped(),
            terminal_bindings: Self::default_terminal_bindings(),
            terminal_commands: TerminalCommands::default(),
            policy: SyncPolicy::default(),
        }
    }
}

#[derive(Debug)]
struct Installed {
    surface: SurfaceId,
    overlay: ModeOverlay,
    subscription: SubscriptionId,
}

/// Enables and disables the terminal integration on one editing surface.
///
/// `enable` either installs everything or nothing; `disable` undoes it and
/// leaves the surface in NORMAL if it was in TERMINAL. Both are idempotent.
///
/// An integration is bound to the surface it was enabled on. Enabling it on
/// another surface, or on a surface that already carries an integration, is
/// an [`Error::Lifecycle`]. Disabling it on any other surface does nothing.
#[derive(Debug)]
pub struct TerminalIntegration {
    config: Arc<IntegrationConfig>,
    bridge: PositionBridge,
    installed: Option<Installed>,
}

impl TerminalIntegration {
    pub fn new(config: IntegrationConfig) -> Self {
        Self {
            config: Arc::new(config),
            bridge: PositionBridge,
            installed: None,
        }
    }

    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.installed.is_some()
    }

    /// The surface this integration is installed on.
    pub fn surface(&self) -> Option<SurfaceId> {
        self.installed.as_ref().map(|installed| installed.surface)
    }

    pub fn overlay(&self) -> Option<&ModeOverlay> {
        self.installed.as_ref().map(|installed| &installed.overlay)
    }

    pub fn enable(&mut self, surface: &mut dyn EditorSurface) -> Result<()> {
        if let Some(installed) = &self.installed {
            if installed.surface == surface.id() {
                return Ok(());
            }
            warn!(
                surface = %surface.id(),
                enabled_on = %installed.surface,
                "integration already enabled on another surface"
            );
            return Err(Error::Lifecycle {
                surface: surface.id().to_string(),
                reason: format!(
                    "integration is already enabled on surface {}",
                    installed.surface
                ),
            });
        }
        if !surface.is_terminal_backed() {
            warn!(surface = %surface.id(), "refusing to enable on a plain surface");
            return Err(Error::Precondition {
                surface: surface.id().to_string(),
                operation: "enabling the terminal integration",
            });
        }

        if carries_integration(surface) {
            warn!(surface = %surface.id(), "surface already carries a terminal integration");
            return Err(Error::Lifecycle {
                surface: surface.id().to_string(),
                reason: "surface already carries a terminal integration".to_string(),
            });
        }

        let normal = surface.normal_keymap();
        let overlay = ModeOverlay::new(Arc::new(self.config.build_overlay(&normal)?));

        let bridge = self.bridge;
        surface
            .keymaps_mut()
            .set_mode_keymap(EditorMode::Terminal, Some(Arc::new(terminal_keymap(normal))));
        surface
            .exit_insert_hook_mut()
            .install(|original| Arc::new(TerminalExitInsert::new(original, bridge)));
        surface
            .normal_like_hook_mut()
            .install(|original| Arc::new(TerminalNormalLike::new(original)));
        let subscription = surface.subscribe(Arc::new(ModeSync::new(overlay.clone(), bridge)));

        info!(
            surface = %surface.id(),
            overlay_bindings = overlay.keymap().len(),
            "terminal integration enabled"
        );
        self.installed = Some(Installed {
            surface: surface.id(),
            overlay,
            subscription,
        });
        Ok(())
    }

    pub fn disable(&mut self, surface: &mut dyn EditorSurface) {
        let surface_id = surface.id();
        match &self.installed {
            None => return,
            Some(installed) if installed.surface != surface_id => {
                debug!(
                    surface = %surface_id,
                    enabled_on = %installed.surface,
                    "ignoring disable on a surface the integration is not installed on"
                );
                return;
            }
            Some(_) => {}
        }
        let Some(installed) = self.installed.take() else {
            return;
        };
        if surface.mode() == EditorMode::Terminal {
            surface.switch_mode(EditorMode::Normal);
        }
        installed.overlay.deactivate(surface);
        surface.unsubscribe(installed.subscription);
        surface.exit_insert_hook_mut().uninstall();
        surface.normal_like_hook_mut().uninstall();
        surface
            .keymaps_mut()
            .set_mode_keymap(EditorMode::Terminal, None);
        info!(surface = %surface.id(), "terminal integration disabled");
    }
}

/// Whether any integration's TERMINAL keymap or exit-insert wrapper is on the
/// surface.
fn carries_integration(surface: &dyn EditorSurface) -> bool {
    surface.keymaps().mode_keymap(EditorMode::Terminal).is_some()
        || surface.exit_insert_hook().is_installed()
        || surface.normal_like_hook().is_installed()
}
