//! Non-interactive rendering of the overlay a configuration produces.

use modeterm_core::IntegrationConfig;

use crate::config::defaults::playground_normal_keymap;
use crate::error::Result;

/// Build the overlay for the playground's NORMAL keymap and list its
/// bindings in precedence order, one `key -> command` per line.
pub fn render_overlay(config: &IntegrationConfig) -> Result<Vec<String>> {
    let overlay = config.build_overlay(&playground_normal_keymap())?;
    Ok(overlay
        .bindings()
        .iter()
        .map(|binding| format!("{} -> {}", binding.combo, binding.command))
        .collect())
}
