//! Runtime initialization and setup
//!
//! This module handles application startup: logging and interrupt handling.

use crate::app::{config::AppConfig, logging::init_logging};
use crate::coordinator::CancellationToken;
use anyhow::{Context, Result};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;
use tracing::debug;

/// Initialize the application with proper logging and interrupt handlers
///
/// Returns the token the coordinator's workers poll for cancellation.
pub fn initialize_app(config: &AppConfig) -> Result<CancellationToken> {
    // Initialize logging first
    init_logging(config);

    let cancel = CancellationToken::new();
    setup_interrupt_handlers(&cancel)?;

    Ok(cancel)
}

/// Trip `cancel` on SIGINT/SIGTERM and record which signal arrived
///
/// A second signal while the flag is already set terminates the process
/// immediately with the conventional 128+signal status.
pub fn setup_interrupt_handlers(cancel: &CancellationToken) -> Result<()> {
    for signal in [SIGINT, SIGTERM] {
        flag::register_conditional_shutdown(signal, 128 + signal, cancel.flag())
            .with_context(|| format!("Failed to install handler for signal {}", signal))?;
        // handlers run in registration order: the number lands before the flag
        flag::register_usize(signal, cancel.signal_slot(), signal as usize)
            .with_context(|| format!("Failed to install handler for signal {}", signal))?;
        flag::register(signal, cancel.flag())
            .with_context(|| format!("Failed to install handler for signal {}", signal))?;
    }

    debug!("Installed SIGINT/SIGTERM handlers");
    Ok(())
}
