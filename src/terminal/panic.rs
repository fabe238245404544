//! Panic hook that gives the shell back before the panic is reported.

use super::setup::emergency_restore;
use std::panic;

/// Chain a terminal-restoring step in front of the current panic hook.
///
/// Install after `color_eyre::install()` so its report is what gets
/// printed, onto a usable terminal.
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        tracing::error!("panic: {}", panic_info);
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_panic_hook_does_not_panic() {
        setup_panic_hook();
        // Put the default hook back for the other tests
        let _ = panic::take_hook();
    }
}
