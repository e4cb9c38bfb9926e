//! Process-wide crash hooks
//!
//! Opt-in only: nothing here runs unless the host calls
//! [`install_panic_hook`] explicitly, and the logger is passed in rather
//! than discovered through ambient state.

use crate::core::{ErrorPayload, Logger};
use std::backtrace::Backtrace;

/// Install a panic hook that funnels panics into `logger` as exceptions
///
/// The hook records the panic message and a captured backtrace as the
/// exception stack, flushes so the event is not lost to process teardown,
/// then chains to the previously installed hook.
///
/// # Example
///
/// ```no_run
/// use sievelog::hooks::install_panic_hook;
/// use sievelog::prelude::*;
///
/// let logger = Logger::builder().sink(ConsoleSink::new()).build();
/// install_panic_hook(logger.clone());
/// ```
pub fn install_panic_hook(logger: Logger) {
    let previous = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "panic with non-string payload".to_string()
        };

        let stack = Backtrace::force_capture().to_string();
        logger.exception(ErrorPayload::new(message).with_stack(stack));
        logger.flush();

        previous(info);
    }));
}
