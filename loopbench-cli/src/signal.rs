//! Ctrl-C handling
//!
//! On Unix a SIGINT handler sets a flag; a single watcher thread turns the
//! flag into a cancellation request on the most recently registered token.
//! The handler resets itself after the first signal, so a second Ctrl-C
//! terminates the process. On other platforms Ctrl-C keeps its default
//! behaviour.

use loopbench_core::CancellationToken;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, Once, PoisonError};
use std::time::Duration;

/// Set by the SIGINT handler.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Token the watcher cancels on the next interrupt
static ACTIVE_TOKEN: TokenSlot = Mutex::new(None);

static WATCHER: Once = Once::new();

/// How often the watcher thread polls the flag
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Install the SIGINT handler. The handler is async-signal-safe (only sets an atomic).
#[cfg(unix)]
fn install_sigint_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigint_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART | libc::SA_RESETHAND;
        libc::sigemptyset(&mut sa.sa_mask);
        libc::sigaction(libc::SIGINT, &sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigint_handler(_sig: libc::c_int) {
    INTERRUPTED.store(true, Ordering::Relaxed);
}

/// No-op on non-Unix.
#[cfg(not(unix))]
fn install_sigint_handler() {}

type TokenSlot = Mutex<Option<CancellationToken>>;

fn set_token(slot: &TokenSlot, token: CancellationToken) {
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
}

fn deliver_interrupt(slot: &TokenSlot) {
    let token = slot.lock().unwrap_or_else(PoisonError::into_inner).clone();
    if let Some(token) = token {
        eprintln!("\nInterrupted: finishing the current variant, skipping the rest");
        tracing::warn!("cancellation requested");
        token.cancel();
    }
}

/// Cancel `token` when the user presses Ctrl-C
///
/// Replaces any token registered by an earlier call. The watcher thread is
/// started on the first call and shared by all later ones.
pub fn cancel_on_interrupt(token: CancellationToken) {
    set_token(&ACTIVE_TOKEN, token);
    install_sigint_handler();
    WATCHER.call_once(spawn_watcher);
}

fn spawn_watcher() {
    let spawned = std::thread::Builder::new()
        .name("loopbench-sigint".to_string())
        .spawn(|| {
            loop {
                if INTERRUPTED.swap(false, Ordering::Relaxed) {
                    deliver_interrupt(&ACTIVE_TOKEN);
                }
                std::thread::sleep(POLL_INTERVAL);
            }
        });

    if let Err(e) = spawned {
        tracing::warn!(error = %e, "could not start interrupt watcher");
    }
}
