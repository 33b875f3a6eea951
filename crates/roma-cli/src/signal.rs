//! Process signal handling.
//!
//! SIGINT prints a notice and lets the process keep running; an in-flight
//! child process receives the terminal's SIGINT on its own and terminates
//! independently. SIGQUIT prints a notice and ends the run with status 0.

use miette::Result;

/// Install both handlers. Called once at startup; they stay registered for
/// the process lifetime.
pub fn install() -> Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nroma: interrupt received");
    })
    .map_err(|e| miette::miette!("failed to install interrupt handler: {e}"))?;

    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGQUIT, on_quit as libc::sighandler_t);
    }

    Ok(())
}

/// SIGQUIT handler. Runs in signal context, so it is restricted to
/// async-signal-safe calls: a raw write followed by `_exit`.
#[cfg(unix)]
extern "C" fn on_quit(_sig: libc::c_int) {
    const MSG: &[u8] = b"\nroma: quit signal received\n";
    unsafe {
        libc::write(libc::STDERR_FILENO, MSG.as_ptr().cast(), MSG.len());
        libc::_exit(0);
    }
}
