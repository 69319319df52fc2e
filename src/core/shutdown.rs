//! # OS termination signals that trigger a shutdown run.
//!
//! Provides [`wait_for_shutdown_signal`], an async helper that completes when the process
//! receives a termination signal and reports which one. Used by
//! [`ShutdownSequence::run_on_signal`](crate::ShutdownSequence::run_on_signal).
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT` (quit signal, often used for core dumps or hard stop)
//!
//! **Other platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]
//!
//! Listeners are registered when the returned future is first polled; a signal raised
//! before that keeps its default disposition.

/// Waits for a termination signal and returns its name (`"SIGINT"`, `"SIGTERM"`, `"SIGQUIT"`).
///
/// Fails if a signal listener cannot be registered.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    let name = tokio::select! {
        _ = sigint.recv()  => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
        _ = sigquit.recv() => "SIGQUIT",
    };
    Ok(name)
}

/// Waits for Ctrl-C and returns `"ctrl-c"`.
///
/// Fails if the Ctrl-C listener cannot be registered.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("ctrl-c")
}

/// Sends `SIGTERM` to the current process every 50ms until `done` resolves.
///
/// The caller must have a `SIGTERM` listener installed first, otherwise the default
/// disposition terminates the test binary.
#[cfg(all(test, unix))]
pub(crate) async fn sigterm_until<F: std::future::Future>(done: F) -> F::Output {
    let pid = std::process::id().to_string();
    tokio::pin!(done);
    loop {
        tokio::select! {
            out = &mut done => return out,
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                std::process::Command::new("kill")
                    .args(["-TERM", &pid])
                    .status()
                    .expect("kill is available on unix");
            }
        }
    }
}
