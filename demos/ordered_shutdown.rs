//! # Example: ordered_shutdown
//!
//! Demonstrates a typical service teardown with head/tail ordering.
//!
//! Shows how to:
//! - Register named and anonymous cleanup actions.
//! - Pin the HTTP listener to the front and the database to the back.
//! - Observe failures with `on_error` and every event with [`LogWriter`].
//! - Trigger the run from an OS signal (Ctrl-C) or after a short timer.
//!
//! ## Flow
//! ```text
//! register: db, cache, metrics, http, <anonymous #4>, <anonymous #5>
//! head:     http
//! tail:     db
//!
//! run order: http → unnamed-shutdown-function-5 → unnamed-shutdown-function-4
//!            → metrics → cache (fails) → db
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example ordered_shutdown --features logging
//! ```

use std::{sync::Arc, time::Duration};

use shutdown_sequence::{
    ActionError, LogWriter, SequenceConfig, ShutdownSequence, Subscribe, SyncActionFn,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let seq = Arc::new(
        ShutdownSequence::builder(SequenceConfig::default())
            .with_subscribers(subs)
            .build(),
    );

    seq.add_named_fn("db", || async {
        tokio::time::sleep(Duration::from_millis(120)).await;
        Ok(())
    });
    seq.add_named(
        "cache",
        SyncActionFn::arc(|| Err(ActionError::fail("cache directory is read-only"))),
    );
    seq.add_named_fn("metrics", || async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        Ok(())
    });
    seq.add_named_fn("http", || async {
        tokio::time::sleep(Duration::from_millis(80)).await;
        Ok(())
    });
    for _ in 0..2 {
        seq.add_fn(|| async { Ok(()) });
    }

    seq.set_head_order(["http"]);
    seq.set_tail_order(["db"]);

    seq.on_error(|err, name| eprintln!("[demo] cleanup '{name}' failed: {err}"));

    for info in seq.resolve_order() {
        println!("[demo] planned: #{} {}", info.index, info.name);
    }

    println!("[demo] press Ctrl-C to shut down (auto in 2s)");
    tokio::select! {
        res = seq.run_on_signal() => res?,
        _ = tokio::time::sleep(Duration::from_secs(2)) => seq.shutdown().await?,
    }

    println!("[demo] state: {}", seq.state());
    Ok(())
}
