//! Host bridge adapters: responsibility and boundaries
//!
//! Adapters move messages between the host process and the dock engine and
//! own the single event loop the engine runs on. They MUST NOT make any
//! reconciliation decisions; matching, classification, change detection and
//! the click lock live in `services::dock`.

mod dry_run;
mod stdio;
mod r#trait;

pub use self::r#trait::create_host_bridge;

use std::time::Instant;

/// Ждёт момента снятия блокировки; без блокировки не завершается никогда
async fn wait_for_release(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
