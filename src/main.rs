//! Caller ID Router entry point
//!
//! Initializes configuration, the provider client and services, and starts
//! the HTTP server.

use caller_id_router::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
