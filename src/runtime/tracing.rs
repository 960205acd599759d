/// Initializes the tracing/logging infrastructure for the application.
///
/// Sets up structured logging using the `tracing` crate with:
/// - **Environment-based filtering**: Controlled via `RUST_LOG`, defaulting to `info`
/// - **Compact formatting**: One line per event, without module targets
///
/// # Environment Variables
///
/// - `RUST_LOG=info` - Show info, warn, and error messages
/// - `RUST_LOG=debug` - Include store filters and update sizes
/// - `RUST_LOG=restaurant_service=debug,tower_http=debug` - Also log each HTTP request
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
