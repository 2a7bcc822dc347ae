/// Entry point for the ECS exporter.
///
/// Serves Prometheus metrics for the ECS task this process runs in. The task metadata
/// endpoint is read from `ECS_CONTAINER_METADATA_URI_V4`, which the ECS agent injects
/// into every container.
///
/// # Errors
///
/// Returns an error if initialization fails (e.g., missing environment variables or
/// the listen address cannot be bound).
///
/// # Examples
///
/// ```bash
/// ECS_CONTAINER_METADATA_URI_V4=http://169.254.170.2/v4/abc RUST_LOG=info cargo run -- --addr 0.0.0.0:9779
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    ecs_exporter::run().await
}
