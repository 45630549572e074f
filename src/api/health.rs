/// Liveness probe; the body is static text on purpose.
pub async fn health_check() -> &'static str {
    "reviewshelf is running"
}
