/// Loads `.env` from the working directory when present. Variables already
/// set in the process environment are not overridden.
pub async fn init_env() {
    dotenvy::dotenv().ok();
}
