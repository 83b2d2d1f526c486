#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://films.db?mode=rwc".to_string());

        let log_filter = std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "info,filmdb=debug,sqlx=warn".to_string());

        Self { database_url, log_filter }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self { database_url: "sqlite::memory:".to_string(), log_filter: "warn".to_string() }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:")
    }
}
