use anyhow::{Context, Result, bail};
use platform_db::DatabaseSettings;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub cors_allowed_origins: Vec<String>,
    pub seed_on_start: bool,
    pub auto_migrate: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let database = DatabaseSettings::from_env().context("invalid database settings")?;

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        let seed_on_start = env_flag("SEED_ON_START")?.unwrap_or(false);
        // A fresh in-memory database is useless without its tables.
        let auto_migrate = env_flag("AUTO_MIGRATE")?.unwrap_or(database.is_sqlite());

        Ok(Self {
            database,
            cors_allowed_origins,
            seed_on_start,
            auto_migrate,
        })
    }

    /// In-memory defaults used by tests.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            database: DatabaseSettings::default(),
            cors_allowed_origins: Vec::new(),
            seed_on_start: false,
            auto_migrate: true,
        }
    }
}

fn env_flag(key: &str) -> Result<Option<bool>> {
    match std::env::var(key) {
        Ok(raw) => parse_flag(&raw)
            .map(Some)
            .with_context(|| format!("invalid {key}")),
        Err(_) => Ok(None),
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got `{other}`"),
    }
}
