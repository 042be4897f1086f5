use serde::Deserialize;

/// Argon2id work-factor knobs. The cost directly trades request latency
/// against brute-force resistance, so it is explicit configuration rather
/// than an implicit library default.
#[derive(Debug, Clone, Deserialize)]
pub struct HashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        // Argon2id v19 defaults.
        Self {
            memory_kib: 19456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub schema: String,
    pub table: String,
    pub hash: HashConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let schema =
            std::env::var("APP_DB_SCHEMA").unwrap_or_else(|_| "registered_accounts".into());
        let table = std::env::var("APP_DB_TABLE").unwrap_or_else(|_| "registered".into());
        let defaults = HashConfig::default();
        let hash = HashConfig {
            memory_kib: std::env::var("ARGON2_MEMORY_KIB")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(defaults.memory_kib),
            iterations: std::env::var("ARGON2_ITERATIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(defaults.iterations),
            parallelism: std::env::var("ARGON2_PARALLELISM")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(defaults.parallelism),
        };
        Ok(Self {
            database_url,
            schema,
            table,
            hash,
        })
    }
}
