use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub jwt_secret: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_zone_sync_interval")]
    pub zone_sync_interval_seconds: u64,

    #[serde(default = "default_max_db_connections")]
    pub max_db_connections: u32,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    listen_addr: Option<String>,
    log_dir: Option<String>,
    zone_sync_interval_seconds: Option<u64>,
    max_db_connections: Option<u32>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_zone_sync_interval() -> u64 {
    60
}

fn default_max_db_connections() -> u32 {
    10
}

impl ServerConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self, String> {
        dotenv::dotenv().ok();

        let env_config: PartialServerConfig = envy::from_env::<PartialServerConfig>()
            .map_err(|e| format!("Failed to load config from environment: {e}"))?;

        Self::layered(config_path, env_config)
    }

    fn layered(config_path: Option<&str>, env_config: PartialServerConfig) -> Result<Self, String> {
        // 1. Load from file (optional)
        let file_config: PartialServerConfig = match config_path {
            Some(path_str) => {
                let path = Path::new(path_str);
                if path.exists() {
                    let contents = fs::read_to_string(path)
                        .map_err(|e| format!("Failed to read config file at {path:?}: {e}"))?;
                    toml::from_str(&contents).map_err(|e| {
                        format!("Failed to parse TOML from config file at {path:?}: {e}")
                    })?
                } else {
                    PartialServerConfig::default()
                }
            }
            None => PartialServerConfig::default(),
        };

        // 2. Merge: environment overrides file
        Ok(ServerConfig {
            database_url: env_config
                .database_url
                .or(file_config.database_url)
                .ok_or("DATABASE_URL is required")?,
            jwt_secret: env_config
                .jwt_secret
                .or(file_config.jwt_secret)
                .ok_or("JWT_SECRET is required")?,
            listen_addr: env_config
                .listen_addr
                .or(file_config.listen_addr)
                .unwrap_or_else(default_listen_addr),
            log_dir: env_config
                .log_dir
                .or(file_config.log_dir)
                .unwrap_or_else(default_log_dir),
            zone_sync_interval_seconds: env_config
                .zone_sync_interval_seconds
                .or(file_config.zone_sync_interval_seconds)
                .unwrap_or_else(default_zone_sync_interval),
            max_db_connections: env_config
                .max_db_connections
                .or(file_config.max_db_connections)
                .unwrap_or_else(default_max_db_connections),
        })
    }
}
