use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub smtp: SmtpConfig,
    pub voting: VotingConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,  // in bytes
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub sentinel_enabled: bool,
    pub sentinel_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    pub relay: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VotingConfig {
    pub duration_secs: i64,  // deadline offset from process start
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// URL the Redis client should connect to, honouring the sentinel switch.
    pub fn redis_url(&self) -> Option<&str> {
        if self.redis.sentinel_enabled {
            self.redis.sentinel_url.as_deref()
        } else {
            Some(&self.redis.url)
        }
    }
}
