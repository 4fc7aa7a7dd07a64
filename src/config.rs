use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// unisock push relay server
#[derive(Parser, Serialize, Deserialize, Clone, Debug)]
#[command(name = "unisock", version, about = "unisock push relay server")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "UNISOCK_PORT", default_value = "8090")]
    pub port: u16,

    /// Bind address
    #[arg(long, env = "UNISOCK_BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Path to TOML config file
    #[arg(long, default_value = "./unisock.toml")]
    pub config: String,

    /// Enable structured JSON logging (for Docker/production)
    #[arg(long, env = "UNISOCK_JSON_LOGS")]
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8090,
            bind_address: "0.0.0.0".to_string(),
            config: "./unisock.toml".to_string(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Load config with layered precedence:
    /// built-in defaults < TOML file < env vars (UNISOCK_*) < CLI args
    pub fn load() -> Result<Self, figment::Error> {
        let cli = Config::parse();
        let config_path = cli.config.clone();

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("UNISOCK_"))
            .merge(Serialized::defaults(cli))
            .extract()
    }
}
