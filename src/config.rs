use serde::{Deserialize, Serialize};

/// Explorer Service Configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExplorerConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Data file configuration
    pub data: DataConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (default: 5000)
    pub port: u16,

    /// Worker threads
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Bincode file holding one latent vector per catalog item
    pub vectors_path: String,

    /// Bincode file holding the session starting vector
    pub starting_location_path: String,

    /// JSON array of movie metadata records
    pub catalog_path: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                workers: None,
            },
            data: DataConfig {
                vectors_path: "./data/movie_vectors.bin".to_string(),
                starting_location_path: "./data/starting_location.bin".to_string(),
                catalog_path: "./data/movie_data.json".to_string(),
            },
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from environment and config file, layered
    /// over the built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&ExplorerConfig::default())?)
            .add_source(config::File::with_name("config/explorer").required(false))
            .add_source(config::Environment::with_prefix("EXPLORER").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
