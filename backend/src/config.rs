use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub image: ImageConfig,
    pub model: ModelConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    pub size: Vec<u32>,
    pub channels: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub weights_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub request_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            image: ImageConfig {
                size: vec![224, 224],
                channels: 3,
            },
            model: ModelConfig {
                weights_path: "models/blood_group_weights.json".to_string(),
            },
            server: ServerConfig {
                request_timeout_secs: 10,
            },
        }
    }
}

impl ImageConfig {
    pub fn width(&self) -> u32 {
        self.size[0]
    }

    pub fn height(&self) -> u32 {
        self.size[1]
    }
}

impl ServiceConfig {
    /// Loads the service configuration from the YAML file named by
    /// `CONFIG_PATH` (default `config/service.yaml`). A missing file is not
    /// an error; compiled defaults are used instead.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/service.yaml".to_string());
        if !Path::new(&config_path).exists() {
            return Ok(Self::default());
        }
        let config_str = std::fs::read_to_string(&config_path)?;
        let config: ServiceConfig = serde_yaml::from_str(&config_str)?;
        Ok(config)
    }
}
