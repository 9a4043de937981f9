use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum BusType {
    Nats,
    InMemory,
}

impl BusType {
    pub fn from_env() -> Self {
        match env::var("BUS_TYPE")
            .unwrap_or_else(|_| "inmemory".to_string())
            .to_lowercase()
            .as_str()
        {
            "nats" => BusType::Nats,
            "inmemory" => BusType::InMemory,
            _ => {
                tracing::warn!("Unknown BUS_TYPE, defaulting to inmemory");
                BusType::InMemory
            }
        }
    }
}

/// Module configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bus_type: BusType,
    pub nats_url: String,
    pub host: String,
    pub port: u16,
    /// Credential pair for the catalog-upload session
    pub upload_username: String,
    pub upload_password: String,
    /// Optional file to source the catalog document from instead of the
    /// embedded default
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let bus_type = BusType::from_env();

        let nats_url =
            env::var("NATS_URL").unwrap_or_else(|_| "nats://localhost:4222".to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8093".to_string())
            .parse()
            .map_err(|_| "PORT must be a valid u16".to_string())?;

        let upload_username =
            env::var("CATALOG_UPLOAD_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let upload_password =
            env::var("CATALOG_UPLOAD_PASSWORD").unwrap_or_else(|_| "password".to_string());

        let catalog_path = env::var("CATALOG_PATH").ok().map(PathBuf::from);

        Ok(Config {
            bus_type,
            nats_url,
            host,
            port,
            upload_username,
            upload_password,
            catalog_path,
        })
    }
}
