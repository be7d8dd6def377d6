use crate::{models::client::InferenceConfig, utils};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub inference: InferenceConfig,
}

impl ServerConfig {
    /// Read all configuration from the environment (or a `.env` file),
    /// falling back to defaults for anything that's unset.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let database_url =
            dotenvy::var("DATABASE_URL").unwrap_or_else(|_| utils::default_database_url());
        let port = match dotenvy::var("PORT") {
            Ok(port) => port
                .parse::<u16>()
                .map_err(|err| format!("invalid PORT {port:?}: {err}"))?,
            Err(_) => utils::default_port(),
        };
        let inference = InferenceConfig {
            base_url: dotenvy::var("HF_API_URL")
                .unwrap_or_else(|_| utils::default_inference_base_url()),
            model: dotenvy::var("HF_MODEL").unwrap_or_else(|_| utils::default_model()),
            api_key: dotenvy::var("HF_API_KEY")
                .ok()
                .filter(|api_key| !api_key.is_empty()),
        };
        Ok(Self {
            database_url,
            port,
            inference,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
