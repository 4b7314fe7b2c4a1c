use crate::client::FitnessApi;
use crate::config::Config;
use crate::errors::FitnessError;
use crate::unwrap::ResponseUnwrapper;

#[derive(Clone)]
pub struct AppState {
    pub api: FitnessApi,
    pub unwrapper: ResponseUnwrapper,
}

impl AppState {
    pub fn new(api: FitnessApi, unwrapper: ResponseUnwrapper) -> Self {
        Self { api, unwrapper }
    }

    pub fn from_config(config: &Config) -> Result<Self, FitnessError> {
        let api = FitnessApi::new(config.api_base_url.clone(), config.request_timeout)?;
        Ok(Self::new(api, ResponseUnwrapper::new(config.extraction)))
    }
}
