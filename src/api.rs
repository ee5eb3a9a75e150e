use serde::Deserialize;
use std::num::NonZeroU64;
use thiserror::Error;
use ureq::{Agent, RequestBuilder, typestate::WithoutBody};

pub const DEFAULT_BASE_URL: &str = "http://api.geonames.org";

/// Feature class for populated places (cities, towns, villages).
const POPULATED_PLACE: &str = "P";

//  NOTE: Response from searchJSON
#[derive(Deserialize, Debug)]
pub struct Place {
    pub name: String,
}

/// GeoNames answers 200 with a `status` object instead of `geonames` when the
/// account is unknown, over quota, or not enabled for the web services.
#[derive(Deserialize, Debug)]
pub struct ServiceStatus {
    pub message: String,
    pub value: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct SearchResponse {
    pub geonames: Option<Vec<Place>>,
    pub status: Option<ServiceStatus>,
}

impl SearchResponse {
    /// Names in the order the service returned them.
    pub fn into_names(self) -> Result<Vec<String>, LookupError> {
        match (self.geonames, self.status) {
            (Some(places), _) => Ok(places.into_iter().map(|place| place.name).collect()),
            (None, Some(status)) => Err(LookupError::Service {
                message: status.message,
                code: status.value,
            }),
            (None, None) => Err(LookupError::MissingPlaces),
        }
    }
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{0}")]
    Status(u16),
    #[error("{0}")]
    Transport(#[from] ureq::Error),
    #[error("{message}")]
    Service { message: String, code: Option<i64> },
    #[error("response has no `geonames` field")]
    MissingPlaces,
}

/// One search: which country, how many rows, on whose account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceQuery {
    country: String,
    max_rows: NonZeroU64,
    username: String,
}

impl PlaceQuery {
    pub fn new(country: &str, max_rows: NonZeroU64, username: &str) -> Self {
        PlaceQuery {
            country: country.to_uppercase(),
            max_rows,
            username: username.to_string(),
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn max_rows(&self) -> NonZeroU64 {
        self.max_rows
    }

    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("country", self.country.clone()),
            ("featureClass", POPULATED_PLACE.to_string()),
            ("maxRows", self.max_rows.to_string()),
            ("username", self.username.clone()),
        ]
    }
}

/// Anything that can turn a query into place names.
pub trait PlaceSource {
    fn place_names(&self, query: &PlaceQuery) -> Result<Vec<String>, LookupError>;
}

#[derive(Debug)]
pub struct Api {
    pub base_api: String,
    pub agent: Agent,
}

impl Api {
    pub fn new(base_api: &str) -> Self {
        let user_agent = concat!("placenames/", env!("CARGO_PKG_VERSION"));
        // Statuses are checked by hand so a 4xx/5xx is reported by its code.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .user_agent(user_agent)
            .build();
        let agent = Agent::new_with_config(config);

        Api {
            base_api: base_api.trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn request_api(&self, endpoint: &str, query: &PlaceQuery) -> RequestBuilder<WithoutBody> {
        let url = format!("{}/{}", self.base_api, endpoint);
        query
            .query_pairs()
            .into_iter()
            .fold(self.agent.get(&url), |req, (key, value)| req.query(key, value))
    }

    /// Search populated places of a country
    pub fn search_places(&self, query: &PlaceQuery) -> Result<Vec<String>, LookupError> {
        log::debug!(
            "searchJSON country={} maxRows={}",
            query.country(),
            query.max_rows()
        );

        let resp = self.request_api("searchJSON", query).call()?;
        let status = resp.status().as_u16();
        log::debug!("searchJSON answered {status}");
        if status != 200 {
            return Err(LookupError::Status(status));
        }

        let parsed: SearchResponse = resp.into_body().read_json()?;
        let names = parsed.into_names()?;
        log::debug!("searchJSON returned {} place(s)", names.len());

        Ok(names)
    }
}

impl PlaceSource for Api {
    fn place_names(&self, query: &PlaceQuery) -> Result<Vec<String>, LookupError> {
        self.search_places(query)
    }
}
