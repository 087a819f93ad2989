//! Existence checks against web resources.

use std::marker::PhantomData;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::checker::{Checker, FetchState};
use crate::error::CheckError;
use crate::http::{HttpClient, HttpResponse};

/// ArcGIS Online item detail endpoint.
pub const ARCGIS_ONLINE_ITEM_URL: &str = "https://www.arcgis.com/sharing/rest/content/items/";
/// Utah open data portal dataset pages.
pub const OPEN_DATA_DATASET_URL: &str = "https://opendata.gis.utah.gov/datasets/";

/// A web resource addressed by a dataset name.
pub trait RemoteResource {
    /// Display name used in logs and reports.
    const NAME: &'static str;

    /// URL of the resource describing `name`.
    fn url(name: &str) -> String;

    /// Decide existence from the fetched response.
    fn interpret(response: &HttpResponse) -> Result<bool, CheckError>;
}

/// An ArcGIS Online item, addressed by item id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArcGisOnline;

impl RemoteResource for ArcGisOnline {
    const NAME: &'static str = "arcgis online";

    fn url(item_id: &str) -> String {
        format!("{ARCGIS_ONLINE_ITEM_URL}{item_id}")
    }

    /// The item endpoint answers `200` either way; a found item has an
    /// `owner`, a missing or private one an `error` object. Any other body is
    /// reported as missing.
    fn interpret(response: &HttpResponse) -> Result<bool, CheckError> {
        let body = response.json()?;

        match body.as_object() {
            Some(item) if item.contains_key("owner") => Ok(true),
            Some(item) if item.contains_key("error") => Ok(false),
            _ => {
                #[cfg(feature = "tracing")]
                warn!(status = response.status, "item response has neither `owner` nor `error`");

                Ok(false)
            }
        }
    }
}

/// An open data portal dataset page, addressed by dataset title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenData;

impl OpenData {
    /// Portal slug for a dataset title: lower case, whitespace as `-`.
    pub fn slug(name: &str) -> String {
        name.chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .collect::<String>()
            .to_lowercase()
    }
}

impl RemoteResource for OpenData {
    const NAME: &'static str = "open data";

    fn url(name: &str) -> String {
        format!("{OPEN_DATA_DATASET_URL}{}", Self::slug(name))
    }

    /// Missing datasets redirect to a search page, so anything but `200` is missing.
    fn interpret(response: &HttpResponse) -> Result<bool, CheckError> {
        Ok(response.status == 200)
    }
}

/// Fetches a URL derived from a dataset name and interprets the response.
pub struct UrlChecker<H: HttpClient, R: RemoteResource> {
    name: String,
    url: String,
    client: H,
    data: FetchState<HttpResponse>,
    resource: PhantomData<R>,
}

pub type ArcGisOnlineChecker<H> = UrlChecker<H, ArcGisOnline>;
pub type OpenDataChecker<H> = UrlChecker<H, OpenData>;

impl<H: HttpClient, R: RemoteResource> UrlChecker<H, R> {
    pub fn new(name: &str, client: H) -> Self {
        Self {
            name: name.to_string(),
            url: R::url(name),
            client,
            data: FetchState::Pending,
            resource: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Use `response` instead of fetching.
    pub fn with_data(mut self, response: HttpResponse) -> Self {
        self.set_data(response);
        self
    }

    pub fn set_data(&mut self, response: HttpResponse) {
        self.data = FetchState::Ready(response);
    }

    pub fn data(&self) -> &FetchState<HttpResponse> {
        &self.data
    }
}

impl<H: HttpClient, R: RemoteResource> Checker for UrlChecker<H, R> {
    type Outcome = bool;

    fn get_data(&mut self) -> Result<(), CheckError> {
        #[cfg(feature = "tracing")]
        debug!(resource = R::NAME, url = %self.url, "fetching");

        let response = self.client.get(&self.url)?;
        self.data = FetchState::Ready(response);
        Ok(())
    }

    fn exists(&mut self) -> Result<bool, CheckError> {
        if self.data.is_pending() {
            self.get_data()?;
        }

        match self.data.as_ready() {
            Some(response) => R::interpret(response),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_arcgis_url() {
        assert_eq!(
            ArcGisOnline::url("item_id"),
            "https://www.arcgis.com/sharing/rest/content/items/item_id"
        );
    }

    #[rstest]
    #[case("UPPER CASED Name", "upper-cased-name")]
    #[case("found layer name", "found-layer-name")]
    #[case("tabbed\tname", "tabbed-name")]
    #[case("double  space", "double--space")]
    #[case("already-slugged", "already-slugged")]
    fn test_open_data_slug(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(OpenData::slug(name), expected);
    }

    #[test]
    fn test_open_data_url() {
        assert_eq!(
            OpenData::url("UPPER CASED Name"),
            "https://opendata.gis.utah.gov/datasets/upper-cased-name"
        );
    }

    #[rstest]
    #[case(r#"{"id": "3080c0a2859a4d23a279e17e17c703c8", "owner": "UtahAGRC"}"#, true)]
    #[case(r#"{"error": {"code": 400, "messageCode": "CONT_0001"}}"#, false)]
    #[case(r#"{"id": "3080c0a2859a4d23a279e17e17c703c8"}"#, false)]
    #[case("[]", false)]
    fn test_arcgis_interpret(#[case] body: &str, #[case] expected: bool) {
        let response = HttpResponse::new(200, body);
        assert_eq!(ArcGisOnline::interpret(&response).unwrap(), expected);
    }

    #[test]
    fn test_arcgis_interpret_rejects_non_json() {
        let response = HttpResponse::new(502, "Bad Gateway");
        assert!(ArcGisOnline::interpret(&response).is_err());
    }

    #[rstest]
    #[case(200, true)]
    #[case(301, false)]
    #[case(404, false)]
    #[case(500, false)]
    fn test_open_data_interpret(#[case] status: u16, #[case] expected: bool) {
        let response = HttpResponse::new(status, "");
        assert_eq!(OpenData::interpret(&response).unwrap(), expected);
    }
}
