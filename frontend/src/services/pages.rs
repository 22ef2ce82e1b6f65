//! HTTP page fetcher.
//!
//! Downloads a page document with `gloo-net`, parses it with the browser's
//! `DOMParser` and keeps the title and the content region's inner markup.

use gloo_net::http::Request;
use web_sys::{DomParser, SupportedType};

use crate::router::{FetchedPage, PageFetcher};
use crate::types::{AppError, AppResult};

/// Fetches same-origin page documents.
pub struct HttpPageFetcher {
    region_id: String,
}

impl HttpPageFetcher {
    /// `region_id` names the element whose content is extracted.
    pub fn new(region_id: impl Into<String>) -> Self {
        Self {
            region_id: region_id.into(),
        }
    }
}

impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> AppResult<FetchedPage> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("{}: {}", url, e)))?;

        if !response.ok() {
            return Err(AppError::Http {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let raw = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("{}: {}", url, e)))?;

        parse_page(raw, &self.region_id, url)
    }
}

fn parse_page(raw: String, region_id: &str, url: &str) -> AppResult<FetchedPage> {
    let parser = DomParser::new().map_err(|e| AppError::Dom(format!("{:?}", e)))?;
    let document = parser
        .parse_from_string(&raw, SupportedType::TextHtml)
        .map_err(|e| AppError::Dom(format!("{:?}", e)))?;

    let region = document
        .get_element_by_id(region_id)
        .ok_or_else(|| AppError::MissingRegion {
            url: url.to_string(),
            region: region_id.to_string(),
        })?;

    Ok(FetchedPage {
        title: document.title(),
        content: region.inner_html(),
        raw,
    })
}
