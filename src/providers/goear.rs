//! GoEar provider implementation (HTML search pages, XML player info)

use super::template::{has_placeholder, substitute};
use super::traits::*;
use crate::config::ProviderConfig;
use crate::error::{Result, SearchError};
use crate::network::HttpClient;
use crate::search::{LookupTarget, Page, Track, TrackDetails};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

static RESULT_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse(".results_list > li").unwrap());
static PAGINATION_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse(".pagination > li").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".title").unwrap());
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(".title a").unwrap());
static BAND: Lazy<Selector> = Lazy::new(|| Selector::parse(".band").unwrap());
static KBPS: Lazy<Selector> = Lazy::new(|| Selector::parse(".kbps").unwrap());
static LENGTH: Lazy<Selector> = Lazy::new(|| Selector::parse(".length").unwrap());
static PLAYER_TRACK: Lazy<Selector> = Lazy::new(|| Selector::parse("track").unwrap());

static LISTEN_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"listen/([^/?#]+)").unwrap());

/// GoEar music search
pub struct GoEar {
    name: String,
    client: HttpClient,
    search_url: String,
    lookup_url: String,
    track_link_url: String,
}

impl GoEar {
    /// Build from a provider config, checking its URL templates
    pub fn from_config(config: &ProviderConfig, client: HttpClient) -> Result<Self> {
        if !has_placeholder(&config.search_url, "searchTerm") {
            return Err(SearchError::Config(format!(
                "{}: search_url lacks {{searchTerm}}",
                config.name
            )));
        }
        if !has_placeholder(&config.lookup_url, "trackId") {
            return Err(SearchError::Config(format!(
                "{}: lookup_url lacks {{trackId}}",
                config.name
            )));
        }

        Ok(Self {
            name: config.name.clone(),
            client,
            search_url: config.search_url.clone(),
            lookup_url: config.lookup_url.clone(),
            track_link_url: config.track_link_url.clone(),
        })
    }

    fn search_request(&self, term: &str, page_index: u32) -> ProviderRequest {
        let encoded = urlencoding::encode(term);
        let page = page_index.to_string();
        ProviderRequest::get(substitute(
            &self.search_url,
            &[("searchTerm", &*encoded), ("pageIndex", page.as_str())],
        ))
    }

    fn lookup_request(&self, track_id: &str) -> ProviderRequest {
        let encoded = urlencoding::encode(track_id);
        ProviderRequest::get(substitute(&self.lookup_url, &[("trackId", &*encoded)]))
    }

    fn track_link(&self, track_id: &str) -> String {
        substitute(&self.track_link_url, &[("trackId", track_id)])
    }

    fn search_response(&self, response: ProviderResponse) -> Result<Page> {
        // Upstream answers 404 when a search has no results
        if response.is_not_found() {
            return Ok(Page::empty());
        }
        if !response.is_success() {
            return Err(SearchError::Upstream {
                status: response.status,
            });
        }

        self.parse_search_page(&response.text)
    }

    fn parse_search_page(&self, html: &str) -> Result<Page> {
        let document = Html::parse_document(html);

        let rows: Vec<ElementRef> = document.select(&RESULT_ITEM).collect();
        if rows.is_empty() {
            return Ok(Page::empty());
        }

        // Single-page result sets carry no pagination block
        let pages = document.select(&PAGINATION_ITEM).count().max(1);
        let total_count = (rows.len() * pages) as u64;

        let row_count = rows.len();
        let items: Vec<Track> = rows
            .into_iter()
            .filter_map(|row| {
                let track = self.parse_row(row);
                if track.is_none() {
                    debug!("{}: skipping result row without a track id", self.name);
                }
                track
            })
            .collect();

        if items.is_empty() {
            return Err(SearchError::Parse(format!(
                "none of {} result rows carries a track link",
                row_count
            )));
        }

        Ok(Page::new(items, total_count))
    }

    fn parse_row(&self, row: ElementRef) -> Option<Track> {
        let href = row.select(&TITLE_LINK).next()?.value().attr("href")?;
        let id = LISTEN_ID.captures(href)?.get(1)?.as_str().to_string();

        let artist = text_of(row, &BAND);
        let link = self.track_link(&id);

        Some(Track {
            title: text_of(row, &TITLE),
            quality: leading_number(&text_of(row, &KBPS)),
            duration: text_of(row, &LENGTH),
            artist: (!artist.is_empty()).then_some(artist),
            link: Some(link),
            id,
        })
    }

    fn lookup_response(&self, track_id: &str, response: ProviderResponse) -> Result<TrackDetails> {
        if !response.is_success() {
            return Err(SearchError::Upstream {
                status: response.status,
            });
        }

        let document = Html::parse_document(&response.text);
        let details = document.select(&PLAYER_TRACK).next().and_then(|track| {
            let attrs = track.value();
            let title = attrs.attr("title").filter(|t| !t.is_empty())?;
            let link = attrs.attr("href").filter(|h| !h.is_empty())?;
            Some(TrackDetails {
                title: title.trim().to_string(),
                artist: attrs
                    .attr("artist")
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(str::to_string),
                link: link.to_string(),
            })
        });

        details.ok_or_else(|| {
            SearchError::NotFound(format!("no extended info found for track {}", track_id))
        })
    }
}

/// Trimmed text content of the first element matching `selector`
fn text_of(element: ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Integer prefix of a string such as "128 kbps"; 0 when there is none
fn leading_number(text: &str) -> u32 {
    let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

#[async_trait]
impl SearchProvider for GoEar {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_page(&self, term: &str, page_index: u32) -> Result<Page> {
        let response = self
            .client
            .execute(self.search_request(term, page_index))
            .await?;
        self.search_response(response)
    }

    async fn lookup_one(&self, target: &LookupTarget) -> Result<TrackDetails> {
        let track_id = target.id();
        let response = self.client.execute(self.lookup_request(track_id)).await?;
        self.lookup_response(track_id, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"
        <html><body>
        <ol class="results_list">
          <li>
            <p class="title"><a href="http://www.goear.com/listen/abc123/she-wolf">She Wolf</a></p>
            <p class="band">David Guetta</p>
            <p class="kbps"> 320 kbps </p>
            <p class="length"> 3:45 </p>
          </li>
          <li>
            <p class="title"><a href="http://www.goear.com/listen/def456/titanium">Titanium</a></p>
            <p class="band"></p>
            <p class="kbps">128</p>
            <p class="length">4:05</p>
          </li>
          <li>
            <p class="title"><a href="/broken">No id</a></p>
          </li>
        </ol>
        <ul class="pagination"><li>1</li><li>2</li><li>3</li></ul>
        </body></html>
    "#;

    fn goear() -> GoEar {
        GoEar::from_config(&ProviderConfig::default(), HttpClient::new().unwrap()).unwrap()
    }

    #[test]
    fn test_search_request_encodes_term() {
        let request = goear().search_request("David Guetta/She Wolf", 2);
        assert_eq!(
            request.url,
            "http://www.goear.com/search/David%20Guetta%2FShe%20Wolf/2"
        );
    }

    #[test]
    fn test_parse_search_page() {
        let page = goear().parse_search_page(SEARCH_PAGE).unwrap();

        assert_eq!(page.total_count, 9);
        assert_eq!(page.items.len(), 2);

        let first = &page.items[0];
        assert_eq!(first.id, "abc123");
        assert_eq!(first.title, "She Wolf");
        assert_eq!(first.artist.as_deref(), Some("David Guetta"));
        assert_eq!(first.quality, 320);
        assert_eq!(first.duration, "3:45");
        assert_eq!(
            first.link.as_deref(),
            Some("http://www.goear.com/action/sound/get/abc123")
        );

        let second = &page.items[1];
        assert_eq!(second.id, "def456");
        assert!(second.artist.is_none());
        assert_eq!(second.quality, 128);
    }

    #[test]
    fn test_parse_page_without_results() {
        let page = goear()
            .parse_search_page("<html><body><p>Nothing</p></body></html>")
            .unwrap();
        assert_eq!(page, Page::empty());
    }

    #[test]
    fn test_rows_without_links_are_a_parse_error() {
        let html = r#"<ol class="results_list"><li><p class="title">?</p></li></ol>"#;
        let err = goear().parse_search_page(html).unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn test_not_found_status_is_empty_page() {
        let response = ProviderResponse {
            status: 404,
            text: "not here".to_string(),
            url: String::new(),
        };
        assert_eq!(goear().search_response(response).unwrap(), Page::empty());
    }

    #[test]
    fn test_server_error_is_upstream_error() {
        let response = ProviderResponse {
            status: 503,
            text: String::new(),
            url: String::new(),
        };
        let err = goear().search_response(response).unwrap_err();
        assert!(matches!(err, SearchError::Upstream { status: 503 }));
    }

    #[test]
    fn test_lookup_response() {
        let response = ProviderResponse {
            status: 200,
            text: r#"<songs><track title="She Wolf" artist="David Guetta" href="http://cdn.example/abc.mp3"/></songs>"#.to_string(),
            url: String::new(),
        };
        let details = goear().lookup_response("abc", response).unwrap();
        assert_eq!(details.title, "She Wolf");
        assert_eq!(details.artist.as_deref(), Some("David Guetta"));
        assert_eq!(details.link, "http://cdn.example/abc.mp3");
    }

    #[test]
    fn test_lookup_response_without_track_is_not_found() {
        let response = ProviderResponse {
            status: 200,
            text: "<songs></songs>".to_string(),
            url: String::new(),
        };
        let err = goear().lookup_response("zzz", response).unwrap_err();
        assert!(matches!(err, SearchError::NotFound(_)));
        assert!(err.to_string().contains("zzz"));
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let config = ProviderConfig {
            search_url: "http://example.com/search".to_string(),
            ..Default::default()
        };
        assert!(GoEar::from_config(&config, HttpClient::new().unwrap()).is_err());
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("192 kbps"), 192);
        assert_eq!(leading_number(""), 0);
        assert_eq!(leading_number("kbps"), 0);
    }
}
