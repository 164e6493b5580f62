// Hand-crafted async HTTP client for the hotel-distribution API.
//
// Auth: OAuth2 bearer token, attached explicitly per request.
// Pricing queries are batched: the upstream caps property ids per
// request, so large id lists fan out into sequential paced chunks.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{ClientCredentials, Environment, TokenManager};
use crate::enrich::{enrich_groups, filter_available};
use crate::error::Error;
use crate::ratecodes::{
    MAX_RATE_CODES_PER_REQUEST, RateCodeEntry, RateCodeRegistry, merge_rate_codes,
};
use crate::transport::TransportConfig;
use crate::types::{
    CitySearch, GeocodeSearch, HotelContent, HotelOfferGroup, HotelSummary, ItemEnvelope,
    ListEnvelope, OfferSearch,
};

/// Upstream cap on property ids per pricing request.
pub const MAX_IDS_PER_REQUEST: usize = 20;

/// Pause between consecutive pricing chunks, skipped after the last.
/// Keeps a multi-chunk query under the upstream rate limit.
pub const BATCH_PACING: Duration = Duration::from_millis(100);

/// Historical defaults differ between upstream revisions (`NONE` on
/// the sandbox, `GUARANTEE` on enterprise), so the policy is
/// configuration, not a constant baked into request composition.
pub const DEFAULT_PAYMENT_POLICY: &str = "NONE";

// ── Error response shape ─────────────────────────────────────────────

// Upstream errors arrive as `{ "errors": [ { code, title, detail } ] }`,
// but we surface the payload verbatim rather than interpreting it --
// the caller sees status + body exactly as the upstream sent them.

// ── Configuration ────────────────────────────────────────────────────

/// Everything needed to construct a [`HotelClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub environment: Environment,
    /// Override the environment's base URL (tests, proxies).
    pub base_url: Option<Url>,
    pub credentials: ClientCredentials,
    pub transport: TransportConfig,
    /// Payment-policy filter sent with every pricing request.
    pub payment_policy: String,
    /// Inter-chunk pacing for batched pricing queries.
    pub batch_pacing: Duration,
    /// Replaces the registry's default rate-code injection set.
    pub rate_code_overrides: Option<Vec<String>>,
}

impl ClientConfig {
    pub fn new(environment: Environment, credentials: ClientCredentials) -> Self {
        Self {
            environment,
            base_url: None,
            credentials,
            transport: TransportConfig::default(),
            payment_policy: DEFAULT_PAYMENT_POLICY.to_owned(),
            batch_pacing: BATCH_PACING,
            rate_code_overrides: None,
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for hotel search, live-offer pricing, and content
/// lookup.
///
/// One instance per process is typical: the token cache and rate-code
/// registry are shared across concurrent queries, and both are safe
/// for concurrent use. Batches within one pricing query run strictly
/// sequentially.
pub struct HotelClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: TokenManager,
    registry: RateCodeRegistry,
    payment_policy: String,
    batch_pacing: Duration,
}

impl HotelClient {
    /// Build a client from config.
    ///
    /// Fails with [`Error::Configuration`] when credentials are
    /// missing -- there is no unauthenticated mode.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        use secrecy::ExposeSecret;

        if config.credentials.client_id.trim().is_empty() {
            return Err(Error::Configuration {
                message: "client id is required".into(),
            });
        }
        if config.credentials.client_secret.expose_secret().is_empty() {
            return Err(Error::Configuration {
                message: "client secret is required".into(),
            });
        }

        let base_url = match config.base_url {
            Some(url) => url,
            None => Url::parse(config.environment.base_url())?,
        };

        let http = config.transport.build_client()?;
        let tokens = TokenManager::new(
            http.clone(),
            &base_url,
            config.environment,
            config.credentials,
        )?;

        Ok(Self {
            http,
            base_url,
            tokens,
            registry: RateCodeRegistry::new(config.rate_code_overrides),
            payment_policy: config.payment_policy,
            batch_pacing: config.batch_pacing,
        })
    }

    /// The configured negotiated rate programs, for caller introspection.
    pub fn rate_codes(&self) -> &'static [RateCodeEntry] {
        self.registry.entries()
    }

    /// The registry backing enrichment and default-code injection.
    pub fn registry(&self) -> &RateCodeRegistry {
        &self.registry
    }

    // ── Request plumbing ─────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    /// Attach the current bearer credential to an outbound request.
    ///
    /// Kept as an explicit step before every dispatch rather than a
    /// default header: the token rotates, and tests can observe the
    /// injection point.
    async fn authorize(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, Error> {
        let token = self.tokens.bearer_token().await?;
        Ok(req.bearer_auth(token))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let req = self.http.get(url).query(params);
        let resp = self.authorize(req).await?.send().await?;
        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = body_preview(&body);
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(Error::Upstream {
                status: status.as_u16(),
                body,
            })
        }
    }

    // ━━ Query surface ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Property summaries near a city, no pricing.
    pub async fn search_by_city(&self, search: &CitySearch) -> Result<Vec<HotelSummary>, Error> {
        search.validate()?;
        let envelope: ListEnvelope<HotelSummary> = self
            .get(
                "/v1/reference-data/locations/hotels/by-city",
                &search.to_query(),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Property summaries near a coordinate, no pricing.
    pub async fn search_by_geocode(
        &self,
        search: &GeocodeSearch,
    ) -> Result<Vec<HotelSummary>, Error> {
        search.validate()?;
        let envelope: ListEnvelope<HotelSummary> = self
            .get(
                "/v1/reference-data/locations/hotels/by-geocode",
                &search.to_query(),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Live offers for a set of properties, batched and enriched.
    ///
    /// Ids fan out into chunks of at most [`MAX_IDS_PER_REQUEST`],
    /// issued in order with pacing in between. A failed chunk is
    /// logged and skipped -- the query still returns the surviving
    /// chunks' hotels, enriched and filtered to available entries with
    /// at least one offer. An empty id list returns empty with zero
    /// upstream calls.
    pub async fn fetch_offers(&self, search: &OfferSearch) -> Result<Vec<HotelOfferGroup>, Error> {
        if search.hotel_ids.is_empty() {
            return Ok(Vec::new());
        }
        search.validate()?;

        let codes = merge_rate_codes(
            &search.rate_codes,
            self.registry.default_codes(),
            MAX_RATE_CODES_PER_REQUEST,
        );

        let chunks: Vec<&[String]> = search.hotel_ids.chunks(MAX_IDS_PER_REQUEST).collect();
        let last = chunks.len() - 1;
        let mut accumulated = Vec::new();

        for (index, chunk) in chunks.iter().enumerate() {
            match self.fetch_offer_chunk(chunk, search, &codes).await {
                Ok(mut groups) => {
                    enrich_groups(&self.registry, &mut groups);
                    accumulated.extend(filter_available(groups));
                }
                // A rejected credential exchange fails every chunk the
                // same way; surface it instead of logging N times.
                Err(err) if err.is_auth() => return Err(err),
                Err(err) => {
                    warn!(chunk = index, total = chunks.len(), error = %err,
                        "pricing chunk failed; continuing with remaining chunks");
                }
            }
            if index < last {
                tokio::time::sleep(self.batch_pacing).await;
            }
        }

        Ok(accumulated)
    }

    async fn fetch_offer_chunk(
        &self,
        ids: &[String],
        search: &OfferSearch,
        rate_codes: &[String],
    ) -> Result<Vec<HotelOfferGroup>, Error> {
        let query = search.chunk_query(ids, rate_codes, &self.payment_policy);
        let envelope: ListEnvelope<HotelOfferGroup> =
            self.get("/v3/shopping/hotel-offers", &query).await?;
        Ok(envelope.data)
    }

    /// Full detail for a single offer, enriched.
    pub async fn fetch_offer_detail(&self, offer_id: &str) -> Result<HotelOfferGroup, Error> {
        if offer_id.trim().is_empty() {
            return Err(Error::Validation {
                field: "offerId",
                reason: "required".into(),
            });
        }

        let path = format!("/v3/shopping/hotel-offers/{offer_id}");
        let envelope: ItemEnvelope<HotelOfferGroup> = self.get(&path, &[]).await?;

        let mut group = envelope.data;
        enrich_groups(&self.registry, std::slice::from_mut(&mut group));
        Ok(group)
    }

    /// Rich content for a property, or `None` when the lookup fails.
    ///
    /// Content is supplementary to a booking decision, so upstream and
    /// transport failures here downgrade to absence instead of
    /// propagating. Caller input is still validated normally.
    pub async fn fetch_content(&self, hotel_id: &str) -> Result<Option<HotelContent>, Error> {
        if hotel_id.trim().is_empty() {
            return Err(Error::Validation {
                field: "hotelId",
                reason: "required".into(),
            });
        }

        let params = [("hotelIds", hotel_id.to_owned())];
        let result: Result<ListEnvelope<HotelContent>, Error> = self
            .get("/v1/reference-data/locations/hotels/by-hotels", &params)
            .await;

        match result {
            Ok(envelope) => Ok(envelope.data.into_iter().next()),
            Err(err) if err.is_auth() => Err(err),
            Err(err) => {
                debug!(hotel_id, error = %err, "content lookup failed; treating as unavailable");
                Ok(None)
            }
        }
    }
}

/// First ~200 bytes of a response body for error messages, truncated
/// on a char boundary so multi-byte content never panics the slice.
fn body_preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::body_preview;

    #[test]
    fn preview_keeps_short_bodies_whole() {
        assert_eq!(body_preview("not json"), "not json");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        // 'é' starts at byte 199 and spans bytes 199..201
        let body = format!("{}é{}", "x".repeat(199), "y".repeat(50));
        let preview = body_preview(&body);
        assert_eq!(preview.len(), 199);
        assert!(preview.chars().all(|c| c == 'x'));
    }
}
