//! Wire types for the hotel-distribution API.
//!
//! Responses arrive under a `{ "data": … }` envelope with camelCase
//! fields. Deeply nested objects we never interpret (room details,
//! policies, media) stay opaque as `serde_json::Value`, with a
//! flattened catch-all for fields not modeled explicitly.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

// ── Envelopes ────────────────────────────────────────────────────────

/// List responses: `{ "data": [ … ] }`. Missing `data` means no results.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Single-item responses: `{ "data": { … } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ItemEnvelope<T> {
    pub data: T,
}

// ── Property search ──────────────────────────────────────────────────

/// Geographic coordinates of a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCode {
    pub latitude: f64,
    pub longitude: f64,
}

/// Distance from the search origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDistance {
    pub value: f64,
    pub unit: String,
}

/// Property summary from the by-city / by-geocode search endpoints.
/// No pricing -- identifiers and location only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    pub hotel_id: String,
    pub name: Option<String>,
    pub chain_code: Option<String>,
    pub iata_code: Option<String>,
    pub geo_code: Option<GeoCode>,
    pub distance: Option<HotelDistance>,
    /// Catch-all for additional fields not modeled above.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Search radius unit. Upstream spelling: `KM` / `MILE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RadiusUnit {
    #[default]
    Km,
    Mile,
}

impl RadiusUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Km => "KM",
            Self::Mile => "MILE",
        }
    }
}

impl FromStr for RadiusUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "km" => Ok(Self::Km),
            "mile" | "mi" => Ok(Self::Mile),
            other => Err(format!("expected 'km' or 'mile', got '{other}'")),
        }
    }
}

/// Radius outside [1, 100] is clamped, not rejected -- the upstream
/// hard-caps it anyway and a silently huge radius is the usual caller
/// mistake.
const RADIUS_MIN: u32 = 1;
const RADIUS_MAX: u32 = 100;

/// Optional filters shared by both property search operations.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Hotel chain codes (two-letter).
    pub chain_codes: Vec<String>,
    /// Amenity filters, e.g. `SPA`, `PARKING`.
    pub amenities: Vec<String>,
    /// Star ratings to include, 1-5.
    pub ratings: Vec<u8>,
    /// Property source filter, e.g. `ALL`.
    pub hotel_source: Option<String>,
}

impl SearchFilters {
    fn append_query(&self, query: &mut Vec<(&'static str, String)>) {
        if !self.chain_codes.is_empty() {
            query.push(("chainCodes", self.chain_codes.join(",")));
        }
        if !self.amenities.is_empty() {
            query.push(("amenities", self.amenities.join(",")));
        }
        if !self.ratings.is_empty() {
            let joined = self
                .ratings
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            query.push(("ratings", joined));
        }
        if let Some(ref source) = self.hotel_source {
            query.push(("hotelSource", source.clone()));
        }
    }
}

/// Parameters for the search-by-city operation.
#[derive(Debug, Clone)]
pub struct CitySearch {
    pub city_code: String,
    pub radius: u32,
    pub radius_unit: RadiusUnit,
    pub filters: SearchFilters,
}

impl CitySearch {
    pub fn new(city_code: impl Into<String>) -> Self {
        Self {
            city_code: city_code.into(),
            radius: 5,
            radius_unit: RadiusUnit::default(),
            filters: SearchFilters::default(),
        }
    }

    pub fn radius(mut self, radius: u32, unit: RadiusUnit) -> Self {
        self.radius = radius;
        self.radius_unit = unit;
        self
    }

    pub fn filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.city_code.trim().is_empty() {
            return Err(Error::Validation {
                field: "cityCode",
                reason: "required".into(),
            });
        }
        Ok(())
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("cityCode", self.city_code.clone()),
            ("radius", self.radius.clamp(RADIUS_MIN, RADIUS_MAX).to_string()),
            ("radiusUnit", self.radius_unit.as_str().to_owned()),
        ];
        self.filters.append_query(&mut query);
        query
    }
}

/// Parameters for the search-by-geocode operation.
#[derive(Debug, Clone)]
pub struct GeocodeSearch {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
    pub radius_unit: RadiusUnit,
    pub filters: SearchFilters,
}

impl GeocodeSearch {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius: 5,
            radius_unit: RadiusUnit::default(),
            filters: SearchFilters::default(),
        }
    }

    pub fn radius(mut self, radius: u32, unit: RadiusUnit) -> Self {
        self.radius = radius;
        self.radius_unit = unit;
        self
    }

    pub fn filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::Validation {
                field: "latitude",
                reason: format!("{} is outside [-90, 90]", self.latitude),
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::Validation {
                field: "longitude",
                reason: format!("{} is outside [-180, 180]", self.longitude),
            });
        }
        Ok(())
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("radius", self.radius.clamp(RADIUS_MIN, RADIUS_MAX).to_string()),
            ("radiusUnit", self.radius_unit.as_str().to_owned()),
        ];
        self.filters.append_query(&mut query);
        query
    }
}

// ── Offer pricing ────────────────────────────────────────────────────

/// Parameters for a batched offer-pricing query.
///
/// Stay dates are part of construction -- a pricing query without them
/// is meaningless. Everything else has workable defaults.
#[derive(Debug, Clone)]
pub struct OfferSearch {
    pub hotel_ids: Vec<String>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults: u32,
    pub room_quantity: u32,
    /// ISO 4217 currency for the response prices.
    pub currency: Option<String>,
    /// Price band, e.g. `100-350`. Requires `currency`.
    pub price_range: Option<String>,
    /// Board type filter, e.g. `BREAKFAST`.
    pub board_type: Option<String>,
    /// Caller-supplied negotiated rate codes, merged with registry
    /// defaults before dispatch.
    pub rate_codes: Vec<String>,
}

impl OfferSearch {
    pub fn new(hotel_ids: Vec<String>, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            hotel_ids,
            check_in_date: check_in,
            check_out_date: check_out,
            adults: 1,
            room_quantity: 1,
            currency: None,
            price_range: None,
            board_type: None,
            rate_codes: Vec::new(),
        }
    }

    pub fn occupancy(mut self, adults: u32, rooms: u32) -> Self {
        self.adults = adults;
        self.room_quantity = rooms;
        self
    }

    pub fn rate_codes(mut self, codes: Vec<String>) -> Self {
        self.rate_codes = codes;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.check_out_date <= self.check_in_date {
            return Err(Error::Validation {
                field: "checkOutDate",
                reason: format!(
                    "{} is not after check-in {}",
                    self.check_out_date, self.check_in_date
                ),
            });
        }
        if self.adults == 0 {
            return Err(Error::Validation {
                field: "adults",
                reason: "must be at least 1".into(),
            });
        }
        if self.room_quantity == 0 {
            return Err(Error::Validation {
                field: "roomQuantity",
                reason: "must be at least 1".into(),
            });
        }
        if self.price_range.is_some() && self.currency.is_none() {
            return Err(Error::Validation {
                field: "priceRange",
                reason: "requires currency".into(),
            });
        }
        Ok(())
    }

    /// Compose the query for one chunk of property ids.
    pub(crate) fn chunk_query(
        &self,
        ids: &[String],
        rate_codes: &[String],
        payment_policy: &str,
    ) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("hotelIds", ids.join(",")),
            ("checkInDate", self.check_in_date.to_string()),
            ("checkOutDate", self.check_out_date.to_string()),
            ("adults", self.adults.to_string()),
            ("roomQuantity", self.room_quantity.to_string()),
            ("paymentPolicy", payment_policy.to_owned()),
            ("bestRateOnly", "false".to_owned()),
        ];
        if let Some(ref currency) = self.currency {
            query.push(("currency", currency.clone()));
        }
        if let Some(ref range) = self.price_range {
            query.push(("priceRange", range.clone()));
        }
        if let Some(ref board) = self.board_type {
            query.push(("boardType", board.clone()));
        }
        if !rate_codes.is_empty() {
            query.push(("rateCodes", rate_codes.join(",")));
        }
        query
    }
}

/// One hotel's entry in a pricing response: identity, availability
/// flag, and the offers priced for the requested stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelOfferGroup {
    pub hotel: OfferHotel,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Hotel identity as embedded in pricing responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferHotel {
    pub hotel_id: String,
    pub name: Option<String>,
    pub chain_code: Option<String>,
    pub city_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// A single priced offer.
///
/// `supplier_name` and `is_negotiated_rate` never come from the wire;
/// they are derived by the enrichment pass from the rate-code registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub rate_code: Option<String>,
    pub board_type: Option<String>,
    /// Room description -- complex nested object, kept opaque.
    pub room: Option<Value>,
    pub guests: Option<Value>,
    pub price: Option<Price>,
    /// Cancellation/payment policies, kept opaque.
    pub policies: Option<Value>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_deserializing, default)]
    pub is_negotiated_rate: bool,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Offer price breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub currency: Option<String>,
    pub base: Option<String>,
    pub total: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

// ── Property content ─────────────────────────────────────────────────

/// Rich descriptive content for one property: images, description,
/// contact. Supplementary to a booking decision -- lookup failures
/// resolve to absence rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelContent {
    pub hotel_id: String,
    pub name: Option<String>,
    pub description: Option<Value>,
    #[serde(default)]
    pub media: Vec<Value>,
    pub contact: Option<Value>,
    pub address: Option<Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_clamped_into_range() {
        let search = CitySearch::new("PAR").radius(500, RadiusUnit::Km);
        let query = search.to_query();
        assert!(query.contains(&("radius", "100".to_owned())));

        let search = CitySearch::new("PAR").radius(0, RadiusUnit::Mile);
        let query = search.to_query();
        assert!(query.contains(&("radius", "1".to_owned())));
        assert!(query.contains(&("radiusUnit", "MILE".to_owned())));
    }

    #[test]
    fn city_search_requires_city_code() {
        let err = CitySearch::new("  ").validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation { field: "cityCode", .. }
        ));
    }

    #[test]
    fn geocode_search_bounds() {
        assert!(GeocodeSearch::new(48.86, 2.35).validate().is_ok());
        assert!(GeocodeSearch::new(91.0, 2.35).validate().is_err());
        assert!(GeocodeSearch::new(48.86, -181.0).validate().is_err());
    }

    #[test]
    fn filters_compose_comma_joined() {
        let filters = SearchFilters {
            chain_codes: vec!["EH".into(), "MC".into()],
            amenities: vec!["SPA".into()],
            ratings: vec![4, 5],
            hotel_source: Some("ALL".into()),
        };
        let query = CitySearch::new("LON").filters(filters).to_query();
        assert!(query.contains(&("chainCodes", "EH,MC".to_owned())));
        assert!(query.contains(&("amenities", "SPA".to_owned())));
        assert!(query.contains(&("ratings", "4,5".to_owned())));
        assert!(query.contains(&("hotelSource", "ALL".to_owned())));
    }

    #[test]
    fn offer_search_rejects_inverted_dates() {
        let check_in = NaiveDate::from_ymd_opt(2026, 9, 10).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2026, 9, 8).unwrap();
        let err = OfferSearch::new(vec!["HLLON123".into()], check_in, check_out)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Validation { field: "checkOutDate", .. }));
    }

    #[test]
    fn offer_search_price_range_needs_currency() {
        let check_in = NaiveDate::from_ymd_opt(2026, 9, 8).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2026, 9, 10).unwrap();
        let mut search = OfferSearch::new(vec!["HLLON123".into()], check_in, check_out);
        search.price_range = Some("100-350".into());
        assert!(search.validate().is_err());

        search.currency = Some("EUR".into());
        assert!(search.validate().is_ok());
    }

    #[test]
    fn chunk_query_joins_ids_and_codes() {
        let check_in = NaiveDate::from_ymd_opt(2026, 9, 8).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2026, 9, 10).unwrap();
        let search = OfferSearch::new(Vec::new(), check_in, check_out).occupancy(2, 1);

        let ids = vec!["AAA".to_owned(), "BBB".to_owned()];
        let codes = vec!["SIG".to_owned(), "COR".to_owned()];
        let query = search.chunk_query(&ids, &codes, "NONE");

        assert!(query.contains(&("hotelIds", "AAA,BBB".to_owned())));
        assert!(query.contains(&("checkInDate", "2026-09-08".to_owned())));
        assert!(query.contains(&("adults", "2".to_owned())));
        assert!(query.contains(&("paymentPolicy", "NONE".to_owned())));
        assert!(query.contains(&("rateCodes", "SIG,COR".to_owned())));
    }

    #[test]
    fn offer_group_deserializes_with_defaults() {
        let raw = serde_json::json!({
            "hotel": { "hotelId": "HLLON123", "name": "The Sample" }
        });
        let group: HotelOfferGroup = serde_json::from_value(raw).unwrap();
        assert!(!group.available);
        assert!(group.offers.is_empty());
    }
}
