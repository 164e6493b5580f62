//! Property search command handlers.

use tabled::Tabled;

use staywire_api::types::{CitySearch, GeocodeSearch, HotelSummary, RadiusUnit, SearchFilters};
use staywire_api::HotelClient;

use crate::cli::{GlobalOpts, SearchArgs, SearchCommand, SearchOptions};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct HotelRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Chain")]
    chain: String,
    #[tabled(rename = "Distance")]
    distance: String,
}

impl From<&HotelSummary> for HotelRow {
    fn from(h: &HotelSummary) -> Self {
        Self {
            id: h.hotel_id.clone(),
            name: h.name.clone().unwrap_or_default(),
            chain: h.chain_code.clone().unwrap_or_default(),
            distance: h
                .distance
                .as_ref()
                .map(|d| format!("{:.1} {}", d.value, d.unit))
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &HotelClient,
    args: SearchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let hotels = match args.command {
        SearchCommand::City { city_code, options } => {
            let (radius, unit, filters) = parse_options(options)?;
            let search = CitySearch::new(city_code)
                .radius(radius, unit)
                .filters(filters);
            client.search_by_city(&search).await?
        }

        SearchCommand::Geo {
            latitude,
            longitude,
            options,
        } => {
            let (radius, unit, filters) = parse_options(options)?;
            let search = GeocodeSearch::new(latitude, longitude)
                .radius(radius, unit)
                .filters(filters);
            client.search_by_geocode(&search).await?
        }
    };

    let out = output::render_list(
        &global.output,
        &hotels,
        |h| HotelRow::from(h),
        |h| h.hotel_id.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn parse_options(options: SearchOptions) -> Result<(u32, RadiusUnit, SearchFilters), CliError> {
    let unit: RadiusUnit = options.unit.parse().map_err(|reason| CliError::Validation {
        field: "unit".into(),
        reason,
    })?;
    let filters = SearchFilters {
        chain_codes: options.chains,
        amenities: options.amenities,
        ratings: options.ratings,
        hotel_source: options.source,
    };
    Ok((options.radius, unit, filters))
}
