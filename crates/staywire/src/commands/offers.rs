//! Offer pricing command handlers.

use owo_colors::OwoColorize;
use tabled::Tabled;

use staywire_api::types::{HotelOfferGroup, Offer, OfferSearch};
use staywire_api::HotelClient;

use crate::cli::{GlobalOpts, OfferDetailArgs, OffersArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OfferRow {
    #[tabled(rename = "Hotel")]
    hotel: String,
    #[tabled(rename = "Offer ID")]
    offer_id: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Board")]
    board: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Negotiated")]
    negotiated: String,
}

fn offer_rows(groups: &[HotelOfferGroup]) -> Vec<OfferRow> {
    let mut rows = Vec::new();
    for group in groups {
        let hotel = group
            .hotel
            .name
            .clone()
            .unwrap_or_else(|| group.hotel.hotel_id.clone());
        for offer in &group.offers {
            rows.push(OfferRow {
                hotel: hotel.clone(),
                offer_id: offer.id.clone(),
                rate: rate_label(offer),
                board: offer.board_type.clone().unwrap_or_default(),
                total: total_label(offer),
                negotiated: if offer.is_negotiated_rate {
                    "yes".to_owned()
                } else {
                    String::new()
                },
            });
        }
    }
    rows
}

fn rate_label(offer: &Offer) -> String {
    match (&offer.supplier_name, &offer.rate_code) {
        (Some(name), Some(code)) => format!("{name} ({code})"),
        (Some(name), None) => name.clone(),
        (None, Some(code)) => code.clone(),
        (None, None) => String::new(),
    }
}

fn total_label(offer: &Offer) -> String {
    offer
        .price
        .as_ref()
        .and_then(|p| {
            p.total
                .as_ref()
                .map(|t| format!("{} {}", t, p.currency.as_deref().unwrap_or("")))
        })
        .map(|s| s.trim_end().to_owned())
        .unwrap_or_default()
}

fn group_detail(group: &HotelOfferGroup) -> String {
    let mut lines = vec![
        format!(
            "Hotel:     {}",
            group.hotel.name.as_deref().unwrap_or("-").bold()
        ),
        format!("Hotel ID:  {}", group.hotel.hotel_id),
        format!("Chain:     {}", group.hotel.chain_code.as_deref().unwrap_or("-")),
    ];
    for offer in &group.offers {
        lines.push(String::new());
        lines.push(format!("Offer:     {}", offer.id));
        lines.push(format!(
            "Stay:      {} -> {}",
            offer.check_in_date.as_deref().unwrap_or("-"),
            offer.check_out_date.as_deref().unwrap_or("-"),
        ));
        lines.push(format!("Rate:      {}", rate_label(offer)));
        if offer.is_negotiated_rate {
            lines.push(format!("           {}", "negotiated rate".green()));
        }
        if let Some(ref board) = offer.board_type {
            lines.push(format!("Board:     {board}"));
        }
        if let Some(ref price) = offer.price {
            lines.push(format!(
                "Total:     {} {}",
                price.total.as_deref().unwrap_or("-"),
                price.currency.as_deref().unwrap_or(""),
            ));
            if let Some(ref base) = price.base {
                lines.push(format!("Base:      {base}"));
            }
        }
    }
    lines.join("\n")
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(
    client: &HotelClient,
    args: OffersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut search = OfferSearch::new(args.hotel_ids, args.check_in, args.check_out)
        .occupancy(args.adults, args.rooms)
        .rate_codes(args.rate_codes);
    search.currency = args.currency;
    search.price_range = args.price_range;
    search.board_type = args.board_type;

    let groups = client.fetch_offers(&search).await?;

    if groups.is_empty() && !global.quiet {
        eprintln!("No available offers for the requested stay");
        return Ok(());
    }

    // Table mode flattens groups into per-offer rows, so this view
    // bypasses the generic one-row-per-item rendering.
    let out = match global.output {
        OutputFormat::Table => output::render_rows(&offer_rows(&groups)),
        OutputFormat::Json => output::render_json(&groups, false),
        OutputFormat::JsonCompact => output::render_json(&groups, true),
        OutputFormat::Plain => groups
            .iter()
            .map(|g| g.hotel.hotel_id.clone())
            .collect::<Vec<_>>()
            .join("\n"),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle_detail(
    client: &HotelClient,
    args: OfferDetailArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let group = client.fetch_offer_detail(&args.offer_id).await?;
    let out = output::render_single(&global.output, &group, group_detail, |g| {
        g.hotel.hotel_id.clone()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
