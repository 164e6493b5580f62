// Offer enrichment: cross-reference rate codes against the registry.
//
// Pure transforms, deterministic, no network dependency. Applied to
// every pricing chunk after it returns and before availability
// filtering.

use crate::ratecodes::RateCodeRegistry;
use crate::types::{HotelOfferGroup, Offer};

/// Tag one offer with supplier metadata from the registry.
///
/// The returned rate code is trimmed before lookup. A hit attaches the
/// program name and marks the offer negotiated; a miss (or absent
/// code) leaves `supplier_name` empty and `is_negotiated_rate` false.
/// No other upstream field is touched.
pub fn enrich_offer(registry: &RateCodeRegistry, offer: &mut Offer) {
    let entry = offer
        .rate_code
        .as_deref()
        .map(str::trim)
        .and_then(|code| registry.lookup(code));

    match entry {
        Some(entry) => {
            offer.supplier_name = Some(entry.program_name.to_owned());
            offer.is_negotiated_rate = true;
        }
        None => {
            offer.supplier_name = None;
            offer.is_negotiated_rate = false;
        }
    }
}

/// Enrich every offer in a chunk's hotel groups.
pub fn enrich_groups(registry: &RateCodeRegistry, groups: &mut [HotelOfferGroup]) {
    for group in groups {
        for offer in &mut group.offers {
            enrich_offer(registry, offer);
        }
    }
}

/// Keep only hotels with confirmed availability and at least one offer.
pub fn filter_available(groups: Vec<HotelOfferGroup>) -> Vec<HotelOfferGroup> {
    groups
        .into_iter()
        .filter(|g| g.available && !g.offers.is_empty())
        .collect()
}
