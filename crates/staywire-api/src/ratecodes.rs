// Negotiated/consortium rate code registry.
//
// A rate code identifies a contracted pricing program a property may
// offer on top of public rates. The registry maps codes to display
// metadata and supplies the default set injected into every pricing
// query. Codes are case-sensitive exact matches; unknown codes pass
// through to the upstream untouched but never resolve to metadata.

use serde::Serialize;

/// Maximum number of rate codes the upstream accepts on one pricing
/// request. Caller-supplied codes keep priority when truncating.
pub const MAX_RATE_CODES_PER_REQUEST: usize = 8;

/// Display metadata for one negotiated rate program.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateCodeEntry {
    pub code: &'static str,
    pub program_name: &'static str,
    pub description: &'static str,
    pub benefits: &'static [&'static str],
}

/// Built-in program table. Keyed by code; codes are unique.
const PROGRAMS: &[RateCodeEntry] = &[
    RateCodeEntry {
        code: "COR",
        program_name: "Corporate Plus",
        description: "Negotiated corporate program with flexible terms",
        benefits: &["Flexible cancellation", "Late checkout on availability"],
    },
    RateCodeEntry {
        code: "SIG",
        program_name: "Signature Collection",
        description: "Luxury consortium program for member agencies",
        benefits: &[
            "Room upgrade on availability",
            "Daily breakfast for two",
            "USD 100 property credit",
        ],
    },
    RateCodeEntry {
        code: "VIR",
        program_name: "Virtuoso Select",
        description: "Preferred partner program with on-property amenities",
        benefits: &["Room upgrade on availability", "Early check-in", "Spa credit"],
    },
    RateCodeEntry {
        code: "TVL",
        program_name: "Travel Leaders Elite",
        description: "Agency network program with arrival amenities",
        benefits: &["Welcome amenity", "Daily breakfast"],
    },
    RateCodeEntry {
        code: "GOV",
        program_name: "Government & Military",
        description: "Per-diem pricing for qualifying travelers",
        benefits: &["Per-diem pricing", "Flexible cancellation"],
    },
];

/// Process-wide registry of negotiated rate programs.
///
/// Read-only after construction; safe to share across concurrent
/// queries.
#[derive(Debug, Clone)]
pub struct RateCodeRegistry {
    default_codes: Vec<String>,
}

impl RateCodeRegistry {
    /// Build a registry. `override_codes`, when given, replaces the
    /// default injection set (deduplicated, order-preserving); absent,
    /// every known program code is a default.
    pub fn new(override_codes: Option<Vec<String>>) -> Self {
        let default_codes = match override_codes {
            Some(codes) => dedup_preserving_order(codes),
            None => PROGRAMS.iter().map(|p| p.code.to_owned()).collect(),
        };
        Self { default_codes }
    }

    /// The codes injected into every pricing query.
    pub fn default_codes(&self) -> &[String] {
        &self.default_codes
    }

    /// Look up program metadata for a code. Exact, case-sensitive.
    #[allow(clippy::unused_self)]
    pub fn lookup(&self, code: &str) -> Option<&'static RateCodeEntry> {
        PROGRAMS.iter().find(|p| p.code == code)
    }

    /// Every known program, for caller introspection.
    #[allow(clippy::unused_self)]
    pub fn entries(&self) -> &'static [RateCodeEntry] {
        PROGRAMS
    }
}

impl Default for RateCodeRegistry {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Merge caller-supplied rate codes with registry defaults.
///
/// Caller codes come first, then defaults; duplicates keep their first
/// occurrence; the result is truncated to `cap`, so caller codes that
/// fit always win over defaults. Pure -- no registry or network
/// dependency beyond the slices passed in.
pub fn merge_rate_codes(caller: &[String], defaults: &[String], cap: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(cap.min(caller.len() + defaults.len()));
    for code in caller.iter().chain(defaults) {
        if merged.len() == cap {
            break;
        }
        if !merged.iter().any(|c| c == code) {
            merged.push(code.clone());
        }
    }
    merged
}

fn dedup_preserving_order(codes: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes {
        if !out.iter().any(|c| *c == code) {
            out.push(code);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(items: &[&str]) -> Vec<String> {
        items.iter().map(|i| (*i).to_owned()).collect()
    }

    #[test]
    fn registry_defaults_to_all_known_codes() {
        let registry = RateCodeRegistry::new(None);
        assert_eq!(registry.default_codes().len(), PROGRAMS.len());
        assert!(registry.default_codes().iter().any(|c| c == "SIG"));
    }

    #[test]
    fn override_codes_are_deduplicated_in_order() {
        let registry = RateCodeRegistry::new(Some(s(&["SIG", "COR", "SIG", "XYZ"])));
        assert_eq!(registry.default_codes(), &s(&["SIG", "COR", "XYZ"]));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = RateCodeRegistry::default();
        assert!(registry.lookup("SIG").is_some());
        assert!(registry.lookup("sig").is_none());
        assert!(registry.lookup("NOPE").is_none());
    }

    #[test]
    fn merge_table() {
        // (caller, defaults, cap) -> expected
        let cases: &[(&[&str], &[&str], usize, &[&str])] = &[
            // caller first, then defaults
            (&["AAA"], &["BBB", "CCC"], 8, &["AAA", "BBB", "CCC"]),
            // duplicates keep first occurrence
            (&["AAA", "BBB"], &["BBB", "AAA", "CCC"], 8, &["AAA", "BBB", "CCC"]),
            // truncation favors caller codes
            (&["AAA", "BBB", "CCC"], &["DDD", "EEE"], 3, &["AAA", "BBB", "CCC"]),
            (&["AAA"], &["BBB", "CCC", "DDD"], 2, &["AAA", "BBB"]),
            // caller list longer than cap is itself truncated
            (&["AAA", "BBB", "CCC"], &[], 2, &["AAA", "BBB"]),
            // empty caller falls back to defaults
            (&[], &["AAA", "BBB"], 8, &["AAA", "BBB"]),
            // everything empty
            (&[], &[], 8, &[]),
            // zero cap
            (&["AAA"], &["BBB"], 0, &[]),
            // duplicate within caller list
            (&["AAA", "AAA"], &[], 8, &["AAA"]),
        ];

        for (caller, defaults, cap, expected) in cases {
            let got = merge_rate_codes(&s(caller), &s(defaults), *cap);
            assert_eq!(&got, &s(expected), "caller={caller:?} defaults={defaults:?} cap={cap}");
        }
    }
}
