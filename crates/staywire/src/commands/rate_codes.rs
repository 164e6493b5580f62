//! Negotiated rate-program listing.

use owo_colors::OwoColorize;
use tabled::Tabled;

use staywire_api::{HotelClient, RateCodeEntry};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct RateCodeRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Program")]
    program: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Benefits")]
    benefits: String,
}

pub fn handle(client: &HotelClient, global: &GlobalOpts) -> Result<(), CliError> {
    let entries = client.rate_codes();
    let defaults = client.registry().default_codes();

    let out = match global.output {
        OutputFormat::Table => {
            let rows: Vec<RateCodeRow> = entries
                .iter()
                .map(|e| RateCodeRow {
                    code: e.code.bold().to_string(),
                    program: e.program_name.to_owned(),
                    default: if defaults.iter().any(|d| d == e.code) {
                        "yes".to_owned()
                    } else {
                        String::new()
                    },
                    benefits: e.benefits.join(", "),
                })
                .collect();
            output::render_rows(&rows)
        }
        OutputFormat::Json => output::render_json(entries, false),
        OutputFormat::JsonCompact => output::render_json(entries, true),
        OutputFormat::Plain => entries
            .iter()
            .map(|e: &RateCodeEntry| e.code.to_owned())
            .collect::<Vec<_>>()
            .join("\n"),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
