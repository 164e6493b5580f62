//! Property content command handler.

use staywire_api::types::HotelContent;
use staywire_api::HotelClient;

use crate::cli::{ContentArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn detail(c: &HotelContent) -> String {
    let mut lines = vec![
        format!("Hotel ID:  {}", c.hotel_id),
        format!("Name:      {}", c.name.as_deref().unwrap_or("-")),
    ];
    if let Some(ref description) = c.description {
        let text = description
            .get("text")
            .and_then(|t| t.as_str())
            .map_or_else(|| description.to_string(), ToOwned::to_owned);
        lines.push(format!("About:     {text}"));
    }
    if !c.media.is_empty() {
        lines.push(format!("Images:    {}", c.media.len()));
    }
    if let Some(ref contact) = c.contact {
        if let Some(phone) = contact.get("phone").and_then(|p| p.as_str()) {
            lines.push(format!("Phone:     {phone}"));
        }
        if let Some(email) = contact.get("email").and_then(|e| e.as_str()) {
            lines.push(format!("Email:     {email}"));
        }
    }
    lines.join("\n")
}

pub async fn handle(
    client: &HotelClient,
    args: ContentArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match client.fetch_content(&args.hotel_id).await? {
        Some(content) => {
            let out =
                output::render_single(&global.output, &content, detail, |c| c.hotel_id.clone());
            output::print_output(&out, global.quiet);
        }
        None => {
            // Content is supplementary; absence is a normal outcome.
            if !global.quiet {
                eprintln!("No content available for '{}'", args.hotel_id);
            }
        }
    }
    Ok(())
}
