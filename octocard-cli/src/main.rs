use anyhow::{bail, Context};
use clap::{Arg, Command};
use octocard_lib::*;
use std::fs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("octocard")
        .version("0.1.0")
        .about("Fetch a GitHub profile and render it as an HTML card")
        .arg(
            Arg::new("username")
                .value_name("USERNAME")
                .help("GitHub login to look up")
                .required(false),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Render from a saved profile JSON body instead of the network")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output file (stdout if not specified)")
                .required(false),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("REST endpoint base")
                .default_value(DEFAULT_BASE_URL),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .help("Wrap the card in a minimal standalone HTML page")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let base_url = matches.get_one::<String>("base-url").unwrap();

    let record = if let Some(input_file) = matches.get_one::<String>("input") {
        let body = fs::read_to_string(input_file)
            .with_context(|| format!("Failed to read {input_file}"))?;
        parse_profile(&body)?
    } else if let Some(raw) = matches.get_one::<String>("username") {
        let login = validate_username(raw)?;
        eprintln!("Fetching profile for {login}…");
        fetch_profile(base_url, login).await?
    } else {
        bail!("either a USERNAME or --input FILE is required");
    };

    let card = render_profile(&record);
    let html = if matches.get_flag("page") {
        wrap_page(&record, &card)
    } else {
        card
    };

    if let Some(output_file) = matches.get_one::<String>("output") {
        fs::write(output_file, html).with_context(|| format!("Failed to write {output_file}"))?;
    } else {
        println!("{html}");
    }

    Ok(())
}

/// Issues the single outbound lookup and maps the outcome onto the lookup
/// error taxonomy. The User-Agent header is the one addition over the
/// widget's bare request; the upstream API refuses native clients
/// without it.
async fn fetch_profile(base_url: &str, login: &str) -> Result<ProfileRecord, LookupError> {
    let client = reqwest::Client::builder()
        .user_agent("octocard")
        .build()
        .map_err(|e| LookupError::Transport(e.to_string()))?;

    let response = client
        .get(lookup_url(base_url, login))
        .send()
        .await
        .map_err(|e| LookupError::Transport(e.to_string()))?;

    let status = response.status();
    // Best-effort body read; non-fatal when unavailable.
    let body = response.text().await.unwrap_or_default();

    classify_status(
        status.as_u16(),
        status.canonical_reason().unwrap_or(""),
        &body,
    )?;
    parse_profile(&body)
}

/// Minimal standalone page around the card, for opening the output
/// directly in a browser.
fn wrap_page(record: &ProfileRecord, card: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n<title>{title}</title>\n</head>\n<body>\n{card}\n</body>\n</html>\n",
        title = escape_html(record.display_name()),
    )
}
