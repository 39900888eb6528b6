use colored::Colorize;
use orb_core::OrbConfig;
use orb_core::share::ShareLinks;

pub fn run(text: &str, url: Option<&str>, budget: usize) -> Result<(), String> {
    let default_url = OrbConfig::default().page_url;
    let url = url.unwrap_or(&default_url);
    let links = ShareLinks::build(text, url, budget.max(1))
        .map_err(|e| format!("invalid url '{url}': {e}"))?;

    for (label, link) in links.labelled() {
        println!("  {} {link}", format!("{label}:").bold());
    }
    Ok(())
}
