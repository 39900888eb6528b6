use comfy_table::{ContentArrangement, Table};
use orb_core::ModeProfile;
use serde_json::json;

pub fn run(json: bool) -> Result<(), String> {
    if json {
        let rows: Vec<_> = ModeProfile::table()
            .iter()
            .map(|(status, profile)| json!({ "status": status, "profile": profile }))
            .collect();
        let text = serde_json::to_string_pretty(&rows)
            .map_err(|e| format!("cannot serialize profiles: {e}"))?;
        println!("{text}");
        return Ok(());
    }

    println!("{}", render_table());
    Ok(())
}

fn render_table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Status", "Pulse", "Glow", "Speed", "Lightning"]);
    for (status, profile) in ModeProfile::table() {
        table.add_row(vec![
            status.to_string(),
            format!("{:.2}", profile.pulse_amplitude),
            format!("{:.2}", profile.glow_multiplier),
            format!("{:.2}", profile.rotation_speed),
            format!("{:.2}", profile.lightning_chance),
        ]);
    }
    table
}
