use crate::event::Event;
use crate::filter::Filter;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

pub fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
    table
}

/// Render matched events as a table
pub fn format_events_table(events: &[&Event]) -> Table {
    let mut table = create_styled_table(&["ID", "Type", "Repository", "Actor", "Created"]);

    for event in events {
        table.add_row(vec![
            Cell::new(event.id.as_deref().unwrap_or("-")),
            Cell::new(event.event_type()),
            Cell::new(
                event
                    .repository
                    .as_ref()
                    .map(|repo| repo.name.as_str())
                    .unwrap_or("-"),
            ),
            Cell::new(
                event
                    .actor
                    .as_ref()
                    .map(|actor| actor.login.as_str())
                    .unwrap_or("-"),
            ),
            Cell::new(
                event
                    .created_at
                    .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    table
}

pub fn display_match_summary(matched: usize, total: usize) {
    let summary = format!("{matched} of {total} events matched");
    if matched == 0 {
        println!("\n{}", summary.yellow().bold());
    } else {
        println!("\n{}", summary.green().bold());
    }
}

/// Plain-words description of a filter, one numbered condition per line
pub fn format_explanation(filter: &Filter) -> String {
    if filter.is_empty() {
        return "No conditions: every event matches.".to_string();
    }

    let mut out = String::new();
    for (index, condition) in filter.conditions.iter().enumerate() {
        let text = if condition.is_empty() && condition.negate {
            "Never (negated condition without checks)".to_string()
        } else if condition.is_empty() {
            "Always".to_string()
        } else {
            condition.to_string()
        };
        if index > 0 {
            out.push_str("\nAND\n");
        }
        out.push_str(&format!("{}. {}", index + 1, text));
    }
    out
}
