//! Plain-text rendering of a calculator snapshot

use alliance_economics::{AssetRecord, CalculatorSnapshot};
use owo_colors::OwoColorize;

/// Non-finite values (zero divisors) print as N/A
pub fn format_value(value: f64) -> String {
    if value.is_finite() {
        format!("{:.6}", value)
    } else {
        "N/A".to_string()
    }
}

pub fn print_snapshot(snapshot: &CalculatorSnapshot) {
    println!("\n{}", "Alliance Reward Pool".cyan().bold());
    println!("═══════════════════════════════════");
    println!(
        "{:<28} {}",
        "Total reward weight".yellow(),
        format_value(snapshot.aggregate.total_weight)
    );
    println!(
        "{:<28} {}",
        "Total pool value".yellow(),
        format_value(snapshot.aggregate.total_pool_value)
    );
    println!(
        "{:<28} {} min",
        "Take rate interval".yellow(),
        format_value(snapshot.take_rate_schedule.interval_minutes)
    );

    for record in &snapshot.assets {
        print_record(record);
    }
    println!();
}

fn print_record(record: &AssetRecord) {
    println!(
        "\n{} - {} ({})",
        record.id(),
        record.label().bold(),
        record.role()
    );
    println!("───────────────────────────────────");

    for (name, value) in record.input_values() {
        println!("  {:<28} {}", name, format_value(value));
    }
    for (name, value) in record.derived_values() {
        println!("  {:<28} {}", name.bright_black(), format_value(value).green());
    }
}
