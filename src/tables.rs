use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{analysis::Period, point::PricePoint, statistics::Statistics};

pub fn build_statistics_table(periods: &[(&str, &Period)]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec![
        "Period", "From", "To", "Mean", "Level", "Min", "At", "Max", "At", "Load", "Unload",
    ]);
    for (name, period) in periods {
        let Statistics { start_time, end_time, avg_price, avg_level, min, max } = period.statistics;
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(format_time(start_time.as_ref())),
            Cell::new(format_time(end_time.as_ref())).add_attribute(Attribute::Dim),
            Cell::new(format!("{avg_price:.4}")).set_alignment(CellAlignment::Right),
            Cell::new(format!("{avg_level:+.2}")).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", min.price))
                .set_alignment(CellAlignment::Right)
                .fg(Color::Green),
            Cell::new(format_time(min.starts_at.as_ref())).add_attribute(Attribute::Dim),
            Cell::new(format!("{:.4}", max.price))
                .set_alignment(CellAlignment::Right)
                .fg(Color::Red),
            Cell::new(format_time(max.starts_at.as_ref())).add_attribute(Attribute::Dim),
            Cell::new(period.load_from_net().len()).set_alignment(CellAlignment::Right),
            Cell::new(period.unload_battery().len()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_slots_table(period: &Period) -> Table {
    let mean_price = period.statistics.avg_price;

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Date", "Start", "Price", "Level", "Extremum", "Signal"]);
    for point in period.series.iter() {
        table.add_row(slot_row(point, point.price >= mean_price));
    }
    table
}

pub fn build_current_table(current: &PricePoint) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Current price", "Level", "Signal"]);
    table.add_row(vec![
        Cell::new(format!("{:.4}", current.price)).set_alignment(CellAlignment::Right),
        Cell::new(current.level).fg(current.level.color()),
        Cell::new(current.loading_level).fg(current.loading_level.color()),
    ]);
    table
}

fn slot_row(point: &PricePoint, is_above_mean: bool) -> Vec<Cell> {
    vec![
        Cell::new(point.starts_at.map_or_else(String::new, |starts_at| {
            starts_at.format("%b %d").to_string()
        }))
        .add_attribute(Attribute::Dim),
        Cell::new(format_time(point.starts_at.as_ref())),
        Cell::new(format!("{:.4}", point.price))
            .set_alignment(CellAlignment::Right)
            .fg(if is_above_mean { Color::Red } else { Color::Green }),
        Cell::new(point.level).fg(point.level.color()),
        Cell::new(point.extrema_type).fg(point.extrema_type.color()),
        Cell::new(point.loading_level).fg(point.loading_level.color()),
    ]
}

fn format_time<Tz>(time: Option<&chrono::DateTime<Tz>>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    time.map_or_else(|| "-".to_owned(), |time| time.format("%H:%M").to_string())
}
