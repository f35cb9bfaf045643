//! Plain-text rendering of troop tables and recommendations.

use std::io::{self, Write};

use troop_finder_core::{Troop, TroopSize, volunteer_hours, volunteer_hours_label};
use troop_finder_scorer::{NO_STRONG_MATCHES_MESSAGE, Recommendation, ScoredTroop};

const PLACEHOLDER: &str = "—";
const COLUMN_GAP: &str = "  ";
const PHILOSOPHY_PREVIEW_CHARS: usize = 200;

const TABLE_HEADERS: [&str; 8] = [
    "Troop",
    "Distance",
    "Meeting",
    "Location",
    "Founded",
    "Size",
    "Eagles",
    "Volunteer hours",
];

/// Message printed when a search leaves no rows.
pub(crate) const NO_TROOPS_FOUND: &str =
    "No troops found. Try adjusting your search terms or clearing the search.";

/// Message printed when there is nothing to recommend from.
pub(crate) const EMPTY_DATASET: &str = "The dataset contains no troops to recommend.";

fn joined(parts: &[Option<&str>], separator: &str) -> String {
    parts
        .iter()
        .flatten()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn or_placeholder(text: String) -> String {
    if text.is_empty() {
        PLACEHOLDER.to_owned()
    } else {
        text
    }
}

fn distance_cell(troop: &Troop) -> String {
    troop
        .distance
        .map_or_else(|| PLACEHOLDER.to_owned(), |miles| format!("{miles:.1} mi"))
}

fn size_cell(troop: &Troop) -> String {
    match &troop.size {
        Some(TroopSize::Count(count)) => format!("{count} scouts"),
        Some(TroopSize::Description(text)) => text.clone(),
        None => PLACEHOLDER.to_owned(),
    }
}

fn table_row(troop: &Troop) -> [String; 8] {
    let day = troop.meeting_day.map(|day| day.as_str());
    [
        format!("Troop {}", troop.troop),
        distance_cell(troop),
        or_placeholder(joined(&[day, troop.meeting_time.as_deref()], " ")),
        or_placeholder(joined(
            &[troop.location.as_deref(), troop.city.as_deref()],
            ", ",
        )),
        troop
            .founded
            .filter(|year| *year > 0)
            .map_or_else(|| PLACEHOLDER.to_owned(), |year| year.to_string()),
        size_cell(troop),
        troop.eagles.clone().unwrap_or_else(|| PLACEHOLDER.to_owned()),
        volunteer_hours_label(volunteer_hours(troop)),
    ]
}

fn write_row(writer: &mut dyn Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    writeln!(writer, "{}", line.trim_end())
}

/// Write `troops` as an aligned table, one row per troop.
pub(crate) fn write_table(writer: &mut dyn Write, troops: &[&Troop]) -> io::Result<()> {
    if troops.is_empty() {
        return writeln!(writer, "{NO_TROOPS_FOUND}");
    }
    let header = TABLE_HEADERS.map(str::to_owned);
    let rows: Vec<[String; 8]> = troops.iter().map(|troop| table_row(troop)).collect();
    let mut widths = TABLE_HEADERS.map(|title| title.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    write_row(writer, &header, &widths)?;
    for row in &rows {
        write_row(writer, row, &widths)?;
    }
    Ok(())
}

fn write_match(writer: &mut dyn Write, rank: usize, scored: &ScoredTroop) -> io::Result<()> {
    let troop = &scored.troop;
    writeln!(
        writer,
        "#{rank} Troop {} (Match: {} pts)",
        troop.troop, scored.score
    )?;
    let place = joined(&[troop.location.as_deref(), troop.city.as_deref()], ", ");
    if !place.is_empty() {
        writeln!(writer, "   {place}")?;
    }
    writeln!(writer, "   Why this troop is a great fit:")?;
    for reason in &scored.reasons {
        writeln!(writer, "   ✓ {reason}")?;
    }

    let meeting = joined(
        &[
            troop.meeting_day.map(|day| day.as_str()),
            troop.meeting_time.as_deref(),
        ],
        " ",
    );
    let mut details = vec![format!("Meeting: {}", or_placeholder(meeting))];
    if let Some(focus) = troop.program_focus.as_deref() {
        details.push(format!("Focus: {focus}"));
    }
    if let Some(miles) = troop.distance {
        details.push(format!("Distance: {miles:.1} miles"));
    }
    writeln!(writer, "   {}", details.join(" | "))?;
    if let Some(philosophy) = troop.philosophy_approach.as_deref() {
        let preview: String = philosophy.chars().take(PHILOSOPHY_PREVIEW_CHARS).collect();
        let ellipsis = if preview.len() < philosophy.len() { "..." } else { "" };
        writeln!(writer, "   Philosophy: {preview}{ellipsis}")?;
    }
    Ok(())
}

/// Write ranked matches, best first, or a message explaining why there are none.
pub(crate) fn write_recommendation(
    writer: &mut dyn Write,
    recommendation: &Recommendation,
) -> io::Result<()> {
    match recommendation {
        Recommendation::NoStrongMatches => writeln!(writer, "{NO_STRONG_MATCHES_MESSAGE}"),
        Recommendation::NoTroops => writeln!(writer, "{EMPTY_DATASET}"),
        Recommendation::Matches(matches) => {
            for (index, scored) in matches.iter().enumerate() {
                if index > 0 {
                    writeln!(writer)?;
                }
                write_match(writer, index + 1, scored)?;
            }
            Ok(())
        }
    }
}
