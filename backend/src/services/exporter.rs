use crate::errors::FetchError;
use crate::models::RankedRow;
use chrono::SecondsFormat;
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const CSV_HEADER: [&str; 9] = [
    "rank",
    "title",
    "channel",
    "videoId",
    "url",
    "views",
    "ageHours",
    "vph",
    "publishedAt",
];

/// Every field quoted, one `\n`-terminated line per row, in the given order.
pub fn to_csv(rows: &[RankedRow]) -> Result<String, FetchError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(export_error)?;
    for row in rows {
        writer
            .write_record([
                row.rank.to_string(),
                row.title.clone(),
                row.channel_title.clone(),
                row.id.clone(),
                row.url.clone(),
                row.view_count.to_string(),
                row.age_hours.to_string(),
                row.vph.to_string(),
                row.published_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            ])
            .map_err(export_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FetchError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FetchError::Export(e.to_string()))
}

fn export_error(e: csv::Error) -> FetchError {
    FetchError::Export(e.to_string())
}
