use std::io::Read;

/// Raw directory row before normalization and deduplication.
#[derive(Debug)]
pub(crate) struct DirectoryRow {
    pub(crate) name: String,
    pub(crate) tel: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) website: Option<String>,
}

/// Parse the semicolon-delimited employer table. Trailing fields may be
/// absent; only the name column is required here (blank names are filtered
/// by the caller).
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<DirectoryRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(DirectoryRow {
            name: field(&record, 0).unwrap_or_default(),
            tel: field(&record, 1),
            email: field(&record, 2),
            website: field(&record, 3),
        });
    }

    Ok(rows)
}

fn field(record: &csv::StringRecord, position: usize) -> Option<String> {
    record
        .get(position)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
