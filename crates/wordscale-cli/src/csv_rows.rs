use csv::StringRecord;
use wordscale::batch::BatchRecord;
use wordscale::learning::CorpusRow;

/// Find a column by name, case-insensitively; the first listed name wins.
pub fn find_column(
    headers: &StringRecord,
    names: &[&str],
) -> Option<usize> {
    names.iter().find_map(|name| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    })
}

/// Column positions within a CSV header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Columns {
    /// The English source column.
    pub source: Option<usize>,

    /// The translation column, when learning.
    pub target: Option<usize>,

    /// The target language column.
    pub language: Option<usize>,
}

/// A CSV record, viewed through [`Columns`].
#[derive(Debug, Clone)]
pub struct CsvRow {
    /// The record, unchanged.
    pub record: StringRecord,
    columns: Columns,
}

impl CsvRow {
    pub fn new(
        record: StringRecord,
        columns: Columns,
    ) -> Self {
        Self { record, columns }
    }

    fn field(
        &self,
        index: Option<usize>,
    ) -> Option<&str> {
        index.and_then(|i| self.record.get(i))
    }
}

impl BatchRecord for CsvRow {
    fn source_text(&self) -> Option<&str> {
        self.field(self.columns.source)
    }

    fn target_language(&self) -> Option<&str> {
        self.field(self.columns.language)
    }
}

impl CorpusRow for CsvRow {
    fn source_text(&self) -> Option<&str> {
        self.field(self.columns.source)
    }

    fn target_text(&self) -> Option<&str> {
        self.field(self.columns.target)
    }

    fn target_language(&self) -> Option<&str> {
        self.field(self.columns.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_column() {
        let headers = StringRecord::from(vec!["id", " Source ", "translation", "reference"]);
        assert_eq!(find_column(&headers, &["source"]), Some(1));
        assert_eq!(find_column(&headers, &["reference", "translation"]), Some(3));
        assert_eq!(find_column(&headers, &["target_lang"]), None);
    }

    #[test]
    fn test_row_fields() {
        let columns = Columns {
            source: Some(0),
            target: Some(1),
            language: Some(5),
        };
        let row = CsvRow::new(StringRecord::from(vec!["Hello", "Bonjour"]), columns);
        assert_eq!(BatchRecord::source_text(&row), Some("Hello"));
        assert_eq!(row.target_text(), Some("Bonjour"));
        assert_eq!(BatchRecord::target_language(&row), None);
    }
}
