//! CSV dataset loader.
//!
//! The first row is the header. Only the text and label columns are read;
//! any other column is ignored:
//! ```csv
//! id,Text,class,source
//! 1,"El gobierno publicó el informe anual",TRUE,diario
//! 2,"URGENTE: compartan antes de que lo borren",FALSE,foro
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::ReaderBuilder;

use crate::dataset::{DEFAULT_LABEL_COLUMN, DEFAULT_TEXT_COLUMN, LabeledExample};
use crate::error::{Result, VerazError};

/// Reads [`LabeledExample`]s from CSV files.
#[derive(Debug, Clone)]
pub struct CsvDatasetLoader {
    text_column: String,
    label_column: String,
    /// CSV delimiter character (default: ',')
    delimiter: u8,
}

impl Default for CsvDatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvDatasetLoader {
    /// Create a loader for the default `Text` / `class` columns.
    pub fn new() -> Self {
        CsvDatasetLoader {
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            delimiter: b',',
        }
    }

    /// Use different column names.
    pub fn with_columns<T: Into<String>, L: Into<String>>(
        mut self,
        text_column: T,
        label_column: L,
    ) -> Self {
        self.text_column = text_column.into();
        self.label_column = label_column.into();
        self
    }

    /// Set a custom single-byte delimiter, e.g. `b';'` or `b'\t'`.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load every row of the file at `path`.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Vec<LabeledExample>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            VerazError::Io(io::Error::new(
                e.kind(),
                format!("cannot open dataset {}: {e}", path.display()),
            ))
        })?;

        let examples = self.load_from_reader(file)?;
        log::info!("loaded {} examples from {}", examples.len(), path.display());
        Ok(examples)
    }

    /// Load every row from any reader.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Vec<LabeledExample>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let position = |name: &str| headers.iter().position(|h| h == name);
        let (text_idx, label_idx) = match (position(&self.text_column), position(&self.label_column)) {
            (Some(t), Some(l)) => (t, l),
            (text, label) => {
                let missing: Vec<&str> = [
                    (text.is_none(), self.text_column.as_str()),
                    (label.is_none(), self.label_column.as_str()),
                ]
                .into_iter()
                .filter_map(|(absent, name)| absent.then_some(name))
                .collect();
                return Err(VerazError::schema(format!(
                    "dataset must contain the columns '{}' and '{}' (missing: {})",
                    self.text_column,
                    self.label_column,
                    missing.join(", ")
                )));
            }
        };

        let mut examples = Vec::new();
        for record in reader.records() {
            let record = record?;
            examples.push(LabeledExample::new(
                record.get(text_idx).unwrap_or_default(),
                record.get(label_idx).unwrap_or_default(),
            ));
        }

        Ok(examples)
    }
}

/// Load a dataset with the default column names.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledExample>> {
    CsvDatasetLoader::new().load(path)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_load_default_columns() {
        let csv_data = "id,Text,class\n1,\"Hola, mundo\",TRUE\n2,Otra noticia,fake\n";
        let examples = CsvDatasetLoader::new()
            .load_from_reader(csv_data.as_bytes())
            .unwrap();

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0], LabeledExample::new("Hola, mundo", "TRUE"));
        assert_eq!(examples[1].class_label, "fake");
    }

    #[test]
    fn test_custom_columns_and_delimiter() {
        let csv_data = "titulo;etiqueta\nAlgo pasó;0\n";
        let examples = CsvDatasetLoader::new()
            .with_columns("titulo", "etiqueta")
            .with_delimiter(b';')
            .load_from_reader(csv_data.as_bytes())
            .unwrap();

        assert_eq!(examples, vec![LabeledExample::new("Algo pasó", "0")]);
    }

    #[test]
    fn test_tab_delimiter() {
        let csv_data = "Text\tclass\nUno, dos y tres\tTRUE\n";
        let examples = CsvDatasetLoader::new()
            .with_delimiter(b'\t')
            .load_from_reader(csv_data.as_bytes())
            .unwrap();

        assert_eq!(examples, vec![LabeledExample::new("Uno, dos y tres", "TRUE")]);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let csv_data = "text,label\nhola,TRUE\n";
        let err = CsvDatasetLoader::new()
            .load_from_reader(csv_data.as_bytes())
            .unwrap_err();

        match err {
            VerazError::Schema(message) => {
                assert!(message.contains("'Text'"));
                assert!(message.contains("'class'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_rows_yield_empty_fields() {
        let csv_data = "Text,class\nsolo texto\n";
        let examples = CsvDatasetLoader::new()
            .load_from_reader(csv_data.as_bytes())
            .unwrap();
        assert_eq!(examples, vec![LabeledExample::new("solo texto", "")]);
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Text,class").unwrap();
        writeln!(file, "Noticia verificada,TRUE").unwrap();
        file.flush().unwrap();

        let examples = load_csv(file.path()).unwrap();
        assert_eq!(examples.len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_csv("/nonexistent/dataset.csv").unwrap_err();
        assert!(matches!(err, VerazError::Io(_)));
    }
}
