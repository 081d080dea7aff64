// Error taxonomy for the report pipeline.
//
// Anything wrong with the shape of the input data is fatal and surfaces as
// `InputSchema` before any output is written. Empty grouped data is not an
// error (views return well-formed zero-row tables), and a missing HS code
// description only leaves the description blank.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A required column is absent, unparseable, or the wrong type.
    #[error("{file}:{line}: column `{column}`: {detail}")]
    InputSchema {
        file: String,
        line: u64,
        column: &'static str,
        detail: String,
    },

    #[error("csv error for {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("io error for {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error for {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ReportError {
    pub fn schema(file: &str, line: u64, column: &'static str, detail: impl Into<String>) -> Self {
        Self::InputSchema {
            file: file.to_string(),
            line,
            column,
            detail: detail.into(),
        }
    }

    pub fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn json(path: &std::path::Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}
