use thiserror::Error;

pub type TabulaResult<T> = Result<T, TabulaError>;

#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Unrecognized workbook format: {0}")]
    UnrecognizedFormat(String),

    #[error("Sheet already exists: {0}")]
    DuplicateSheet(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
