//! Row codec: header management, column validation, and the
//! record ↔ row encoder/decoder pair.
//!
//! - Export: schema → [`write_headers`] → [`encode`] per record
//! - Import: [`read_headers`] → schema → [`decode`] per row

mod decoder;
mod encoder;
mod header;
mod validator;

pub use decoder::{decode, decode_columns, read_cell, Unmapped};
pub use encoder::{encode, parse_bool, to_cell};
pub use header::{read_headers, write_headers};
pub use validator::{verify, verify_list, verify_schema};
