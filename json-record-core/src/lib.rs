//! Generic JSON record parsing and text writing primitives used by higher-level tools.

pub mod parser;
pub mod record;
pub mod writer;

pub use parser::{kind_name, parse, parse_file, parse_records_file, records, ParseError};
pub use record::Record;
pub use writer::{write_text_file, WriteError};
