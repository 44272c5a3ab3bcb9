//! SMS/MMS backup converter
//!
//! A Rust CLI tool that converts a backup export of mixed SMS/MMS
//! messages (XML) into a normalized SMS-only XML document. Group
//! conversations are filtered out and each remaining MMS is rebuilt as a
//! flat `sms` record with a canonical address and body.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;

// Re-export commonly used types
pub use conversion::{convert_file, ConvertConfig, ConvertStats, Converter, NormalizedSms};
pub use error::{ConvertError, ConvertResult};
pub use parser::{strip_namespace, MessageKind, MessageStream, XmlElement};
