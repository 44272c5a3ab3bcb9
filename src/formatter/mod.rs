//! Output document serialization
//!
//! The output is a `smes` root carrying a `count` attribute, one `sms`
//! element per normalized record, 4-space indented, with a standard XML
//! declaration. Records are serialized from an in-memory sequence only
//! after the input stream is exhausted, so a fatal parse error never
//! leaves a partial output file behind.

use std::io;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::conversion::engine::NormalizedSms;
use crate::error::{ConvertError, ConvertResult};

/// Serialize the output document to `path`, overwriting any existing
/// file; returns the number of bytes written
pub fn write_document(
    records: &[NormalizedSms],
    path: &Path,
    indent_size: usize,
) -> ConvertResult<u64> {
    let buffer = render_document(records, indent_size)
        .map_err(|e| ConvertError::output_write(path.to_path_buf(), e))?;

    std::fs::write(path, &buffer)
        .map_err(|e| ConvertError::output_write(path.to_path_buf(), e))?;

    Ok(buffer.len() as u64)
}

/// Render the document into a byte buffer
///
/// Attribute values are escaped by the writer, so bodies containing `&`,
/// `<` or quotes stay well-formed.
pub fn render_document(records: &[NormalizedSms], indent_size: usize) -> io::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent_size);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(into_io)?;

    let count = records.len().to_string();
    let mut root = BytesStart::new("smes");
    root.push_attribute(("count", count.as_str()));
    writer
        .write_event(Event::Start(root))
        .map_err(into_io)?;

    for record in records {
        let mut sms = BytesStart::new("sms");
        for (key, value) in record.attributes() {
            sms.push_attribute((key, value));
        }
        writer.write_event(Event::Empty(sms)).map_err(into_io)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("smes")))
        .map_err(into_io)?;

    let mut buffer = writer.into_inner();
    buffer.push(b'\n');
    Ok(buffer)
}

fn into_io<E: std::fmt::Display>(error: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error.to_string())
}
