//! Core conversion engine for MMS to SMS transformation

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use crate::cli::CliUtils;
use crate::conversion::config::ConvertConfig;
use crate::conversion::stats::ConvertStats;
use crate::error::{ConvertError, ConvertResult};
use crate::formatter::write_document;
use crate::parser::{MessageKind, MessageStream, XmlElement};

/// The `addr` child `type` value marking the device owner's own number
const BASE_NUMBER_TYPE: &str = "137";

/// An MMS with more unique participants than this is a group message
const GROUP_THRESHOLD: usize = 2;

/// A normalized output SMS record
///
/// Field values are kept as strings throughout; the backup format never
/// guarantees they parse as anything stronger, and the output carries them
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSms {
    pub address: String,
    pub date: String,
    pub msg_type: String,
    pub body: String,
    pub read: String,
    pub date_sent: String,
    pub sub_id: String,
    pub readable_date: String,
    pub contact_name: String,
}

impl NormalizedSms {
    /// Build a record from an MMS element, applying documented defaults
    /// for every missing attribute
    pub fn from_mms(mms: &XmlElement) -> Self {
        let msg_box = mms.attr_or("msg_box", "1");
        let msg_type = if msg_box == "1" { "1" } else { "2" };

        Self {
            address: reconstruct_address(mms),
            date: mms.attr_or("date", "0").to_string(),
            msg_type: msg_type.to_string(),
            body: extract_body(mms),
            read: mms.attr_or("read", "1").to_string(),
            date_sent: mms.attr_or("date_sent", "0").to_string(),
            sub_id: mms.attr_or("sub_id", "1").to_string(),
            readable_date: mms.attr_or("readable_date", "").to_string(),
            contact_name: mms.attr_or("contact_name", "").to_string(),
        }
    }

    /// The full output attribute set, in serialization order
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("protocol", "0"),
            ("address", &self.address),
            ("date", &self.date),
            ("type", &self.msg_type),
            ("subject", ""),
            ("body", &self.body),
            ("toa", "null"),
            ("sc_toa", "null"),
            ("service_center", "null"),
            ("read", &self.read),
            ("status", "-1"),
            ("locked", "0"),
            ("date_sent", &self.date_sent),
            ("sub_id", &self.sub_id),
            ("readable_date", &self.readable_date),
            ("contact_name", &self.contact_name),
        ]
    }
}

/// Collect the unique non-empty addresses from an MMS element's
/// `addrs/addr` children
///
/// An ordered set keeps the joined output deterministic across runs.
pub fn unique_addresses(mms: &XmlElement) -> BTreeSet<String> {
    let mut unique = BTreeSet::new();
    for addrs in mms.children_named("addrs") {
        for addr in addrs.children_named("addr") {
            if let Some(address) = addr.attr("address") {
                if !address.is_empty() {
                    unique.insert(address.to_string());
                }
            }
        }
    }
    unique
}

/// The device owner's own number, marked by `addr type="137"`
pub fn base_phone_number(mms: &XmlElement) -> Option<String> {
    for addrs in mms.children_named("addrs") {
        for addr in addrs.children_named("addr") {
            if addr.attr("type") == Some(BASE_NUMBER_TYPE) {
                return Some(addr.attr_or("address", "").to_string());
            }
        }
    }
    None
}

/// Reconstruct the output address: every unique address except the
/// owner's own number, joined with `";"`, or `"unknown"` if nothing
/// remains
pub fn reconstruct_address(mms: &XmlElement) -> String {
    let base = base_phone_number(mms).unwrap_or_default();
    let joined = unique_addresses(mms)
        .into_iter()
        .filter(|addr| *addr != base)
        .collect::<Vec<_>>()
        .join(";");

    if joined.is_empty() {
        "unknown".to_string()
    } else {
        joined
    }
}

/// Whether an MMS is a group message (more than two unique participants,
/// the owner's number included)
pub fn is_group_message(mms: &XmlElement) -> bool {
    unique_addresses(mms).len() > GROUP_THRESHOLD
}

/// Extract the message body: the `text` attribute of the first
/// `parts/part` child with `ct="text/plain"`, in document order
pub fn extract_body(mms: &XmlElement) -> String {
    for parts in mms.children_named("parts") {
        for part in parts.children_named("part") {
            if part.attr("ct") == Some("text/plain") {
                return part.attr_or("text", "").to_string();
            }
        }
    }
    String::new()
}

/// Main conversion pipeline
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline: stream the input, transform each MMS, and
    /// serialize the output document
    ///
    /// Fatal errors abort before any output is written; individual
    /// messages never abort the run.
    pub fn convert(&self, input: &Path, output: &Path) -> ConvertResult<ConvertStats> {
        let started = Instant::now();

        let file = File::open(input)
            .map_err(|e| ConvertError::input_not_found(input.to_path_buf(), e))?;
        let input_size = file
            .metadata()
            .map(|m| m.len())
            .unwrap_or_default();

        let spinner = if self.config.progress && !self.config.quiet && CliUtils::stderr_is_terminal()
        {
            Some(CliUtils::create_spinner())
        } else {
            None
        };

        let mut stream = MessageStream::new(BufReader::new(file));
        let mut records: Vec<NormalizedSms> = Vec::new();
        let mut stats = ConvertStats::new();

        // Each yielded element is dropped at the end of the iteration, so
        // only one message subtree is alive at a time.
        while let Some(element) = stream.next_message()? {
            stats.elements_scanned += 1;
            if let Some(pb) = &spinner {
                pb.inc(1);
            }

            match MessageKind::classify(&element.tag) {
                MessageKind::Sms => {
                    // Pre-existing SMS entries are dropped, not passed
                    // through
                    stats.sms_skipped += 1;
                }
                MessageKind::Mms => {
                    if is_group_message(&element) {
                        stats.groups_skipped += 1;
                    } else {
                        records.push(NormalizedSms::from_mms(&element));
                        stats.records_emitted += 1;
                    }
                }
                MessageKind::Other => {
                    stats.other_skipped += 1;
                }
            }
        }

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let output_size = write_document(&records, output, self.config.indent_size)?;

        stats.input_size_bytes = input_size;
        stats.output_size_bytes = output_size;
        stats.finish(started.elapsed());
        Ok(stats)
    }
}

/// Convert a backup file with the given configuration
pub fn convert_file(
    input: &Path,
    output: &Path,
    config: &ConvertConfig,
) -> ConvertResult<ConvertStats> {
    Converter::new(config.clone()).convert(input, output)
}
