//! Integration tests for the smsconv binary surface

#[cfg(test)]
mod binary_tests {
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use std::process::Command;
    use tempfile::tempdir;

    fn run_smsconv(args: &[&str], cwd: &Path) -> std::process::Output {
        Command::new(env!("CARGO_BIN_EXE_smsconv"))
            .args(args)
            .current_dir(cwd)
            .output()
            .expect("failed to run smsconv")
    }

    fn write_backup(path: &Path) {
        let mut f = File::create(path).unwrap();
        write!(
            f,
            r#"<smses count="2">
                <mms msg_box="1">
                    <addrs><addr address="+15550002" type="151"/></addrs>
                    <parts><part ct="text/plain" text="hello"/></parts>
                </mms>
                <sms address="+15550001" body="old"/>
            </smses>"#
        )
        .unwrap();
    }

    #[test]
    fn test_missing_argument_prints_usage_and_fails() {
        let dir = tempdir().unwrap();
        let output = run_smsconv(&[], dir.path());

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Usage: smsconv <input.xml> [output.xml]"));
        assert!(!dir.path().join("converted.xml").exists());
    }

    #[test]
    fn test_conversion_with_explicit_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("backup.xml");
        write_backup(&input);

        let output = run_smsconv(&["backup.xml", "out.xml", "--quiet"], dir.path());
        assert!(output.status.success());

        let converted = fs::read_to_string(dir.path().join("out.xml")).unwrap();
        assert!(converted.contains(r#"<smes count="1">"#));
        assert!(converted.contains(r#"body="hello""#));
        assert!(!converted.contains(r#"body="old""#));
    }

    #[test]
    fn test_conversion_defaults_to_converted_xml() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("backup.xml");
        write_backup(&input);

        let output = run_smsconv(&["backup.xml"], dir.path());
        assert!(output.status.success());
        assert!(dir.path().join("converted.xml").exists());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Converted 1 messages"));
    }

    #[test]
    fn test_missing_input_file_fails() {
        let dir = tempdir().unwrap();
        let output = run_smsconv(&["nope.xml"], dir.path());

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("nope.xml"));
        assert!(!dir.path().join("converted.xml").exists());
    }

    #[test]
    fn test_stats_flag_prints_summary() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("backup.xml");
        write_backup(&input);

        let output = run_smsconv(&["backup.xml", "--stats"], dir.path());
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Conversion Statistics:"));
        assert!(stdout.contains("Records emitted: 1"));
        assert!(stdout.contains("SMS entries skipped: 1"));
    }
}
