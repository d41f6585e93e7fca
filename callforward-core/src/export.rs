// callforward-core/src/export.rs
use crate::operations::OperationError;
use crate::record::{SettingsRecord, FORWARDING_NUMBER_COLUMN, RECORD_COLUMNS};
use std::path::Path;

/// Column layout of an export file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Settings captured before any change
    Backup,
    /// Settings read back after a change, with the echoed input number
    Applied,
}

/// Write `records` to `path`, replacing any existing file.
///
/// The file is written in place; the parent directory must already exist.
pub fn write_records(
    path: &Path,
    records: &[SettingsRecord],
    kind: ExportKind,
) -> Result<(), OperationError> {
    let export_error = |source| OperationError::Export {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(export_error)?;

    let mut header: Vec<&str> = RECORD_COLUMNS.to_vec();
    if kind == ExportKind::Applied {
        header.push(FORWARDING_NUMBER_COLUMN);
    }
    writer.write_record(&header).map_err(export_error)?;

    for record in records {
        let mut cells = record.cells();
        if kind == ExportKind::Applied {
            cells.push(record.forwarding_number.clone().unwrap_or_default());
        }
        writer.write_record(&cells).map_err(export_error)?;
    }

    writer
        .flush()
        .map_err(|e| export_error(csv::Error::from(e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{CombinedSettings, VoicemailLookup};
    use std::fs;
    use voice_admin_client::CallingSettings;

    fn record(email: &str) -> SettingsRecord {
        SettingsRecord::build(
            email,
            &CombinedSettings {
                calling: CallingSettings::default(),
                voicemail: VoicemailLookup::Missing,
            },
        )
    }

    #[test]
    fn test_backup_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.csv");
        write_records(&path, &[record("a@x.com"), record("b@x.com")], ExportKind::Backup).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Email,IsForwardingEnabled,"));
        assert!(!lines[0].contains(FORWARDING_NUMBER_COLUMN));
        assert!(lines[1].starts_with("a@x.com,"));
        assert!(lines[2].starts_with("b@x.com,"));
    }

    #[test]
    fn test_applied_layout_has_forwarding_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("current.csv");
        let records = [record("a@x.com").with_forwarding_number("+15550001")];
        write_records(&path, &records, ExportKind::Applied).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), RECORD_COLUMNS.len() + 1);
        assert_eq!(&headers[headers.len() - 1], FORWARDING_NUMBER_COLUMN);

        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[row.len() - 1], "+15550001");
    }

    #[test]
    fn test_empty_records_write_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.csv");
        write_records(&path, &[], ExportKind::Backup).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_missing_parent_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("backup.csv");
        let err = write_records(&path, &[record("a@x.com")], ExportKind::Backup).unwrap_err();
        assert!(matches!(err, OperationError::Export { .. }));
        assert!(!path.exists());
    }
}
