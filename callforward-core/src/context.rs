// callforward-core/src/context.rs
use crate::pacer::Pacer;
use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};

/// Timestamp shared by every file of one run, `yyyyMMdd_HHmmss`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp(String);

impl RunStamp {
    pub fn now() -> Self {
        Self::from_time(&Local::now())
    }

    pub fn from_time(time: &DateTime<Local>) -> Self {
        Self(time.format("%Y%m%d_%H%M%S").to_string())
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where and how one run reads and writes
#[derive(Debug, Clone)]
pub struct RunContext {
    dir: PathBuf,
    stamp: RunStamp,
    input_file: String,
    pacer: Pacer,
}

impl RunContext {
    pub fn new(dir: PathBuf, stamp: RunStamp, input_file: String, pacer: Pacer) -> Self {
        Self {
            dir,
            stamp,
            input_file,
            pacer,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    pub fn input_path(&self) -> PathBuf {
        self.dir.join(&self.input_file)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.dir.join(format!("backup_{}.csv", self.stamp))
    }

    pub fn current_settings_path(&self) -> PathBuf {
        self.dir.join(format!("current_settings_{}.csv", self.stamp))
    }

    pub fn log_file_name(&self) -> String {
        format!("scriptlog_{}.log", self.stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stamp_format() {
        let time = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(RunStamp::from_time(&time).to_string(), "20240307_090501");
    }

    #[test]
    fn test_paths_share_stamp() {
        let time = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        let ctx = RunContext::new(
            PathBuf::from("/run"),
            RunStamp::from_time(&time),
            "users.csv".to_string(),
            Pacer::immediate(),
        );
        assert_eq!(ctx.input_path(), PathBuf::from("/run/users.csv"));
        assert_eq!(ctx.backup_path(), PathBuf::from("/run/backup_20240307_090501.csv"));
        assert_eq!(
            ctx.current_settings_path(),
            PathBuf::from("/run/current_settings_20240307_090501.csv")
        );
        assert_eq!(ctx.log_file_name(), "scriptlog_20240307_090501.log");
    }
}
