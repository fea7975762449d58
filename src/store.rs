//! Persisted backup of solar days with fill-forward repair.
//!
//! The store is a TOML file of raw records keyed by date string, one row per
//! day, living under the user data directory by default. It is the fallback
//! source when remote acquisition fails: `load` always hands back a
//! day-ordered, gap-free list covering the requested range, repairing any
//! missing days by relabeling the nearest available day's pattern, or reports
//! that no backup exists at all.
//!
//! Saves replace the whole set and are written atomically (temp file +
//! rename) so a crash mid-save can never leave a half-written backup.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::SolarDataError;
use crate::logger::Log;
use crate::solar_day::{SolarDay, SolarDayRecord};

/// On-disk layout: a single `[days]` table keyed by `YYYY-MM-DD`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct BackupFile {
    #[serde(default)]
    days: BTreeMap<String, SolarDayRecord>,
}

/// File-backed collection of SolarDay records.
pub struct SolarDayStore {
    path: PathBuf,
}

impl SolarDayStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default backup location under the user data directory.
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().context("Could not determine data directory")?;
        Ok(data_dir.join("solarium").join("solar_backup.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the entire persisted backup set with `days`.
    pub fn save(&self, days: &[SolarDay]) -> Result<()> {
        let mut file = BackupFile::default();
        for day in days {
            file.days
                .insert(day.record().date.clone(), day.record().clone());
        }

        let content =
            toml::to_string_pretty(&file).context("Failed to serialize solar backup")?;

        let parent = self
            .path
            .parent()
            .context("Backup path has no parent directory")?;
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create backup directory {}", parent.display()))?;

        // Write-then-rename keeps the previous backup intact on failure
        let mut temp = tempfile::NamedTempFile::new_in(parent)
            .context("Failed to create temporary backup file")?;
        temp.write_all(content.as_bytes())
            .context("Failed to write solar backup")?;
        temp.persist(&self.path)
            .with_context(|| format!("Failed to replace backup at {}", self.path.display()))?;

        Log::log_indented(&format!(
            "Saved {} solar day(s) to backup at {}",
            days.len(),
            self.path.display()
        ));
        Ok(())
    }

    /// Load the backup trimmed to `[min_day, max_day]`, repairing gaps.
    ///
    /// Days missing from the backup are filled by relabeling the most recent
    /// earlier stored day (fill-forward); days before the earliest stored day
    /// borrow the earliest one. The result is therefore always day-ordered
    /// and gap-free, or `NoBackupAvailable` when the store is empty.
    pub fn load(
        &self,
        min_day: NaiveDate,
        max_day: NaiveDate,
    ) -> Result<Vec<SolarDay>, SolarDataError> {
        let stored = self.read_records()?;
        if stored.is_empty() {
            return Err(SolarDataError::NoBackupAvailable);
        }

        let mut days = Vec::new();
        let mut day = min_day;
        while day <= max_day {
            let source = stored
                .range(..=day)
                .next_back()
                .or_else(|| stored.range(day..).next())
                .map(|(_, solar_day)| solar_day)
                .ok_or(SolarDataError::NoBackupAvailable)?;

            let entry = if source.date() == day {
                source.clone()
            } else {
                source.relabeled(day).map_err(|e| {
                    SolarDataError::MalformedResponse(format!(
                        "Backup repair failed for {}: {:#}",
                        day, e
                    ))
                })?
            };
            days.push(entry);

            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        Ok(days)
    }

    /// True when the backup file exists and holds at least one record.
    pub fn has_backup(&self) -> bool {
        self.read_records().map(|r| !r.is_empty()).unwrap_or(false)
    }

    fn read_records(&self) -> Result<BTreeMap<NaiveDate, SolarDay>, SolarDataError> {
        if !self.path.exists() {
            return Err(SolarDataError::NoBackupAvailable);
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| SolarDataError::MalformedResponse(e.to_string()))?;
        let file: BackupFile = toml::from_str(&content)
            .map_err(|e| SolarDataError::MalformedResponse(e.to_string()))?;

        let mut records = BTreeMap::new();
        for (date, record) in file.days {
            match SolarDay::from_record(record) {
                Ok(day) => {
                    records.insert(day.date(), day);
                }
                Err(e) => {
                    // One corrupt row shouldn't discard the rest of the backup
                    Log::log_warning(&format!("Skipping unreadable backup row {}: {:#}", date, e));
                }
            }
        }
        Ok(records)
    }
}
