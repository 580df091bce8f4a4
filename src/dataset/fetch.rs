//! Kaggle dataset download.
//!
//! Delegates to the `kaggle` command-line client, which must be installed and
//! configured with credentials, then moves the first CSV it produced to the
//! requested location.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, VerazError};

/// Default download client.
pub const DEFAULT_KAGGLE_PROGRAM: &str = "kaggle";

/// What a download produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The dataset CSV now lives at this path.
    Saved(PathBuf),
    /// The download succeeded but contained no CSV file.
    NoCsvFound,
}

/// Downloads datasets through the Kaggle CLI.
#[derive(Debug, Clone)]
pub struct DatasetFetcher {
    program: PathBuf,
    download_dir: PathBuf,
}

impl DatasetFetcher {
    /// Create a fetcher that unpacks downloads into `download_dir`.
    pub fn new<P: AsRef<Path>>(download_dir: P) -> Self {
        Self {
            program: PathBuf::from(DEFAULT_KAGGLE_PROGRAM),
            download_dir: download_dir.as_ref().to_path_buf(),
        }
    }

    /// Use a different client executable.
    pub fn with_program<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.program = program.as_ref().to_path_buf();
        self
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Download `dataset_id` (`owner/name`) and move its first CSV to `out`.
    pub fn fetch<P: AsRef<Path>>(&self, dataset_id: &str, out: P) -> Result<FetchOutcome> {
        let out = out.as_ref();
        if dataset_id.trim().is_empty() {
            return Err(VerazError::invalid_argument("dataset identifier is empty"));
        }

        log::info!("downloading dataset {dataset_id} from Kaggle");
        fs::create_dir_all(&self.download_dir)?;

        let status = Command::new(&self.program)
            .args(["datasets", "download", "-d", dataset_id, "-p"])
            .arg(&self.download_dir)
            .arg("--unzip")
            .status()
            .map_err(|e| {
                VerazError::fetch(format!(
                    "cannot run '{}': {e}. Make sure the kaggle CLI is installed and configured",
                    self.program.display()
                ))
            })?;

        if !status.success() {
            return Err(VerazError::fetch(format!(
                "'{}' failed with {status}. Make sure the kaggle CLI is installed and configured",
                self.program.display()
            )));
        }

        let Some(csv_path) = self.first_csv()? else {
            log::warn!(
                "no CSV files found in {} after download; check the dataset manually",
                self.download_dir.display()
            );
            return Ok(FetchOutcome::NoCsvFound);
        };
        log::info!("found {}", csv_path.display());

        if csv_path != out {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            move_file(&csv_path, out)?;
        }
        log::info!("dataset saved to {}", out.display());

        Ok(FetchOutcome::Saved(out.to_path_buf()))
    }

    /// First `*.csv` file in the download directory, by name.
    fn first_csv(&self) -> Result<Option<PathBuf>> {
        let mut csv_files: Vec<PathBuf> = fs::read_dir(&self.download_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension() == Some(OsStr::new("csv")))
            .collect();
        csv_files.sort();
        Ok(csv_files.into_iter().next())
    }
}

/// Rename, falling back to copy + remove across filesystems.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)?;
    Ok(())
}
