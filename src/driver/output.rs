//! Run output directory and files.
//!
//! | File                 | Contents                                        |
//! |----------------------|-------------------------------------------------|
//! | `Input.txt`          | input-parameter report                          |
//! | `Lattice.dat`        | initial snapshot, or latest one when animating  |
//! | `OrderParameter.dat` | `<sweep> <value>` per measurement               |
//! | `Results.txt`        | results report                                  |

use std::fs::{self, File};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::report::{format_input_parameters, format_lattice, format_results};
use super::{Measurement, RunObserver, SirsResults};
use crate::config::SirsConfig;
use crate::engine::lattice::SirsLattice;
use crate::error::SirsResult;

/// Lattice snapshot file name.
pub const LATTICE_FILE: &str = "Lattice.dat";
/// Order-parameter series file name.
pub const ORDER_PARAMETER_FILE: &str = "OrderParameter.dat";
/// Input report file name.
pub const INPUT_FILE: &str = "Input.txt";
/// Results report file name.
pub const RESULTS_FILE: &str = "Results.txt";

/// Timestamped directory name used when none is configured.
#[must_use]
pub fn default_directory_name() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("sirs-{secs}")
}

/// Configured output directory, or a fresh timestamped one.
#[must_use]
pub fn resolve_directory(config: &SirsConfig) -> PathBuf {
    config
        .output
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_directory_name()))
}

/// Observer that writes the run's files into one directory.
#[derive(Debug)]
pub struct OutputWriter {
    directory: PathBuf,
    lattice: File,
    order_parameter: BufWriter<File>,
    animate: bool,
}

impl OutputWriter {
    /// Create `directory` (with parents), open the data files and write
    /// `Input.txt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or any file cannot be created.
    pub fn create(directory: impl AsRef<Path>, config: &SirsConfig) -> SirsResult<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;

        fs::write(directory.join(INPUT_FILE), format_input_parameters(config))?;
        let lattice = File::create(directory.join(LATTICE_FILE))?;
        let order_parameter = BufWriter::new(File::create(directory.join(ORDER_PARAMETER_FILE))?);

        log::info!("Writing output to {}", directory.display());

        Ok(Self {
            directory,
            lattice,
            order_parameter,
            animate: config.run.animate,
        })
    }

    /// Output directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Replace the snapshot file's contents with `lattice`.
    fn write_snapshot(&mut self, lattice: &SirsLattice) -> SirsResult<()> {
        self.lattice.set_len(0)?;
        self.lattice.seek(SeekFrom::Start(0))?;
        self.lattice.write_all(format_lattice(lattice).as_bytes())?;
        self.lattice.flush()?;
        Ok(())
    }
}

impl RunObserver for OutputWriter {
    fn on_start(&mut self, lattice: &SirsLattice) -> SirsResult<()> {
        self.write_snapshot(lattice)
    }

    fn on_measurement(&mut self, measurement: &Measurement, lattice: &SirsLattice) -> SirsResult<()> {
        writeln!(
            self.order_parameter,
            "{} {}",
            measurement.sweep, measurement.order_parameter
        )?;
        if self.animate {
            self.write_snapshot(lattice)?;
        }
        Ok(())
    }

    fn on_finish(&mut self, results: &SirsResults) -> SirsResult<()> {
        self.order_parameter.flush()?;
        fs::write(self.directory.join(RESULTS_FILE), format_results(results))?;
        Ok(())
    }
}
