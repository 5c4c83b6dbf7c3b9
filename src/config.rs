//! Run configuration and the input/output streams it names.

use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Everything a run needs to know, read once before any work starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Input file; standard input when `None`.
    pub input: Option<PathBuf>,
    /// Output file; standard output when `None`.
    pub output: Option<PathBuf>,
    /// Full hue rotations across the whole output sequence.
    pub cycles: i32,
    /// Times to play the original clip. `0` or less plays it once.
    pub repeats: i32,
    /// Delay, in hundredths of a second, given to a single static frame.
    pub frame_rate: u16,
    /// Add color to a black-and-white source before rotating.
    pub colorize: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            cycles: 1,
            repeats: 0,
            frame_rate: 10,
            colorize: false,
        }
    }
}

impl Config {
    pub fn open_input(&self) -> Result<Box<dyn Read>> {
        match &self.input {
            None => Ok(Box::new(io::stdin().lock())),
            Some(path) => File::open(path)
                .map(|file| Box::new(file) as Box<dyn Read>)
                .map_err(|source| Error::OpenInput {
                    path: path.clone(),
                    source,
                }),
        }
    }

    /// Opens the output, creating or truncating a named file.
    pub fn open_output(&self) -> Result<Box<dyn Write>> {
        match &self.output {
            None => Ok(Box::new(io::stdout().lock())),
            Some(path) => create_output(path)
                .map(|file| Box::new(file) as Box<dyn Write>)
                .map_err(|source| Error::OpenOutput {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

fn create_output(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path)
}

/// Maps an empty path or `-` to `None`, meaning a standard stream.
pub fn stream_path(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty() && p.as_os_str() != "-")
}
