use std::fs::File;
use std::io::{Error as IoError, ErrorKind, Read, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::prelude::*;

pub const DEFAULT_CONTENT: &str = r#"
# This configuration file is generated automatically. Feel free to do some
# modification. Every key is optional.

# The `duration` section specifies the length of each phase in minutes.
# Every `long_break_interval`-th completed focus phase is followed by a long
# break instead of a short one.
[duration]
focus = 25
short_break = 5
long_break = 15
long_break_interval = 4

# The `points` section specifies the points earned per completed focus phase.
# `task_bonus` is added when the session is linked to a task.
[points]
base = 25
task_bonus = 10

# The `message` section specifies texts shown when breaks end or are skipped,
# and when points could not be saved.
[message]
break_ended = "Break's over! Ready to focus again?"
break_skipped = "Break skipped. Start when you're ready!"
points_fallback = "Points saved locally"
"#;

/// A reader which reads the configuration content and creates a default
/// configuration file if it is missing.
pub struct ContentReader {
    path: PathBuf,
    create_new: bool,
}

impl ContentReader {
    /// Creates a new [`ContentReader`].
    pub fn new<P: AsRef<Path>>(path: P, create_new: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            create_new,
        }
    }

    /// Read content from the file.
    ///
    /// # Errors
    ///
    /// This function will return an error if file doesn't exist or it fails to
    /// create a configuration file.
    pub fn read(self) -> Result<String, ReadContentError> {
        let Self { path, create_new } = self;
        let mut file = Self::open_configuration(path, create_new)?;
        let mut content = String::new();
        file.read_to_string(&mut content).context(FileSystemSnafu {
            when: "Reading configuration",
        })?;
        Ok(content)
    }

    /// Open the configuration file, creating it from [`DEFAULT_CONTENT`] when
    /// allowed.
    ///
    /// # Errors
    ///
    /// This function will return an error if file doesn't exists or it fails to
    /// create a default one.
    fn open_configuration(path: PathBuf, create_new: bool) -> Result<File, ReadContentError> {
        match File::open(path.as_path()) {
            Ok(file) => Ok(file),
            Err(err) if err.kind() == ErrorKind::NotFound && create_new => {
                tracing::info!(path = %path.display(), "Creating default configuration");
                Self::create_configuration(path.as_path())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => NotFoundSnafu { path }.fail(),
            Err(err) => Err(err).context(FileSystemSnafu {
                when: "Opening configuration file",
            }),
        }
    }

    /// Create a default configuration file.
    ///
    /// # Errors
    ///
    /// This function will return an error if the creation fails.
    fn create_configuration<P: AsRef<Path>>(path: P) -> Result<File, ReadContentError> {
        let mut file = File::options()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)
            .context(FileSystemSnafu {
                when: "Creating configuration file",
            })?;

        file.write_all(DEFAULT_CONTENT.as_bytes())
            .context(FileSystemSnafu {
                when: "Writing default configuration content",
            })?;

        file.rewind().context(FileSystemSnafu {
            when: "Resetting file cursor position to start",
        })?;

        Ok(file)
    }
}

/// An error type for reading content from the configuration file.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ReadContentError {
    #[snafu(display("Could not open inexistent file {}", path.display()))]
    NotFound { path: PathBuf },
    #[snafu(display("Could not access configuration: {when}"))]
    FileSystem {
        when: String,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}
