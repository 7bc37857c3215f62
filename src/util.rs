// ZigBee-Eval: Analysis of Extended ZigBee Channel Simulation Results
// Copyright (C) 2024-2025 Roland Schmid <roschmi@ethz.ch> and Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Utility module collection of functions

use std::path::{Path, PathBuf};

use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

/// Configuration file read by [`init_logging`] if present in the working directory.
pub const LOG_CONFIG: &str = "log4rs.yml";

/// Initializes logging from `log4rs.yml`, or logs `info` and above to stderr if the file is
/// missing. Calling this more than once is a no-op.
pub fn init_logging() {
    if Path::new(LOG_CONFIG).exists() {
        if let Err(e) = log4rs::init_file(LOG_CONFIG, Default::default()) {
            eprintln!("Cannot initialize logging from {LOG_CONFIG}: {e}");
        }
        return;
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{h({l}):5.5} | {M} - {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info));
    match config {
        Ok(config) => {
            // fails only if a logger is already set
            let _ = log4rs::init_config(config);
        }
        Err(e) => eprintln!("Invalid logging configuration: {e}"),
    }
}

pub trait PathBufExt: Sized {
    fn then(self, p: impl AsRef<Path>) -> PathBuf;

    /// Appends `p`, replacing the first `{}` with `stem`.
    fn then_fmt(self, p: impl AsRef<str>, stem: &str) -> PathBuf {
        self.then(p.as_ref().replacen("{}", stem, 1))
    }
}

impl PathBufExt for PathBuf {
    fn then(mut self, p: impl AsRef<Path>) -> PathBuf {
        self.push(p);
        self
    }
}

impl PathBufExt for &Path {
    fn then(self, p: impl AsRef<Path>) -> PathBuf {
        let mut path = self.to_path_buf();
        path.push(p);
        path
    }
}
