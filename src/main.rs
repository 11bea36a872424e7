// Copyright 2024 The DocAssert Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use json_exact::{AssertionError, JsonExact, NumericMode, Options};

#[doc(hidden)]
#[macro_export]
macro_rules! handle_error {
    ($code:expr, $msg:expr, $($arg:tt)*) => {
        println!($msg, $($arg)*);
        std::process::exit($code);
    };

    ($code:expr, $msg:expr) => {
        println!($msg);
        std::process::exit($code);
    };
}

#[doc(hidden)]
struct Code;

impl Code {
    const SUCCESS: i32 = 0;
    const INTERNAL_ERROR: i32 = 1;
    const INVALID_ARGUMENT: i32 = 2;
    const DECODE_ERROR: i32 = 3;
    const MISMATCH: i32 = 4;
    const UNSUPPORTED_SHAPE: i32 = 5;
}

#[doc(hidden)]
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON document under test
    actual: PathBuf,

    /// JSON document it must match
    expected: PathBuf,

    /// Field path to reset before comparing, e.g. `data.id` or `*.created_at`
    #[clap(short, long = "ignore")]
    ignore: Vec<String>,

    /// JSON options file with `ignore` and `numeric_mode` keys
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Treat `3` and `3.0` as different values
    #[clap(long)]
    strict_numbers: bool,
}

fn read(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            handle_error!(
                Code::INTERNAL_ERROR,
                "Error reading {}: {}",
                path.display(),
                err
            );
        }
    }
}

#[doc(hidden)]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let options = match &cli.config {
        Some(path) => match Options::from_json_str(&read(path)) {
            Ok(options) => options,
            Err(err) => {
                handle_error!(Code::INVALID_ARGUMENT, "Error in config file: {}", err);
            }
        },
        None => Options::default(),
    };
    debug!(?options, "loaded options");

    let mut exact = JsonExact::from_options(options).ignore_paths(cli.ignore);
    if cli.strict_numbers {
        exact = exact.numeric_mode(NumericMode::Strict);
    }

    let actual = read(&cli.actual);
    let expected = read(&cli.expected);

    match exact.compare(&actual, &expected) {
        Ok(()) => {
            info!("documents match");
            println!("OK");
            std::process::exit(Code::SUCCESS);
        }
        Err(err) => match err {
            AssertionError::Mismatch(report) => {
                handle_error!(Code::MISMATCH, "{}", report);
            }
            AssertionError::Decode { .. } | AssertionError::NotAnObject { .. } => {
                handle_error!(Code::DECODE_ERROR, "Error: {}", err);
            }
            AssertionError::InvalidIgnorePath { .. } => {
                handle_error!(Code::INVALID_ARGUMENT, "Error: {}", err);
            }
            AssertionError::UnsupportedShape { .. } => {
                handle_error!(Code::UNSUPPORTED_SHAPE, "Error: {}", err);
            }
        },
    }
}
