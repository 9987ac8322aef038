// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use clap::Subcommand;
use hashdeck_core::Fallible;
use log::LevelFilter;

use crate::cmd::check::check_collection;
use crate::cmd::export::export_collection;
use crate::cmd::hashes::print_hashes;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// File extension of deck files. Default is `md`.
    #[arg(long, global = true, default_value = "md")]
    extension: String,
    /// Log what is being parsed. `RUST_LOG` takes precedence.
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Parse every deck and report the number of unique cards.
    Check {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Export the deduplicated cards as JSON.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Print the hash and location of every unique card.
    Hashes {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let extension = cli.extension.as_str();
    match cli.command {
        Command::Check { directory } => check_collection(directory, extension),
        Command::Export { directory, output } => export_collection(directory, extension, output),
        Command::Hashes { directory } => print_hashes(directory, extension),
    }
}
