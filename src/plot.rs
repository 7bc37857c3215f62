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
use std::{io, path::PathBuf, process};

use clap::Parser;

use zigbee_eval::{
    dataset::LoadError,
    pipeline::{self, Options, DEFAULT_DATA_PATH, DEFAULT_OUTPUT_PATH},
    util,
};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Overwrite the input path for the simulation results.
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    data_path: String,
    /// Overwrite the output path for plots.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output_path: String,
    /// Also write interactive HTML charts next to the PNG figures.
    #[arg(long)]
    html: bool,
}

impl From<Args> for Options {
    fn from(args: Args) -> Self {
        Self {
            data_path: PathBuf::from(args.data_path),
            output_path: PathBuf::from(args.output_path),
            html: args.html,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init_logging();

    let opts = Options::from(Args::parse());

    let result = pipeline::run(&opts, &mut io::stdout().lock());
    if let Err(e) = result {
        if let Some(LoadError::NotFound(path)) = e.downcast_ref::<LoadError>() {
            println!("❌ Input file not found: {}", path.display());
            println!("   Run the extended simulation batch first to generate the results.");
            log::error!("Could not read data in {path:?}!");
            process::exit(1)
        }
        return Err(e.into());
    }

    println!("\n✓ Analysis complete! Figures in {}", opts.output_path.display());
    Ok(())
}
