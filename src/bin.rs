/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
use clap::Parser;
use view_sphere::export::{ExportFormat, PatchSchemeRecord};
use view_sphere::{Hemisphere, SchemeOptions, Subdivision, ViewSphere};

#[derive(Parser, Debug)]
#[command(author, version, about = "Prints the sky patches of a Tregenza/Reinhart scheme", long_about = None)]
struct Inputs {
    /// A JSON file with the scheme options. Other flags override it.
    #[arg(short, long)]
    options: Option<String>,

    /// 1 for Tregenza, 2 for Reinhart, and so on
    #[arg(short, long)]
    division_count: Option<usize>,

    /// Subdivide the Tregenza patches in place
    #[arg(long)]
    in_place: bool,

    /// Include the patches below the horizon
    #[arg(long)]
    sphere: bool,

    /// Only include patches within this angle (degrees) of the horizon
    #[arg(long)]
    offset_angle: Option<view_sphere::Float>,

    /// Include the weight of each patch
    #[arg(short, long)]
    weights: bool,

    /// The output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: ExportFormat,

    /// e.g., "warn", "debug" or "view_sphere=trace"
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn run(args: Inputs) -> view_sphere::Result<String> {
    let mut options = match &args.options {
        Some(path) => SchemeOptions::from_file(path)?,
        None => SchemeOptions::default(),
    };
    if let Some(division_count) = args.division_count {
        options.division_count = division_count;
    }
    if args.in_place {
        options.subdivision = Subdivision::InPlace;
    }
    if args.sphere {
        options.hemisphere = Hemisphere::Sphere;
    }
    if let Some(angle) = args.offset_angle {
        options.offset_angle = Some(angle);
    }
    log::info!("Building patches for {:?}", options);

    let view_sphere = ViewSphere::new();
    let patches = view_sphere.patches(&options)?;
    let weights = if args.weights {
        Some(view_sphere.weights(&options)?)
    } else {
        None
    };
    let record = PatchSchemeRecord::new(&patches, weights.as_ref().map(|w| w.as_slice()))?;
    record.export(args.format)
}

fn main() {
    let args = Inputs::parse();

    // Logs go to stderr, so stdout only has the patches
    let _logger = match flexi_logger::Logger::try_with_str(&args.log_level).and_then(|l| l.start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Logger initialization failed with {}", e);
            None
        }
    };

    match run(args) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
