//! Command-line front end mirroring the Ghostscript-style ps2pdf invocation.

use std::process::ExitCode;

use ps2pdf_oxide::{ConvertOptions, ErrorSink, PaperSize, Processor};

fn print_usage() {
    eprintln!("Usage: ps2pdf [options] <input.ps> [output.pdf]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -sOutputFile=<path>        Output PDF path (overrides the positional output)");
    eprintln!("  -dCompatibilityLevel=<n>   PDF version written in the header (default 1.7)");
    eprintln!("  -sPAPERSIZE=<name>         a4, letter, legal, a3, a5 or executive (default a4)");
    eprintln!("  -q                         Suppress progress output");
    eprintln!("  -h, --help                 Show this help");
}

struct CliArgs {
    input: String,
    output: String,
    options: ConvertOptions,
    quiet: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut options = ConvertOptions::default();
    let mut output_flag: Option<String> = None;
    let mut positional: Vec<String> = Vec::new();
    let mut quiet = false;

    for arg in args {
        if let Some(path) = arg.strip_prefix("-sOutputFile=") {
            output_flag = Some(path.to_string());
        } else if let Some(level) = arg.strip_prefix("-dCompatibilityLevel=") {
            let level: f64 = level
                .parse()
                .map_err(|_| format!("invalid compatibility level '{}'", level))?;
            options = options.with_compatibility_level(level);
        } else if let Some(name) = arg.strip_prefix("-sPAPERSIZE=") {
            let paper = PaperSize::from_name(name)
                .ok_or_else(|| format!("unknown paper size '{}'", name))?;
            options = options.with_paper(paper);
        } else if arg == "-q" {
            quiet = true;
        } else if arg.starts_with('-') && arg.len() > 1 {
            return Err(format!("unknown option '{}'", arg));
        } else {
            positional.push(arg.clone());
        }
    }

    let input = positional
        .first()
        .cloned()
        .ok_or_else(|| "no input file given".to_string())?;
    let output = output_flag
        .or_else(|| positional.get(1).cloned())
        .unwrap_or_else(|| default_output(&input));

    Ok(CliArgs {
        input,
        output,
        options,
        quiet,
    })
}

/// Derive `foo.pdf` from `foo.ps`, preserving any directory prefix.
fn default_output(input: &str) -> String {
    let path = std::path::Path::new(input);
    path.with_extension("pdf").to_string_lossy().to_string()
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("error: {}", message);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let processor = Processor::new(cli.options);
    let mut sink = ErrorSink::new();

    if !cli.quiet {
        eprintln!("converting {} -> {}", cli.input, cli.output);
    }

    match processor.convert_file(&cli.input, &cli.output, &mut sink) {
        Ok(()) => {
            if !cli.quiet {
                for warning in sink.warnings() {
                    eprintln!("warning: {}", warning);
                }
                eprintln!("wrote {}", cli.output);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
