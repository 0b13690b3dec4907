//! labelforge – command-line label exporter.
//!
//! Usage:
//!   labelforge <library.json> [out_dir] [--mode individual|pages|sheet]
//!              [--template <id>] [--page letter|a4|legal]
//!              [--format png|pdf] [--scale N]
//!
//! Reads an exported color library, expands it into label instances, and
//! writes the composed artifacts into `out_dir` (default: `labels/` next
//! to the input file).

use std::{env, fs, path::PathBuf, process};

use label_forge::export::{run_export, ArtifactFormat, ExportConfig, ExportMode, FsSink};
use label_forge::library::Library;
use label_forge::render::SwatchRasterizer;
use label_forge::style::LabelStyle;
use label_forge::templates::PageSize;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut out_dir: Option<PathBuf> = None;
    let mut mode_arg = "sheet".to_string();
    let mut template = "avery-5163".to_string();
    let mut page_arg = "letter".to_string();
    let mut format = ArtifactFormat::Png;
    let mut scale = 3.0f64;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1).peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--mode" | "-m" => {
                if let Some(v) = iter.next() {
                    mode_arg = v.clone();
                }
            }
            "--template" | "-t" => {
                if let Some(v) = iter.next() {
                    template = v.clone();
                }
            }
            "--page" | "-p" => {
                if let Some(v) = iter.next() {
                    page_arg = v.clone();
                }
            }
            "--format" | "-f" => match iter.next().map(String::as_str) {
                Some("pdf") => format = ArtifactFormat::Pdf,
                Some("png") | None => format = ArtifactFormat::Png,
                Some(other) => {
                    eprintln!("Unknown format: {other}");
                    process::exit(1);
                }
            },
            "--scale" | "-s" => {
                if let Some(v) = iter.next() {
                    match v.parse::<f64>() {
                        Ok(s) => scale = s,
                        Err(_) => {
                            eprintln!("Invalid scale: {v}");
                            process::exit(1);
                        }
                    }
                }
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    out_dir = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let input = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no library file specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    // Default output: a `labels` directory next to the input file.
    let out_dir = out_dir.unwrap_or_else(|| {
        input
            .parent()
            .map(|p| p.join("labels"))
            .unwrap_or_else(|| PathBuf::from("labels"))
    });

    let json = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let mut library = Library::new();
    if let Err(e) = library.import_json(&json) {
        eprintln!("Error importing '{}': {e}", input.display());
        process::exit(1);
    }

    let page_size = match page_arg.as_str() {
        "letter" => PageSize::Letter,
        "a4" => PageSize::A4,
        "legal" => PageSize::Legal,
        other => {
            eprintln!("Unknown page size: {other}");
            process::exit(1);
        }
    };

    let mode = match mode_arg.as_str() {
        "individual" => ExportMode::Individual,
        "pages" => ExportMode::OnePerPage { page_size },
        "sheet" => ExportMode::Sheet {
            template: template.clone(),
            custom_columns: None,
            custom_rows: None,
            custom_spacing: None,
        },
        other => {
            eprintln!("Unknown mode: {other}");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let config = ExportConfig {
        mode,
        format,
        scale,
    };
    let style = LabelStyle::default();
    let mut sink = FsSink::new(&out_dir);

    match run_export(library.colors(), &style, &config, &SwatchRasterizer, &mut sink) {
        Ok(summary) => {
            eprintln!(
                "Wrote {} artifact{} for {} label{} into '{}' ({} mode)",
                summary.filenames.len(),
                if summary.filenames.len() == 1 { "" } else { "s" },
                summary.labels,
                if summary.labels == 1 { "" } else { "s" },
                out_dir.display(),
                summary.strategy,
            );
        }
        Err(e) => {
            eprintln!("Error exporting labels: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("labelforge – paint label exporter (label-forge)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <library.json> [out_dir] [flags]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <library.json>  Exported color library (with optional inventory)");
    eprintln!("  [out_dir]       Output directory (default: labels/ next to the input)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --mode, -m      individual | pages | sheet  (default: sheet)");
    eprintln!("  --template, -t  Sheet template id            (default: avery-5163)");
    eprintln!("  --page, -p      letter | a4 | legal          (default: letter)");
    eprintln!("  --format, -f    png | pdf — PDF applies to pages mode (default: png)");
    eprintln!("  --scale, -s     Render quality multiplier    (default: 3)");
    eprintln!("  --help          Print this message");
}
