//! Command-line interface for xloc
//!
//! Translates path expressions into widget locator declarations.
//!
//! Usage:
//!   xloc `<expr>` [--format `<format>`] [--config `<path>`] [--segments]   - Translate one expression
//!   xloc --file `<path>` [...]                                        - Translate one expression per line
//!   xloc --list-formats                                             - List output formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use xloc::config::{Loader, ParserMode, XlocConfig};
use xloc::diagnostics;
use xloc::formats::FormatRegistry;
use xloc::loader::{ExpressionLoader, LoaderError};
use xloc::pipeline::Pipeline;
use xloc::transforms::Runnable;

fn main() {
    let matches = Command::new("xloc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate XPath-style paths into widget locator declarations")
        .arg_required_else_help(true)
        .arg(
            Arg::new("expr")
                .help("Path expression, e.g. //button[@name='submit']")
                .required_unless_present_any(["file", "list-formats"])
                .conflicts_with("file")
                .index(1),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .help("Read expressions from a file, one per line ('#' starts a comment)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default from config: declarations)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("segments")
                .long("segments")
                .help("Use the regex segment reader instead of the full grammar")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log to stderr; repeat for more detail")
                .action(ArgAction::Count),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let registry = FormatRegistry::with_defaults();

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    let config = load_config(&matches);
    let rendering = config.render.rendering(&registry).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Available formats: {}", registry.list_formats().join(", "));
        std::process::exit(1);
    });
    tracing::info!(format = rendering.format_name(), mode = ?config.parser.mode, "configured");

    match config.parser.mode {
        ParserMode::Full => run(&Pipeline::standard().with_rendering(rendering), &matches),
        ParserMode::Segments => run(&Pipeline::segments().with_rendering(rendering), &matches),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> XlocConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    let mut overrides: Vec<(&str, String)> = Vec::new();
    if let Some(format) = matches.get_one::<String>("format") {
        overrides.push(("render.format", format.clone()));
    }
    if matches.get_flag("segments") {
        overrides.push(("parser.mode", "segments".to_string()));
    }

    overrides
        .into_iter()
        .try_fold(loader, |loader, (key, value)| loader.set_override(key, value))
        .and_then(Loader::build)
        .unwrap_or_else(|e| {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        })
}

fn run<P: Runnable<String, String>>(pipeline: &P, matches: &ArgMatches) {
    if let Some(path) = matches.get_one::<String>("file") {
        handle_file_command(pipeline, path);
    } else if let Some(expr) = matches.get_one::<String>("expr") {
        handle_expression_command(pipeline, expr);
    }
}

/// Translate a single expression
fn handle_expression_command<P: Runnable<String, String>>(pipeline: &P, expr: &str) {
    match pipeline.run(expr.to_string()) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprint!("{}", diagnostics::report(expr, &e));
            std::process::exit(1);
        }
    }
}

/// Translate every expression in a file
fn handle_file_command<P: Runnable<String, String>>(pipeline: &P, path: &str) {
    let loader = ExpressionLoader::from_path(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    });

    match loader.with(pipeline) {
        Ok(outputs) => {
            for output in outputs {
                print!("{}", output);
            }
        }
        Err(LoaderError::TransformError {
            line,
            expression,
            error,
        }) => {
            eprintln!("{}:{}", path, line);
            eprint!("{}", diagnostics::report(&expression, &error));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map_or("", |f| f.description());
        println!("  {:<14} {}", name, description);
    }
}
