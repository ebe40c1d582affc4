use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser as ClapParser;
use pratt_parser::{
    arena::arena::{Arena, ArenaConfig, REGION_INIT_CAP},
    ast::printer::SExpr,
    lexer::lexer::tokenize,
    parser::parser::{parse, ParserConfig, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT},
    render_error,
};
use tracing_subscriber::EnvFilter;

/// Parse arithmetic expressions and print their trees as S-expressions.
#[derive(ClapParser, Debug)]
#[command(version, about)]
struct Args {
    /// Source file with `;`-terminated expressions
    #[arg(required_unless_present = "expr", conflicts_with = "expr")]
    file: Option<PathBuf>,

    /// Parse this text instead of a file
    #[arg(short, long)]
    expr: Option<String>,

    /// Capacity in bytes of each arena region
    #[arg(long, default_value_t = REGION_INIT_CAP)]
    region_capacity: usize,

    /// Deepest allowed expression nesting, at most 1024
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print timings and arena usage to stderr
    #[arg(long)]
    stats: bool,
}

/// Installs a stderr subscriber when `PRATT_LOG` or `RUST_LOG` is set.
fn init_tracing() {
    let filter = match std::env::var("PRATT_LOG") {
        Ok(value) => EnvFilter::builder().parse_lossy(value),
        Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let (source, file_name) = match (&args.expr, &args.file) {
        (Some(expr), _) => (expr.clone(), String::from("shell")),
        (None, Some(path)) => match read_to_string(path) {
            Ok(contents) => (contents, path.to_string_lossy().into_owned()),
            Err(error) => {
                eprintln!("Failed to read {}: {}", path.display(), error);
                return ExitCode::FAILURE;
            }
        },
        (None, None) => {
            eprintln!("No input given");
            return ExitCode::FAILURE;
        }
    };

    let arena_config = ArenaConfig::with_region_capacity(args.region_capacity);
    let mut arena = match Arena::with_config(arena_config) {
        Ok(arena) => arena,
        Err(error) => {
            eprintln!("Failed to set up the arena: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let tokens = tokenize(&source, Some(file_name));
    if args.stats {
        eprintln!("Tokenized in {:?}", start.elapsed());
    }

    let parse_start = Instant::now();
    if args.max_depth > MAX_DEPTH_LIMIT {
        eprintln!(
            "--max-depth {} is above the supported limit, using {}",
            args.max_depth, MAX_DEPTH_LIMIT
        );
    }
    let config = ParserConfig::with_max_depth(args.max_depth);
    let roots = match parse(tokens, &mut arena, config) {
        Ok(roots) => roots,
        Err(error) => {
            eprint!("{}", render_error(&error, &source));
            return ExitCode::FAILURE;
        }
    };
    if args.stats {
        eprintln!("Parsed in {:?}", parse_start.elapsed());
    }

    for root in roots {
        println!("{}", SExpr::new(&arena, root));
    }

    if args.stats {
        for (index, region) in arena.stats().iter().enumerate() {
            eprintln!(
                "region {}: {} / {} bytes used",
                index, region.used, region.capacity
            );
        }
        eprintln!(
            "{} region(s), {} of {} bytes used",
            arena.region_count(),
            arena.used(),
            arena.capacity()
        );
    }

    arena.release();
    ExitCode::SUCCESS
}
