use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use grover::{MatchScope, SortOrder, IGNORE_FILE_NAME};

/// Find files by approximate name.
#[derive(Parser)]
#[command(name = "grover")]
#[command(about = "Fuzzy file finder with a cached directory crawl")]
#[command(version)]
struct Args {
    /// Name (or part of a name) to look for
    query: String,

    /// Report progress and non-fatal errors on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Discard the cached listing and crawl again
    #[arg(short, long)]
    clear: bool,

    /// Directory to crawl
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Maximum number of results (unbounded by default)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Minimum confidence a file must exceed
    #[arg(short, long, default_value_t = 0.6)]
    threshold: f64,

    /// Penalty for each query character missing from a name
    #[arg(long, default_value_t = grover::DEFAULT_FUZZ)]
    fuzz: f64,

    /// What to match the query against
    #[arg(long, value_enum, default_value_t = Scope::Name)]
    scope: Scope,

    /// Result order by confidence
    #[arg(long, value_enum, default_value_t = Order::Asc)]
    order: Order,

    /// Ignore file to load
    #[arg(long, default_value = IGNORE_FILE_NAME)]
    ignore_file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Scope {
    Name,
    Path,
    Both,
}

impl From<Scope> for MatchScope {
    fn from(s: Scope) -> Self {
        match s {
            Scope::Name => MatchScope::Name,
            Scope::Path => MatchScope::Path,
            Scope::Both => MatchScope::Both,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    Asc,
    Desc,
}

impl From<Order> for SortOrder {
    fn from(o: Order) -> Self {
        match o {
            Order::Asc => SortOrder::Ascending,
            Order::Desc => SortOrder::Descending,
        }
    }
}

fn setup_logging(verbose: bool) {
    // Reports are also gated on -v, so RUST_LOG alone adds nothing.
    let default = if verbose { "debug" } else { "off" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) {
    let mut crawler = grover::crawler()
        .fuzz(args.fuzz)
        .scope(args.scope.into())
        .order(args.order.into())
        .verbose(args.verbose)
        .build();

    crawler.load_ignore_rules_from(&args.ignore_file);

    if args.clear {
        match crawler.clear_cache(&args.root) {
            Ok(true) if args.verbose => info!(root = %args.root.display(), "cache cleared"),
            Err(e) if args.verbose => warn!(error = %e, path = ?e.path(), "cache not cleared"),
            _ => {}
        }
    }

    let restored = if args.clear {
        false
    } else {
        match crawler.restore(&args.root) {
            Ok(_) => true,
            Err(e) => {
                if args.verbose && !e.is_not_found() {
                    warn!(error = %e, path = ?e.path(), "cache unusable, crawling");
                }
                false
            }
        }
    };

    if !restored {
        crawler.crawl(&args.root);
    }

    println!("File count: {}", crawler.files().len());
    for m in crawler.find(args.limit, &args.query, args.threshold) {
        println!("{}", m.record.full_path());
    }
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);
    run(args);
}
