mod forms;
mod menu;
mod prompt;

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rusqlite::{Connection, OpenFlags};
use serde::Serialize;
use storefront_core::{
    Address, Cart, CartItem, Category, Customer, Entity, Order, Product, Return, Review, Sku,
};
use storefront_db::{AppConfig, QueryOrigin, QuerySource};
use storefront_sqlite::{
    Bootstrap, EntityManager, Store, open_existing, prepare_connection, run_init, run_seed,
    status,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::menu::{CYAN, Console, GREEN, Palette, YELLOW};
use crate::prompt::Prompt;

#[derive(Debug, Parser)]
#[command(name = "storefront", version)]
#[command(about = "Interactive console for the storefront database")]
struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database file (overrides the config).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Directory of SQL files that takes precedence over the bundled ones.
    #[arg(long, global = true)]
    queries: Option<PathBuf>,
    /// Disable ANSI colors.
    #[arg(long, global = true)]
    no_color: bool,
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the interactive menu (default).
    Menu,
    /// Create the database if needed and (re)run the init script.
    Init(InitArgs),
    /// Insert the sample data.
    Seed,
    /// Show whether the schema exists and the row count of each table.
    Status,
    /// Print every record of one entity.
    List(ListArgs),
    /// Print the effective configuration, or write it to a file.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct InitArgs {
    /// Also insert the sample data.
    #[arg(long)]
    seed: bool,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Entity to list.
    entity: EntityKind,
    /// Print a JSON array instead of one line per record.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// YAML file to write instead of printing.
    #[arg(long, value_name = "FILE")]
    write: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EntityKind {
    Customer,
    Category,
    Product,
    Sku,
    Cart,
    CartItem,
    Review,
    Address,
    Order,
    Return,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_config(&cli).and_then(|config| {
        let queries = load_queries(&config)?;
        match cli.command {
            None | Some(Command::Menu) => run_menu(&config, &queries),
            Some(Command::Init(args)) => run_init_command(&config, &queries, args),
            Some(Command::Seed) => run_seed_command(&config, &queries),
            Some(Command::Status) => run_status(&config),
            Some(Command::List(args)) => run_list(&config, &queries, args),
            Some(Command::Config(args)) => run_config(&config, &args),
        }
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig, String> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.database = db.clone();
    }
    if let Some(dir) = &cli.queries {
        config.queries_dir = Some(dir.clone());
    }
    if cli.no_color {
        config.color = false;
    }
    Ok(config)
}

fn load_queries(config: &AppConfig) -> Result<QuerySource, String> {
    let mut builder = QuerySource::builder();
    if let Some(dir) = &config.queries_dir {
        builder = builder.from_dir(dir);
    }
    let queries = builder
        .with_bundled()
        .build()
        .map_err(|e| format!("Failed to load SQL queries: {e}"))?;

    if let Some(dir) = &config.queries_dir {
        if queries.origin() == &QueryOrigin::Multiple(vec![QueryOrigin::Bundled]) {
            warn!(dir = %dir.display(), "query directory unusable, using bundled SQL");
        }
    }
    Ok(queries)
}

// ---------------------------------------------------------------------------
// Interactive menu
// ---------------------------------------------------------------------------

fn run_menu(config: &AppConfig, queries: &QuerySource) -> Result<(), String> {
    let palette = Palette::new(config.color);
    print_banner(palette);

    let mut prompt = Prompt::new(io::stdin().lock(), io::stdout());
    println!(
        "{}",
        palette.paint(
            YELLOW,
            format!("Connecting to {}...", config.database.display())
        )
    );

    let seed_question = format!("Load sample data ({})? (y/N): ", config.seed_script);
    let ready = Bootstrap::new(&config.database, queries)
        .init_script(&config.init_script)
        .seed_script(&config.seed_script)
        .connect(|| prompt.confirm(&seed_question).unwrap_or(false))
        .map_err(|e| format!("Could not initialize the database: {e}"))?;

    if ready.created {
        println!(
            "{}",
            palette.paint(
                GREEN,
                format!("Database {} created and connected", config.database.display())
            )
        );
    } else {
        println!(
            "{}",
            palette.paint(GREEN, format!("Connected to {}", config.database.display()))
        );
    }
    if ready.seeded {
        println!("{}", palette.paint(GREEN, "Sample data inserted."));
    }

    Console::new(prompt, &ready.conn, queries, config)
        .run()
        .map_err(|e| format!("Console I/O failed: {e}"))?;
    println!("Goodbye");
    Ok(())
}

fn print_banner(palette: Palette) {
    let banner = [
        "+----------------------------------------------+",
        "|              STOREFRONT CONSOLE              |",
        "+----------------------------------------------+",
        "|    Interactive CRUD for every store record   |",
        "+----------------------------------------------+",
    ]
    .join("\n");
    println!("{}", palette.paint(CYAN, banner));
}

// ---------------------------------------------------------------------------
// Maintenance commands
// ---------------------------------------------------------------------------

fn run_init_command(
    config: &AppConfig,
    queries: &QuerySource,
    args: InitArgs,
) -> Result<(), String> {
    let conn = Connection::open(&config.database).map_err(|e| {
        format!(
            "Failed to open database '{}': {e}",
            config.database.display()
        )
    })?;
    prepare_connection(&conn).map_err(|e| format!("Failed to prepare connection: {e}"))?;
    run_init(&conn, queries, &config.init_script)
        .map_err(|e| format!("{} failed: {e}", config.init_script))?;
    println!(
        "Schema initialized in '{}'.",
        config.database.display()
    );

    if args.seed {
        run_seed(&conn, queries, &config.seed_script)
            .map_err(|e| format!("{} failed: {e}", config.seed_script))?;
        println!("Sample data inserted.");
    }
    Ok(())
}

fn run_seed_command(config: &AppConfig, queries: &QuerySource) -> Result<(), String> {
    let conn = open_database(config)?;
    run_seed(&conn, queries, &config.seed_script)
        .map_err(|e| format!("{} failed: {e}", config.seed_script))?;
    println!("Sample data inserted.");
    Ok(())
}

fn run_status(config: &AppConfig) -> Result<(), String> {
    let conn = Connection::open_with_flags(&config.database, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| {
            format!(
                "Failed to open database '{}': {e}",
                config.database.display()
            )
        })?;
    let report = status(&conn).map_err(|e| format!("Failed to read status: {e}"))?;

    println!("Database: {}", config.database.display());
    println!(
        "  Tables exist: {}",
        if report.tables_exist { "yes" } else { "no" }
    );
    for (table, count) in &report.row_counts {
        println!("  {table}: {count}");
    }
    if report.tables_exist {
        println!("  Total rows: {}", report.total_rows());
    }
    Ok(())
}

fn run_list(config: &AppConfig, queries: &QuerySource, args: ListArgs) -> Result<(), String> {
    let conn = open_database(config)?;
    let store = Store::new(&conn, queries);
    match args.entity {
        EntityKind::Customer => print_records::<Customer>(store, args.json),
        EntityKind::Category => print_records::<Category>(store, args.json),
        EntityKind::Product => print_records::<Product>(store, args.json),
        EntityKind::Sku => print_records::<Sku>(store, args.json),
        EntityKind::Cart => print_records::<Cart>(store, args.json),
        EntityKind::CartItem => print_records::<CartItem>(store, args.json),
        EntityKind::Review => print_records::<Review>(store, args.json),
        EntityKind::Address => print_records::<Address>(store, args.json),
        EntityKind::Order => print_records::<Order>(store, args.json),
        EntityKind::Return => print_records::<Return>(store, args.json),
    }
}

fn print_records<E: Entity + Serialize>(store: Store<'_>, json: bool) -> Result<(), String> {
    let records = EntityManager::<E>::new(store)
        .list()
        .map_err(|e| format!("Failed to list {} records: {e}", E::LABEL))?;

    if json {
        let out = serde_json::to_string_pretty(&records)
            .map_err(|e| format!("Failed to serialize records: {e}"))?;
        println!("{out}");
    } else {
        for (i, record) in records.iter().enumerate() {
            println!("#{}: {record}", i + 1);
        }
    }
    Ok(())
}

fn run_config(config: &AppConfig, args: &ConfigArgs) -> Result<(), String> {
    match &args.write {
        Some(path) => {
            config
                .save(path)
                .map_err(|e| format!("Failed to write config '{}': {e}", path.display()))?;
            println!("Configuration written to '{}'.", path.display());
        }
        None => {
            let yaml = serde_yaml::to_string(config)
                .map_err(|e| format!("Failed to serialize config: {e}"))?;
            print!("{yaml}");
        }
    }
    Ok(())
}

fn open_database(config: &AppConfig) -> Result<Connection, String> {
    open_existing(&config.database).map_err(|e| {
        format!(
            "Failed to open database '{}': {e} (run `storefront init` first)",
            config.database.display()
        )
    })
}
