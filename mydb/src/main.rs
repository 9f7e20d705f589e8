use std::io::{self, BufRead, Write};

use mydb::config::{DbConfig, validate_table_name};
use mydb::shell::{self, Session};
use mydb::table::Table;
use mydb::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mydb=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load configuration from environment variables
    let config = match DbConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::debug!(
        "Loaded configuration: data_directory={}, table={:?}",
        config.data_directory().display(),
        config.table
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let table_name = match config.table.clone() {
        Some(name) => name,
        None => prompt_table_name(&mut input, &mut stdout).unwrap_or_else(|e| {
            tracing::error!("Failed to read table name: {e}");
            std::process::exit(1);
        }),
    };

    println!("Reading meta-data...");
    let table = Table::open(config.data_directory(), &table_name).unwrap_or_else(|e| {
        println!("{}", shell::load_failure_message(&e));
        tracing::error!("{e}");
        std::process::exit(1);
    });

    println!("Building index tree(s)...");
    let database = Database::build(table).unwrap_or_else(|e| {
        println!("{}", shell::load_failure_message(&e));
        tracing::error!("{e}");
        std::process::exit(1);
    });

    let mut session = Session::new(database);
    print!("{}", session.index_report());

    if let Err(e) = shell::run(&mut session, input, stdout) {
        tracing::error!("Shell I/O error: {e}");
        std::process::exit(1);
    }
}

/// Ask for the table name on the terminal.
fn prompt_table_name<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    write!(output, "Welcome to myDB, please enter tablename> ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let name = line.trim_end_matches(['\r', '\n']).to_owned();

    validate_table_name("tablename", name)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}
