// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use ank_numerology::{
    angel_number, calculate, import_forms, insert_user, interpretation, load_csv, open_database,
    phase_analysis, validation::describe, verify_count, AppConfig, SaveUserRequest, UserForm,
    UserRecord,
};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ank", version, about = "Chaldean numerology and Lo Shu grid calculator")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides config and ANK_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal form (default)
    Ui,
    /// Calculate numbers for one person
    Calc {
        #[arg(long)]
        first: String,
        #[arg(long, default_value = "")]
        middle: String,
        #[arg(long)]
        last: String,
        /// Date of birth, YYYY-MM-DD
        #[arg(long)]
        dob: String,
        #[arg(long, default_value = "")]
        gender: String,
        /// Mobile number
        #[arg(long)]
        mob: String,
        /// Also store the record in the database
        #[arg(long)]
        save: bool,
    },
    /// Calculate and store every row of a CSV file
    Import {
        /// CSV with header firstName,middleName,lastName,dob,gender,mob
        csv: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Ui);

    // Logging goes to stderr; the terminal UI owns the screen, so keep it quiet there
    if !matches!(command, Commands::Ui) {
        let filter = match cli.verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        };
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = AppConfig::load(cli.config.as_deref())?.with_db_path(cli.db);

    match command {
        Commands::Ui => run_ui_mode(&config),
        Commands::Calc {
            first,
            middle,
            last,
            dob,
            gender,
            mob,
            save,
        } => {
            let form = UserForm {
                first_name: first,
                middle_name: middle,
                last_name: last,
                dob,
                gender,
                mob,
            };
            run_calc(&config, &form, save)
        }
        Commands::Import { csv } => run_import(&config, &csv),
    }
}

fn run_calc(config: &AppConfig, form: &UserForm, save: bool) -> Result<()> {
    if let Err(errors) = form.validate() {
        bail!("Missing input: {}", describe(&errors));
    }
    let input = form.to_input().context("Invalid date of birth")?;

    let calc = calculate(&input);
    let r = &calc.result;

    println!("🔮 Numerology for {} {} {}", form.first_name, form.middle_name, form.last_name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Name Number:     {} (total {})  {}", r.name_number, calc.name_total, interpretation(r.name_number));
    println!("Luck Number:     {}", r.dob_number);
    println!("Moolank:         {}  {}", r.moolank, interpretation(r.moolank));
    println!("Bhagyank:        {}  {}", r.bhagyank, interpretation(r.bhagyank));
    println!("Destiny Number:  {}", r.destiny);
    println!("Angel Number:    {}", angel_number(input.dob.year, form.gender()));

    let phases = phase_analysis(r.moolank, r.bhagyank);
    for (label, dc) in [("Age 0-40 ", &phases.early), ("Age 40-80", &phases.late)] {
        println!(
            "{}:       {}  {}",
            label,
            dc.stars.unwrap_or("(?)"),
            dc.keywords.join(", ")
        );
    }

    println!("\n🔲 Lo Shu Grid");
    println!("{}", calc.grid);

    let missing = calc.grid.missing();
    if !missing.is_empty() {
        let missing: Vec<String> = missing.iter().map(|d| d.to_string()).collect();
        println!("Missing numbers: {}", missing.join(", "));
    }

    if save {
        let conn = open_database(&config.db_path)?;
        let record = UserRecord::new(SaveUserRequest::from_calculation(form, r));
        insert_user(&conn, &record, "cli")?;
        println!("\n✅ Saved as {}", record.id);
    }

    Ok(())
}

fn run_import(config: &AppConfig, csv_path: &Path) -> Result<()> {
    println!("🗄️  Import - CSV → SQLite");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("\n📂 Loading CSV...");
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;
    let forms = load_csv(file)?;
    println!("✓ Loaded {} rows from CSV", forms.len());

    println!("\n🔧 Opening database...");
    let conn = open_database(&config.db_path)?;
    println!("✓ Database ready: {:?}", config.db_path);

    println!("\n💾 Calculating and inserting...");
    let summary = import_forms(&conn, &forms)?;
    println!("✓ Inserted: {} users", summary.inserted);
    println!("✓ Skipped (missing fields or bad date): {}", summary.skipped);

    let count = verify_count(&conn)?;
    println!("\n✅ Database contains {} users", count);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &AppConfig) -> Result<()> {
    let conn = open_database(&config.db_path)?;

    let mut app = ui::App::new();
    ui::run_ui(&mut app, &conn)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &AppConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the calc subcommand: ank calc --first .. --last .. --dob .. --mob ..");
    std::process::exit(1);
}
