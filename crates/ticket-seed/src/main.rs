use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ticket_seed::cli::{load_config, resolve_range, resolve_seed, Args, Command};
use ticket_seed::data::generator::generate_seeded;
use ticket_seed::error::SeedResult;
use ticket_seed::output::export_sql;
use ticket_seed::output::sqlite::{insert_entries, open_database, validation_report};

fn main() -> SeedResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ticket_seed=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_ref())?;

    if let Command::Config = args.command {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let seed = resolve_seed(args.seed, &config);
    config.seed = Some(seed);
    let (start, end) = resolve_range(args.start, args.end, Local::now().date_naive())?;
    info!(seed, %start, %end, "generating");

    match args.command {
        Command::Sql {
            out,
            schema,
            no_manifest,
        } => {
            let export = export_sql(&config, start, end, seed, &out, schema, !no_manifest)?;
            println!(
                "Generated {} entries in {} ({:.2} KB)",
                export.entries,
                out.display(),
                export.bytes as f64 / 1024.0
            );
            println!("Date range: {start} to {end} (seed={seed})");
            if let Some(manifest) = export.manifest {
                println!("wrote manifest: {}", manifest.display());
            }
        }
        Command::Sqlite { db, replace } => {
            let entries = generate_seeded(start, end, &config, seed)?;
            let mut conn = open_database(&db)?;
            let inserted = insert_entries(&mut conn, &entries, replace)?;
            println!("Inserted {inserted} entries into {} (seed={seed})", db.display());
            let promotional = config
                .promotional_types()
                .into_iter()
                .map(|ticket| ticket.name.as_str())
                .collect::<Vec<_>>();
            println!();
            print!("{}", validation_report(&conn, &promotional)?);
        }
        Command::Config => {}
    }

    Ok(())
}
