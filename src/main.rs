mod analytics;
mod cli;
mod commands;
mod db;
mod error;
mod format;
mod models;

use clap::Parser;
use cli::{Cli, Commands, FeedbackAction};
use error::handle_error;
use format::Format;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let fmt = Format::from_str(&cli.format).unwrap_or_else(|| {
        eprintln!("ERROR: Invalid format '{}'. Valid: compact, json, pretty", cli.format);
        std::process::exit(1);
    });

    let result = match cli.command {
        Commands::Init => commands::init::run(fmt, cli.db.as_deref()),
        _ => {
            // All other commands need the database
            let db_path = match db::find_db(cli.db.as_deref()) {
                Ok(p) => p,
                Err(e) => handle_error(e, fmt.is_json()),
            };
            let conn = match db::open_db(&db_path) {
                Ok(c) => c,
                Err(e) => handle_error(e, fmt.is_json()),
            };

            run_command(cli.command, &conn, fmt)
        }
    };

    if let Err(e) = result {
        handle_error(e, fmt.is_json());
    }
}

fn run_command(
    command: Commands,
    conn: &rusqlite::Connection,
    fmt: Format,
) -> Result<(), error::CivitError> {
    match command {
        Commands::Init => unreachable!(),

        Commands::Login {
            email,
            first_name,
            last_name,
        } => commands::login::run(conn, &email, first_name.as_deref(), last_name.as_deref(), fmt),

        Commands::Report {
            title,
            description,
            category,
            area,
            ward,
            location_name,
        } => commands::report::run(
            conn,
            &title,
            description.as_deref(),
            &category,
            area.as_deref(),
            ward.as_deref(),
            location_name.as_deref(),
            fmt,
        ),

        Commands::Update { id, status } => commands::update::run(conn, id, &status, fmt),

        Commands::Heatmap {
            status,
            location,
            period,
            limit,
        } => commands::heatmap::run(conn, &status, &location, &period, limit, fmt),

        Commands::Issues {
            status,
            location,
            period,
            limit,
        } => commands::issues::run(conn, &status, &location, &period, limit, fmt),

        Commands::Locations => commands::locations::run(conn, fmt),

        Commands::Feedback { action } => match action {
            FeedbackAction::List => commands::feedback::run_list(conn, fmt),
            FeedbackAction::Submit {
                subject,
                message,
                kind,
                priority,
            } => commands::feedback::run_submit(conn, &subject, &message, &kind, &priority, fmt),
        },

        Commands::Summary => commands::summary::run(conn, fmt),
    }
}
