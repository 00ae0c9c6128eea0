//! sfpl - patron catalog from the terminal

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use sfpl_api::networking::{DEFAULT_CREDENTIALS_FILE, resolve_login_info};
use sfpl_api::{SfplError, SfplSession};

#[derive(Parser)]
#[command(name = "sfpl")]
#[command(version, about = "San Francisco Public Library patron catalog", long_about = None)]
#[command(after_help = "EXAMPLES:
    sfpl holds                  List your holds
    sfpl list 53282             Show the contents of list 53282
    sfpl --json search dune     Search the catalog, print JSON")]
struct Cli {
    /// Library card number
    #[arg(short, long)]
    username: Option<String>,

    /// Card PIN
    #[arg(short, long)]
    pin: Option<String>,

    /// JSON file with credentials, used unless both username and pin are given
    #[arg(short, long, default_value = DEFAULT_CREDENTIALS_FILE)]
    file: String,

    /// Print records as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    #[command(flatten)]
    Patron(PatronCommand),
    /// Search the catalog
    Search {
        #[arg(value_name = "QUERY")]
        query: String,
    },
    /// Opening hours of every branch
    Hours,
}

/// Subcommands that need a logged in session
#[derive(Subcommand, Debug, PartialEq)]
enum PatronCommand {
    /// Items checked out
    Checkouts,
    /// Holds placed
    Holds,
    /// Saved lists
    Lists,
    /// Contents of one saved list
    List {
        #[arg(value_name = "LIST_ID")]
        list_id: u64,
    },
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SfplError> {
    let mut session = SfplSession::new()?;

    match &cli.command {
        Command::Search { query } => {
            let results = session.search(query)?;
            print_records(cli.json, &results, |r| format!("{} [{}] {}", r.title, r.media_type, r.callno))
        }
        Command::Hours => {
            let branches = session.list_all_hours()?;
            if cli.json {
                return print_json(&branches);
            }
            for branch in &branches {
                println!("{}", branch.branch_name);
                for day in &branch.days {
                    println!("    {}{}", day.day_of_week, day.hours);
                }
            }
            Ok(())
        }
        Command::Patron(command) => {
            let credentials =
                resolve_login_info(cli.username.as_deref(), cli.pin.as_deref(), &cli.file)?;
            info!("Login");
            let status = session.login(&credentials.user, &credentials.pin)?;
            if status != 302 {
                return Err(SfplError::LoginRefused(status));
            }

            let outcome = run_patron_command(&session, command, cli.json);
            info!("Logout");
            session.logout()?;
            outcome
        }
    }
}

fn run_patron_command(
    session: &SfplSession,
    command: &PatronCommand,
    json: bool,
) -> Result<(), SfplError> {
    match command {
        PatronCommand::Checkouts => {
            print_records(json, &session.list_checkouts()?, |c| format!("{} {}", c.title, c.status))
        }
        PatronCommand::Holds => {
            print_records(json, &session.list_holds()?, |h| format!("{} {}", h.title, h.status))
        }
        PatronCommand::Lists => print_records(json, &session.list_user_lists()?, |l| {
            format!("{} (id: {})", l.list_name, l.list_id().unwrap_or("?"))
        }),
        PatronCommand::List { list_id } => {
            let items = session.get_list_contents_by_list_id(&list_id.to_string())?;
            print_records(json, &items, |i| i.title.trim().to_string())
        }
    }
}

fn print_records<T: Serialize>(
    json: bool,
    records: &[T],
    line: impl Fn(&T) -> String,
) -> Result<(), SfplError> {
    if json {
        return print_json(records);
    }
    for (i, record) in records.iter().enumerate() {
        println!("    {} - {}", i + 1, line(record));
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), SfplError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
