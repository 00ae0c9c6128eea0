//! in-location - which works of a saved list are on the shelf at a branch

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use sfpl_api::availability::{DEFAULT_BRANCH, fetch_item_copies, shortlist};
use sfpl_api::networking::{DEFAULT_CREDENTIALS_FILE, resolve_login_info};
use sfpl_api::{SfplError, SfplSession};

#[derive(Parser)]
#[command(name = "in-location")]
#[command(
    version,
    about = "Checks what books in one of your lists are available in certain location"
)]
struct Cli {
    /// Library card number
    #[arg(short, long)]
    username: Option<String>,

    /// Card PIN
    #[arg(short, long)]
    pin: Option<String>,

    /// JSON file with credentials
    #[arg(short, long, default_value = DEFAULT_CREDENTIALS_FILE)]
    file: String,

    /// Library branch you want to check
    #[arg(short, long, default_value = DEFAULT_BRANCH)]
    branch: String,

    /// List id to check (see `sfpl lists`)
    #[arg(short, long)]
    list: u64,
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => {
            println!("DONE.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("DONE. {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SfplError> {
    let credentials = resolve_login_info(cli.username.as_deref(), cli.pin.as_deref(), &cli.file)?;
    let mut session = SfplSession::new()?;

    println!("1/4 - Login");
    let status = session.login(&credentials.user, &credentials.pin)?;
    if status != 302 {
        return Err(SfplError::LoginRefused(status));
    }

    let outcome = check_list(&session, cli);
    session.logout()?;
    outcome
}

/// Steps 2 to 4, run while logged in
fn check_list(session: &SfplSession, cli: &Cli) -> Result<(), SfplError> {
    println!("2/4 - Getting works in list");
    let items = session.get_list_contents_by_list_id(&cli.list.to_string())?;
    if items.is_empty() {
        return Err(SfplError::ValidationError(
            "No contents in that list id.".to_string(),
        ));
    }

    let msg = "3/4 - Getting copies for each work";
    print!("{msg}");
    let entries = fetch_item_copies(session, items, |done, total| {
        print!("\r{msg} ({done}/{total})");
        let _ = io::stdout().flush();
    })?;

    println!("\n4/4 - Filtering available copies in {}", cli.branch);
    let available = shortlist(entries, &cli.branch);

    println!("\n {} items in {}", available.len(), cli.branch);
    println!("=========================================================");
    for (pos, entry) in available.iter().enumerate() {
        println!("{} - {}", pos + 1, entry.item.title.trim());
        for copy in &entry.copies {
            println!("\t {} {} {}", copy.location, copy.status, copy.callno);
        }
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn branch_defaults_and_list_is_required() {
        let cli = Cli::try_parse_from(["in-location", "-l", "53282"]).unwrap();
        assert_eq!(cli.list, 53282);
        assert_eq!(cli.branch, DEFAULT_BRANCH);
        assert!(Cli::try_parse_from(["in-location"]).is_err());
    }
}
