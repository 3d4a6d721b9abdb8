//! Interactive `browse` command.
//!
//! Reads one command per line from stdin and drives a [`BrowseSession`].
//! Navigation commands start a fresh load cycle; filter commands only touch
//! the catalog already on screen.

use promocat_core::Route;
use promocat_gateway::{BrowseSession, CatalogSource, GatewayClient, LoadError, ViewState};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::catalog::{not_found_message, print_catalog, print_detail};

const HELP: &str = "\
commands:
  search [TEXT]          filter by name/description (blank clears)
  category [NAME]        filter by category (blank clears)
  availability MODE      available | soldOut | any
  clear                  back to the default view
  more                   show another page
  open SKU               open a product
  go PATH                navigate to a path, e.g. /promocionales/product/SKU
  back                   return to the catalog
  quit";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BrowseCommand {
    Search(String),
    Category(Option<String>),
    Availability(String),
    Clear,
    More,
    Navigate(Route),
    Help,
    Quit,
}

/// Parses one input line. Command words are case-insensitive; arguments are
/// kept verbatim apart from surrounding whitespace.
pub(crate) fn parse_command(line: &str) -> anyhow::Result<BrowseCommand> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let command = match word.to_lowercase().as_str() {
        "search" | "s" => BrowseCommand::Search(rest.to_string()),
        "category" | "c" => {
            BrowseCommand::Category((!rest.is_empty()).then(|| rest.to_string()))
        }
        "availability" | "a" => {
            if rest.is_empty() {
                anyhow::bail!("usage: availability available|soldOut|any");
            }
            BrowseCommand::Availability(rest.to_string())
        }
        "clear" => BrowseCommand::Clear,
        "more" | "m" => BrowseCommand::More,
        "open" | "o" => {
            if rest.is_empty() {
                anyhow::bail!("usage: open SKU");
            }
            BrowseCommand::Navigate(Route::Product(rest.to_string()))
        }
        "go" => BrowseCommand::Navigate(Route::resolve(rest)),
        "back" | "b" => BrowseCommand::Navigate(Route::Catalog),
        "help" | "?" => BrowseCommand::Help,
        "quit" | "q" | "exit" => BrowseCommand::Quit,
        other => anyhow::bail!("unknown command '{other}'; type `help`"),
    };
    Ok(command)
}

/// Run the interactive loop until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only if stdin cannot be read. Load failures are shown
/// and the loop continues.
pub(crate) async fn run_browse(client: GatewayClient, page_size: usize) -> anyhow::Result<()> {
    let session = BrowseSession::new(client, page_size);
    navigate(&session, &Route::Catalog).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => println!("{HELP}"),
            BrowseCommand::Navigate(route) => navigate(&session, &route).await,
            other => apply_filter(&session, other).await,
        }
    }

    Ok(())
}

async fn navigate<S: CatalogSource>(session: &BrowseSession<S>, route: &Route) {
    println!("loading {route} ...");
    match session.navigate(route).await {
        Ok(()) | Err(LoadError::Gateway(_)) => render(&session.state().await),
        Err(LoadError::Superseded) => {}
    }
}

async fn apply_filter<S: CatalogSource>(session: &BrowseSession<S>, command: BrowseCommand) {
    let showing_catalog = match command {
        BrowseCommand::Search(term) => session.search(&term).await,
        BrowseCommand::Category(category) => session.filter_by_category(category.as_deref()).await,
        BrowseCommand::Availability(mode) => session.filter_by_availability(&mode).await,
        BrowseCommand::Clear => session.clear_filters().await,
        BrowseCommand::More => session.load_more().await.is_some(),
        BrowseCommand::Navigate(_) | BrowseCommand::Help | BrowseCommand::Quit => return,
    };

    if showing_catalog {
        render(&session.state().await);
    } else {
        println!("filters apply to the catalog; type `back` first");
    }
}

fn render(state: &ViewState) {
    match state {
        ViewState::Idle => {}
        ViewState::Catalog(view) => print_catalog(view),
        ViewState::Detail(page) => print_detail(page),
        ViewState::NotFound { id } => {
            println!("{}; type `back` for the catalog", not_found_message(id));
        }
        ViewState::Failed { message } => println!("load failed: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_commands() {
        assert_eq!(
            parse_command("search  taza roja ").unwrap(),
            BrowseCommand::Search("taza roja".to_string())
        );
        assert_eq!(parse_command("search").unwrap(), BrowseCommand::Search(String::new()));
        assert_eq!(
            parse_command("CATEGORY Bolsas y Mochilas").unwrap(),
            BrowseCommand::Category(Some("Bolsas y Mochilas".to_string()))
        );
        assert_eq!(parse_command("category").unwrap(), BrowseCommand::Category(None));
        assert_eq!(
            parse_command("availability soldOut").unwrap(),
            BrowseCommand::Availability("soldOut".to_string())
        );
        assert_eq!(parse_command("more").unwrap(), BrowseCommand::More);
        assert_eq!(parse_command("clear").unwrap(), BrowseCommand::Clear);
    }

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(
            parse_command("open T-100").unwrap(),
            BrowseCommand::Navigate(Route::Product("T-100".to_string()))
        );
        assert_eq!(
            parse_command("go /promocionales/product/T-100").unwrap(),
            BrowseCommand::Navigate(Route::Product("T-100".to_string()))
        );
        assert_eq!(
            parse_command("go /somewhere").unwrap(),
            BrowseCommand::Navigate(Route::Catalog)
        );
        assert_eq!(parse_command("back").unwrap(), BrowseCommand::Navigate(Route::Catalog));
        assert_eq!(parse_command("q").unwrap(), BrowseCommand::Quit);
    }

    #[test]
    fn rejects_unknown_or_incomplete_commands() {
        assert!(parse_command("dance").is_err());
        assert!(parse_command("open").is_err());
        assert!(parse_command("availability").is_err());
    }
}
