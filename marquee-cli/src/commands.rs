//! CLI command implementations

use clap::Subcommand;
use marquee_core::widget::{DetailRegion, ListRegion, NO_MOVIES_TO_SORT, sort};
use marquee_core::{MarqueeConfig, MarqueeError, MovieId, SearchOutcome, SortKey};
use marquee_search::build_catalog;

use crate::interactive;
use crate::render;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search titles by term and print the candidate list
    Search {
        /// Free-text search term
        term: String,
        /// Ordering: Oldest_To_Newest, Newest_To_Oldest, A_To_Z or Z_To_A
        #[arg(short, long)]
        sort: Option<SortKey>,
    },
    /// Show the full record of one title
    Show {
        /// Catalog identifier, e.g. tt0372784
        id: String,
    },
    /// Drive the search widget line by line from stdin
    Interactive,
}

/// Handle the CLI command
///
/// # Errors
/// Returns the catalog or widget error of the command that fails
pub async fn handle_command(
    command: Commands,
    config: MarqueeConfig,
    demo: bool,
) -> anyhow::Result<()> {
    match command {
        Commands::Search { term, sort } => search(&config, demo, &term, sort).await,
        Commands::Show { id } => show(&config, demo, MovieId::new(id)).await,
        Commands::Interactive => interactive::run(config, demo).await,
    }
}

/// Search once and print the candidates
///
/// # Errors
/// - `MarqueeError::Catalog` - Catalog could not be reached or answered garbage
pub async fn search(
    config: &MarqueeConfig,
    demo: bool,
    term: &str,
    key: Option<SortKey>,
) -> anyhow::Result<()> {
    let catalog = build_catalog(&config.catalog, demo).map_err(MarqueeError::from)?;
    let term = term.trim();

    let mut list = ListRegion::default();
    match catalog.search(term).await.map_err(MarqueeError::from)? {
        SearchOutcome::Matches(candidates) => {
            let ordered = match &key {
                Some(key) => sort::sorted(&candidates, key),
                None => candidates,
            };
            list.show_candidates(&ordered);
        }
        SearchOutcome::NoMatches if key.is_some() => list.show_message(NO_MOVIES_TO_SORT),
        SearchOutcome::NoMatches => list.show_message(format!("No movies found for '{term}'")),
    }

    print!("{}", render::render_list(&list));
    Ok(())
}

/// Look up one title and print its detail card
///
/// # Errors
/// - `MarqueeError::Catalog` - Lookup failed or the title does not exist
pub async fn show(config: &MarqueeConfig, demo: bool, id: MovieId) -> anyhow::Result<()> {
    let catalog = build_catalog(&config.catalog, demo).map_err(MarqueeError::from)?;
    let detail = catalog.lookup(&id).await.map_err(MarqueeError::from)?;

    let mut region = DetailRegion::default();
    region.show_card(&detail);

    print!("{}", render::render_detail(&region));
    Ok(())
}
