//! Interactive session: one widget event per stdin line.

use std::io::Write;
use std::str::FromStr;

use anyhow::Context;
use marquee_core::{
    ClickTarget, MarqueeConfig, MarqueeError, MovieId, SortKey, WidgetError, WidgetHandle,
    WidgetView, spawn_widget,
};
use marquee_search::build_catalog;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

const HELP: &str = "\
commands:
  type <text>       replace the search box text
  focus             focus the search box
  click <target>    input | list | filter-option | filter-class | outside
  select <n|id>     choose a listed movie by position or id
  sort <key>        Oldest_To_Newest | Newest_To_Oldest | A_To_Z | Z_To_A
  reset             clear everything
  view              print the current view
  help              show this help
  quit              leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Type(String),
    Focus,
    Click(ClickTarget),
    Select(Selection),
    Sort(SortKey),
    Reset,
    View,
    Help,
    Quit,
}

/// How a line refers to a listed movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// One-based position in the rendered list
    Position(usize),
    Id(MovieId),
}

impl FromStr for Line {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_end_matches(['\r', '\n']);
        let (verb, rest) = s.split_once(' ').unwrap_or((s, ""));

        match verb {
            "type" => Ok(Line::Type(rest.to_string())),
            "focus" => Ok(Line::Focus),
            "click" => parse_target(rest.trim()).map(Line::Click),
            "select" => parse_selection(rest.trim()).map(Line::Select),
            "sort" => Ok(Line::Sort(
                rest.trim().parse().unwrap_or_else(|never| match never {}),
            )),
            "reset" => Ok(Line::Reset),
            "view" => Ok(Line::View),
            "help" | "?" => Ok(Line::Help),
            "quit" | "exit" => Ok(Line::Quit),
            other => Err(format!("unknown command '{other}', try 'help'")),
        }
    }
}

fn parse_target(raw: &str) -> Result<ClickTarget, String> {
    match raw {
        "input" => Ok(ClickTarget::SearchInput),
        "list" => Ok(ClickTarget::CandidateList),
        "filter-option" => Ok(ClickTarget::FilterOption),
        "filter-class" => Ok(ClickTarget::FilterClass),
        "outside" => Ok(ClickTarget::Outside),
        other => Err(format!("unknown click target '{other}'")),
    }
}

fn parse_selection(raw: &str) -> Result<Selection, String> {
    if raw.is_empty() {
        return Err("select needs a position or an id".to_string());
    }

    match raw.parse::<usize>() {
        Ok(0) => Err("positions start at 1".to_string()),
        Ok(position) => Ok(Selection::Position(position)),
        Err(_) => Ok(Selection::Id(MovieId::new(raw))),
    }
}

fn resolve(selection: Selection, view: &WidgetView) -> Option<MovieId> {
    match selection {
        Selection::Id(id) => Some(id),
        Selection::Position(position) => view
            .list
            .entries()
            .get(position - 1)
            .map(|entry| entry.id.clone()),
    }
}

fn print_view(view: &WidgetView) {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{}", render::render_view(view));
    let _ = stdout.flush();
}

/// Runs the interactive session until `quit` or end of input.
///
/// # Errors
/// - `MarqueeError::Catalog` - Catalog could not be configured
/// - `MarqueeError::Widget` - Widget stopped unexpectedly
/// - I/O errors reading stdin
pub async fn run(config: MarqueeConfig, demo: bool) -> anyhow::Result<()> {
    let catalog = build_catalog(&config.catalog, demo).map_err(MarqueeError::from)?;
    let handle = spawn_widget(catalog, &config.widget, Some(Box::new(print_view)));

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(raw) = lines.next_line().await.context("reading stdin")? {
        if raw.trim().is_empty() {
            continue;
        }

        let line = match raw.parse::<Line>() {
            Ok(line) => line,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        if line == Line::Quit {
            break;
        }

        apply(&handle, line).await?;
    }

    handle.shutdown().await.map_err(MarqueeError::from)?;
    Ok(())
}

async fn apply(handle: &WidgetHandle, line: Line) -> anyhow::Result<()> {
    let result = match line {
        Line::Type(text) => handle.input(text).await,
        Line::Focus => handle.focus().await,
        Line::Click(target) => handle.click(target).await,
        Line::Sort(key) => handle.sort(key).await,
        Line::Reset => handle.reset().await,
        Line::View => handle.view().await.map(|view| print_view(&view)),
        Line::Help => {
            println!("{HELP}");
            Ok(())
        }
        Line::Quit => Ok(()),
        Line::Select(selection) => {
            let view = handle.view().await.map_err(MarqueeError::from)?;
            match resolve(selection, &view) {
                Some(id) => handle.select(id).await,
                None => {
                    eprintln!("no movie at that position");
                    Ok(())
                }
            }
        }
    };

    match result {
        Err(err @ WidgetError::UnknownCandidate { .. }) => {
            eprintln!("{}", MarqueeError::from(err).user_message());
            Ok(())
        }
        other => Ok(other.map_err(MarqueeError::from)?),
    }
}
