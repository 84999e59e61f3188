use crate::cli::Cli;
use crate::domain::models::{FailureReport, Settings};
use crate::services::classifier::{ErrorClassifier, MessagePatternClassifier};
use crate::services::client::{
    decode_search_response, suggestion_term, HttpSearchClient, SearchService,
};
use crate::services::controller::{Phase, QueryController, SearchOutcome};
use crate::services::output::{print_failure, print_one, print_out};
use crate::services::presenter::{error_text, path_view_text, present};
use std::path::Path;
use std::process::ExitCode;

pub fn handle_connect(
    cli: &Cli,
    settings: &Settings,
    player1: &str,
    player2: &str,
    path: Option<u64>,
) -> anyhow::Result<ExitCode> {
    let mut controller = QueryController::new();
    if let Ok(pending) = controller.submit(player1, player2) {
        let client = HttpSearchClient::new(&settings.service)?;
        let outcome = SearchOutcome::from_client(client.find_connection(&pending.query));
        controller.complete(pending.token, outcome);
    }
    switch_to(&mut controller, path)?;
    emit_phase(cli.json, controller.phase())
}

pub fn handle_render(
    cli: &Cli,
    input: &Path,
    player1: &str,
    player2: &str,
    path: Option<u64>,
) -> anyhow::Result<ExitCode> {
    let body = std::fs::read_to_string(input)?;
    let mut controller = QueryController::new();
    if let Ok(pending) = controller.submit(player1, player2) {
        let outcome = SearchOutcome::from_client(decode_search_response(&body));
        controller.complete(pending.token, outcome);
    }
    switch_to(&mut controller, path)?;
    emit_phase(cli.json, controller.phase())
}

pub fn handle_suggest(cli: &Cli, settings: &Settings, term: &str) -> anyhow::Result<ExitCode> {
    let suggestions = match suggestion_term(term, settings.suggest.min_chars) {
        Some(term) => HttpSearchClient::new(&settings.service)?.suggest(term)?,
        None => Vec::new(),
    };
    print_out(cli.json, &suggestions, |s| s.clone())?;
    Ok(ExitCode::SUCCESS)
}

pub fn handle_classify(cli: &Cli, message: &str) -> anyhow::Result<ExitCode> {
    let classified = MessagePatternClassifier.classify(&FailureReport {
        message: message.to_string(),
    });
    print_one(cli.json, classified, error_text)?;
    Ok(ExitCode::SUCCESS)
}

fn switch_to<C: ErrorClassifier>(
    controller: &mut QueryController<C>,
    path: Option<u64>,
) -> anyhow::Result<()> {
    let Some(n) = path else {
        return Ok(());
    };
    if matches!(controller.phase(), Phase::Results { .. }) {
        controller.select_path(path_index(n)?)?;
    }
    Ok(())
}

/// 1-based `--path` number to a selector index.
fn path_index(n: u64) -> anyhow::Result<usize> {
    let index = n
        .checked_sub(1)
        .ok_or_else(|| anyhow::anyhow!("path numbers start at 1"))?;
    Ok(usize::try_from(index)?)
}

/// Prints the settled phase; error phases exit non-zero.
pub fn emit_phase(json: bool, phase: &Phase) -> anyhow::Result<ExitCode> {
    match phase {
        Phase::Results { query, selector } => {
            print_one(json, present(query, selector), path_view_text)?;
            Ok(ExitCode::SUCCESS)
        }
        Phase::Error { query, error } => {
            if let Some(query) = query {
                log::debug!(
                    "search for {:?} and {:?} ended as {:?}",
                    query.subject1,
                    query.subject2,
                    error.kind
                );
            }
            print_failure(json, error, |e| error_text(e))?;
            Ok(ExitCode::FAILURE)
        }
        Phase::Idle | Phase::Loading { .. } => {
            anyhow::bail!("query did not settle")
        }
    }
}
