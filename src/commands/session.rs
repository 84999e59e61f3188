//! Line-driven interactive session.
//!
//! Single event loop: stdin lines and finished network calls arrive on one
//! channel and are handled one at a time. Searches run on worker threads and
//! report back with their request token; the controller drops stale ones.

use crate::domain::models::Settings;
use crate::services::client::{suggestion_term, ClientError, HttpSearchClient, SearchService};
use crate::services::controller::{
    Delivery, Phase, QueryController, RequestToken, SearchOutcome,
};
use crate::services::output::{print_failure, print_one, print_out};
use crate::services::presenter::{error_text, path_view_text, present};
use std::collections::VecDeque;
use std::io::BufRead;
use std::process::ExitCode;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;

const HELP: &str = "\
commands:
  find <player1> | <player2>   search for a connection
  path <n>                     show path n of the current results
  suggest <term>               look up player names
  show                         print the current state
  quit                         leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionCommand {
    Find(String, String),
    Path(usize),
    Suggest(String),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match verb {
        "find" => {
            let (a, b) = rest
                .split_once('|')
                .ok_or_else(|| "usage: find <player1> | <player2>".to_string())?;
            Ok(SessionCommand::Find(a.to_string(), b.to_string()))
        }
        "path" => match rest.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(SessionCommand::Path(n - 1)),
            _ => Err("usage: path <n> (1-based)".to_string()),
        },
        "suggest" => Ok(SessionCommand::Suggest(rest.to_string())),
        "show" => Ok(SessionCommand::Show),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        other => Err(format!("unknown command `{other}` (try `help`)")),
    }
}

enum Event {
    Line(String),
    InputClosed,
    Searched {
        token: RequestToken,
        outcome: SearchOutcome,
    },
    Suggested {
        term: String,
        result: Result<Vec<String>, ClientError>,
    },
}

pub fn run_session(json: bool, settings: &Settings) -> anyhow::Result<ExitCode> {
    let service: Arc<dyn SearchService> = Arc::new(HttpSearchClient::new(&settings.service)?);
    let (tx, rx) = mpsc::channel();
    spawn_input_reader(tx.clone());

    let mut session = Session {
        json,
        min_chars: settings.suggest.min_chars,
        service,
        tx,
        controller: QueryController::new(),
        deferred: VecDeque::new(),
        suggestions_in_flight: 0,
    };
    let mut input_open = true;

    while let Ok(event) = rx.recv() {
        match event {
            Event::Line(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(SessionCommand::Quit) => break,
                    Ok(command) => session.handle(command)?,
                    Err(usage) => eprintln!("{usage}"),
                }
            }
            Event::InputClosed => input_open = false,
            Event::Searched { token, outcome } => {
                if session.controller.complete(token, outcome) == Delivery::Applied {
                    session.show()?;
                    session.drain_deferred()?;
                }
            }
            Event::Suggested { term, result } => {
                session.suggestions_in_flight -= 1;
                match result {
                    Ok(names) => print_out(json, &names, |s| s.clone())?,
                    Err(err) => {
                        log::warn!("suggestion lookup for {term:?} failed: {err}");
                        eprintln!("suggestions unavailable for {term:?}");
                    }
                }
            }
        }
        let idle = !session.controller.is_loading() && session.suggestions_in_flight == 0;
        if !input_open && idle {
            break;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn spawn_input_reader(tx: Sender<Event>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Event::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}

struct Session {
    json: bool,
    min_chars: usize,
    service: Arc<dyn SearchService>,
    tx: Sender<Event>,
    controller: QueryController,
    /// Path switches typed while a search is still loading.
    deferred: VecDeque<usize>,
    suggestions_in_flight: usize,
}

impl Session {
    fn handle(&mut self, command: SessionCommand) -> anyhow::Result<()> {
        match command {
            SessionCommand::Find(a, b) => {
                self.deferred.clear();
                match self.controller.submit(&a, &b) {
                    Ok(pending) => {
                        self.show()?;
                        let service = Arc::clone(&self.service);
                        let tx = self.tx.clone();
                        std::thread::spawn(move || {
                            let outcome =
                                SearchOutcome::from_client(service.find_connection(&pending.query));
                            let _ = tx.send(Event::Searched {
                                token: pending.token,
                                outcome,
                            });
                        });
                    }
                    Err(_) => self.show()?,
                }
            }
            SessionCommand::Path(index) => {
                if self.controller.is_loading() {
                    self.deferred.push_back(index);
                } else {
                    self.switch(index)?;
                }
            }
            SessionCommand::Suggest(raw) => match suggestion_term(&raw, self.min_chars) {
                Some(term) => {
                    let term = term.to_string();
                    let service = Arc::clone(&self.service);
                    let tx = self.tx.clone();
                    self.suggestions_in_flight += 1;
                    std::thread::spawn(move || {
                        let result = service.suggest(&term);
                        let _ = tx.send(Event::Suggested { term, result });
                    });
                }
                None => print_out::<String>(self.json, &[], |s| s.clone())?,
            },
            SessionCommand::Show => self.show()?,
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => {}
        }
        Ok(())
    }

    fn switch(&mut self, index: usize) -> anyhow::Result<()> {
        match self.controller.select_path(index) {
            Ok(()) => self.show(),
            Err(err) => {
                eprintln!("{err}");
                Ok(())
            }
        }
    }

    fn drain_deferred(&mut self) -> anyhow::Result<()> {
        while let Some(index) = self.deferred.pop_front() {
            self.switch(index)?;
        }
        Ok(())
    }

    fn show(&self) -> anyhow::Result<()> {
        match self.controller.phase() {
            Phase::Idle => println!("no search yet (try `help`)"),
            Phase::Loading { query, .. } => print_one(self.json, query, |q| {
                format!("searching: {} and {} ...", q.subject1, q.subject2)
            })?,
            Phase::Results { query, selector } => {
                print_one(self.json, present(query, selector), path_view_text)?
            }
            Phase::Error { error, .. } => print_failure(self.json, error, |e| error_text(e))?,
        }
        Ok(())
    }
}
