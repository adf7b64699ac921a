//! Interactive console over the query engine.
//!
//! Reads commands line by line from stdin and prints every list/details state
//! change as it lands. Commands mutate the engine; all rendering is driven by
//! the watch channels, so output stays correct even when responses arrive out
//! of order or while a command is being typed.

use crate::application::engine::ConsoleEngine;
use crate::application::slot::SlotState;
use crate::domain::query::{InvalidQueryValue, SortOrder, StatusFilter};
use crate::domain::transaction::{TransactionDetails, TransactionStatus, TransactionSummary};
use crate::error::Result;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Rows printed per list update before eliding the rest.
const MAX_PRINTED_ROWS: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("unknown command {0:?}; type `help` for the list")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    InvalidValue(#[from] InvalidQueryValue),
}

/// One parsed console command. Invalid input never produces a command, so the
/// engine only ever sees well-formed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Status(StatusFilter),
    Search(String),
    Sort(SortOrder),
    Open(String),
    Back,
    Retry,
    RetryDetails,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "status" => {
                if rest.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "status",
                        expected: "one of: all, pending, success, failed",
                    });
                }
                Ok(ConsoleCommand::Status(rest.parse()?))
            }
            // A bare `search` clears the search text.
            "search" => Ok(ConsoleCommand::Search(rest.to_string())),
            "sort" => {
                if rest.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "sort",
                        expected: "one of: newest, oldest",
                    });
                }
                Ok(ConsoleCommand::Sort(rest.parse()?))
            }
            "open" => {
                if rest.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "open",
                        expected: "a transaction id, e.g. `open txn_0001`",
                    });
                }
                Ok(ConsoleCommand::Open(rest.to_string()))
            }
            "back" => Ok(ConsoleCommand::Back),
            "retry" => Ok(ConsoleCommand::Retry),
            "retry-details" => Ok(ConsoleCommand::RetryDetails),
            "help" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(CommandParseError::UnknownCommand(other.to_string())),
        }
    }
}

/// Runs the console until `quit` or EOF on stdin.
pub async fn run(engine: ConsoleEngine) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut list_rx = engine.watch_list();
    let mut details_rx = engine.watch_details();

    println!("payment transactions console");
    print_help();
    engine.retry_list();

    loop {
        tokio::select! {
            changed = list_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = list_rx.borrow_and_update().clone();
                print_list(&state, engine.failed_count());
            }
            changed = details_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = details_rx.borrow_and_update().clone();
                print_details(&state);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<ConsoleCommand>() {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(command) => apply(&engine, command),
                    Err(err) => println!("{err}"),
                }
            }
        }
    }

    Ok(())
}

fn apply(engine: &ConsoleEngine, command: ConsoleCommand) {
    match command {
        ConsoleCommand::Status(status) => {
            println!("status filter: {}", status.label());
            engine.set_status_filter(status);
        }
        ConsoleCommand::Search(text) => engine.set_search_text(&text),
        ConsoleCommand::Sort(sort) => {
            println!("sort order: {}", sort.label());
            engine.set_sort_order(sort);
        }
        ConsoleCommand::Open(id) => engine.select_transaction(&id),
        ConsoleCommand::Back => engine.clear_selection(),
        ConsoleCommand::Retry => engine.retry_list(),
        ConsoleCommand::RetryDetails => engine.retry_details(),
        ConsoleCommand::Help => print_help(),
        ConsoleCommand::Quit => {}
    }
}

fn print_help() {
    println!("commands:");
    println!("  status <all|pending|success|failed>  filter the list by status");
    println!("  search <text>                        match id, reference, email or trace id");
    println!("  sort <newest|oldest>                 change the ordering");
    println!("  open <id>                            load details for one transaction");
    println!("  back                                 close the detail view");
    println!("  retry                                reload the list");
    println!("  retry-details                        reload the selected details");
    println!("  help                                 show this message");
    println!("  quit                                 exit");
}

fn status_name(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Pending => "pending",
        TransactionStatus::Success => "success",
        TransactionStatus::Failed => "failed",
    }
}

fn print_list(state: &SlotState<Vec<TransactionSummary>>, failed_count: usize) {
    if state.loading {
        println!("loading transactions...");
        return;
    }
    if let Some(error) = &state.error {
        println!("list error: {error} (type `retry` to reload)");
        return;
    }

    println!("{} transactions, {} failed", state.data.len(), failed_count);
    for row in state.data.iter().take(MAX_PRINTED_ROWS) {
        println!(
            "  {}  {}  {:>9} {}  {:<7}  {}  {}",
            row.id,
            row.reference,
            row.amount,
            row.currency,
            status_name(row.status),
            row.created_at.format("%Y-%m-%d %H:%M"),
            row.customer_email,
        );
    }
    if state.data.len() > MAX_PRINTED_ROWS {
        println!("  ... {} more (refine the query to narrow down)", state.data.len() - MAX_PRINTED_ROWS);
    }
}

fn print_details(state: &SlotState<Option<TransactionDetails>>) {
    if state.loading {
        println!("loading details...");
        return;
    }
    if let Some(error) = &state.error {
        println!("details error: {error} (type `retry-details` to try again)");
        return;
    }

    // An empty slot after `back` stays silent.
    let Some(details) = &state.data else {
        return;
    };

    let summary = &details.summary;
    println!("{} ({})", summary.id, summary.reference);
    println!("  amount:     {} {}", summary.amount, summary.currency);
    println!("  status:     {}", status_name(summary.status));
    println!("  created:    {}", summary.created_at.to_rfc3339());
    println!("  customer:   {}", summary.customer_email);
    println!("  trace id:   {}", details.gateway_trace_id);
    println!("  method:     {:?}", details.payment_method);
    if let Some(code) = &details.failure_code {
        println!("  failure:    {code}");
    }
    if let Some(reason) = &details.failure_reason {
        println!("  reason:     {reason}");
    }
    if let Ok(payload) = serde_json::to_string(&details.raw_payload) {
        println!("  payload:    {payload}");
    }
}
