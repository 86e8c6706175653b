//! Line-driven search box.
//!
//! Each input line is either a query to submit or a `:command`. The query
//! echo and the history panel are plain subscribers on the shared stores; the
//! box never prints search state itself.

use crate::panel::{render_history, render_query};
use anyhow::Result;
use parking_lot::Mutex;
use spidey_core::Error;
use spidey_state::{InputPolicy, SearchInput, SearchStores, Subscription};
use std::io::{BufRead, Write};
use std::sync::Arc;

const HELP: &str = "\
commands:
  <text>         submit a search
  :type <text>   edit the search box without submitting
  :history       show the history panel
  :clear         clear search history
  :help          show this help
  :quit          leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Submit(String),
    Type(String),
    History,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return ReplCommand::Submit(line.to_string());
    };

    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    match name {
        "type" | "t" => ReplCommand::Type(rest.to_string()),
        "history" | "h" => ReplCommand::History,
        "clear" => ReplCommand::Clear,
        "help" | "?" => ReplCommand::Help,
        "quit" | "q" => ReplCommand::Quit,
        other => ReplCommand::Unknown(other.to_string()),
    }
}

type SharedOut<W> = Arc<Mutex<W>>;

fn write_line<W: Write>(out: &SharedOut<W>, text: &str) {
    if let Err(err) = writeln!(out.lock(), "{text}") {
        tracing::warn!(error = %err, "failed to write output");
    }
}

/// Search box session bound to a set of stores.
pub struct Repl<W: Write + Send + 'static> {
    stores: SearchStores,
    input: SearchInput,
    out: SharedOut<W>,
    panel_size: usize,
    subscriptions: Vec<Subscription>,
}

impl<W: Write + Send + 'static> Repl<W> {
    /// Build the session and attach the query echo and history panel.
    pub fn new(stores: SearchStores, policy: InputPolicy, panel_size: usize, out: W) -> Self {
        let out = Arc::new(Mutex::new(out));

        let echo_out = Arc::clone(&out);
        let echo = stores
            .query
            .subscribe(move |query| write_line(&echo_out, &render_query(query)));

        let panel_out = Arc::clone(&out);
        let panel = stores.history.subscribe(move |entries| {
            write_line(&panel_out, &render_history(entries, panel_size))
        });

        Self {
            input: SearchInput::new(stores.clone(), policy),
            stores,
            out,
            panel_size,
            subscriptions: vec![echo, panel],
        }
    }

    /// Process lines until `:quit` or end of input.
    pub fn run(&mut self, reader: impl BufRead) -> Result<()> {
        for line in reader.lines() {
            if !self.handle(parse_line(&line?)) {
                break;
            }
        }
        self.detach();
        Ok(())
    }

    /// Apply one command. Returns `false` once the session should end.
    pub fn handle(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Submit(text) => match self.input.submit_text(text) {
                Ok(query) => tracing::info!(query = %query, "search submitted"),
                Err(Error::EmptyQuery) => self.say("nothing to search for"),
                Err(err) => self.say(&format!("error: {err}")),
            },
            ReplCommand::Type(text) => self.input.type_text(text),
            ReplCommand::History => {
                let rendered = render_history(&self.stores.history.get(), self.panel_size);
                self.say(&rendered);
            }
            ReplCommand::Clear => self.input.clear_history(),
            ReplCommand::Help => self.say(HELP),
            ReplCommand::Quit => return false,
            ReplCommand::Unknown(name) => {
                self.say(&format!("unknown command :{name} (try :help)"));
            }
        }
        true
    }

    /// Remove this session's subscribers from the stores.
    pub fn detach(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }

    #[cfg(test)]
    fn output(&self) -> SharedOut<W> {
        Arc::clone(&self.out)
    }

    fn say(&self, text: &str) {
        write_line(&self.out, text);
    }
}

impl<W: Write + Send + 'static> Drop for Repl<W> {
    fn drop(&mut self) {
        self.detach();
    }
}
