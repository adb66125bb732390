//! Route loop hosting the product list and the create form.
//!
//! Entering `Route::List` always mounts a fresh `ProductListView`, so coming
//! back from the create form (or asking for a refresh) re-fetches the
//! collection instead of patching the old one.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chrono::Local;
use inventory_core::{DeleteOutcome, LoadState, ProductClient, ProductListView, Route, Transport};
use tracing::debug;

use crate::console::Console;
use crate::create;
use crate::render::product_table;

const HELP: &str = "commands: delete <id> | add | refresh | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Id exactly as typed; resolved against the loaded rows.
    Delete(String),
    Add,
    Refresh,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some("delete" | "d") => match words.next() {
                Some(id) => Command::Delete(id.to_string()),
                None => return Err("usage: delete <id>".to_string()),
            },
            Some("add" | "a") => Command::Add,
            Some("refresh" | "r") => Command::Refresh,
            Some("help" | "?") => Command::Help,
            Some("quit" | "q") => Command::Quit,
            Some(other) => return Err(format!("unknown command `{other}`; {HELP}")),
            None => return Err(HELP.to_string()),
        };
        if words.next().is_some() {
            return Err(format!("unexpected arguments; {HELP}"));
        }
        Ok(command)
    }
}

pub struct Shell<T, R, W> {
    client: ProductClient,
    transport: T,
    console: Console<R, W>,
}

impl<T, R, W> Shell<T, R, W>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    pub fn new(client: ProductClient, transport: T, console: Console<R, W>) -> Self {
        Self {
            client,
            transport,
            console,
        }
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self, start: Route) -> io::Result<()> {
        let mut route = Some(start);
        while let Some(current) = route {
            debug!(path = current.path(), "entering route");
            route = match current {
                Route::List => self.list_screen()?,
                Route::Create => create::run(&self.client, &mut self.transport, &mut self.console)?,
            };
        }
        Ok(())
    }

    pub fn into_parts(self) -> (T, Console<R, W>) {
        (self.transport, self.console)
    }

    fn list_screen(&mut self) -> io::Result<Option<Route>> {
        let mut view = ProductListView::new(self.client.clone());
        self.console.say("Loading products...")?;
        // A failed load is reflected in the view's state and notice.
        let _ = view.load_with(&mut self.transport);

        loop {
            self.show(&mut view)?;
            let Some(line) = self.console.read_line("> ")? else {
                return Ok(None);
            };

            match line.parse::<Command>() {
                Ok(Command::Delete(typed)) => {
                    let Some(id) = view.find_id(&typed) else {
                        self.console.say(format!("No deletable product {typed}."))?;
                        continue;
                    };
                    match view.delete_with(&id, &mut self.transport, &mut self.console) {
                        Ok(DeleteOutcome::Deleted) => self.console.say(format!("Deleted product {id}."))?,
                        Ok(DeleteOutcome::Declined) => {}
                        Ok(DeleteOutcome::Unavailable) => {
                            self.console.say(format!("No deletable product {id}."))?
                        }
                        // Reported through the view's notice on the next render.
                        Err(_) => {}
                    }
                }
                Ok(Command::Add) => return Ok(Some(Route::Create)),
                Ok(Command::Refresh) => return Ok(Some(Route::List)),
                Ok(Command::Help) => self.console.say(HELP)?,
                Ok(Command::Quit) => return Ok(None),
                Err(message) => self.console.say(message)?,
            }
        }
    }

    fn show(&mut self, view: &mut ProductListView) -> io::Result<()> {
        if let Some(notice) = view.take_notice() {
            self.console.say(format!("error: {notice}"))?;
        }
        match view.load_state() {
            LoadState::LoadFailed(_) => self
                .console
                .say("Product list unavailable. Type `refresh` to try again."),
            _ => self.console.say(product_table(&view.rows(&Local))),
        }
    }
}
