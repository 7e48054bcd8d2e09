//! # Console
//!
//! Text front-end for the till. It parses one line into a [`Command`], runs it
//! through any [`PointOfSale`] and renders what the user should see: the product
//! cards, the stats bar, or the message for a refused operation.
//!
//! After every mutation the console re-reads the till through
//! [`PointOfSale::snapshot`] and redraws, the same way a page would re-render.

mod render;

pub use render::{render_catalog, render_stats};

use crate::clients::PointOfSale;
use crate::engine::{RestockOutcome, SaleOutcome, TillError};
use crate::framework::ActorError;
use crate::money::Money;
use thiserror::Error;
use tracing::debug;

pub const HELP: &str = "\
Commands:
  list                  show every product and the stats bar
  add <name> <price>    add a product (name may contain spaces)
  delete <name>         remove a product
  sell <name>           sell one unit
  restock <name>        add one unit of stock
  stats                 show the stats bar
  reset-stats [yes]     zero units sold and revenue
  reset-cart            zero the cart total
  help                  show this text
  quit                  leave the shell";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// One console instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add { name: String, price: String },
    Delete { name: String },
    Sell { name: String },
    Restock { name: String },
    Stats,
    ResetStats { confirmed: bool },
    ResetCart,
    Help,
    Quit,
}

impl Command {
    /// Parses a shell line.
    ///
    /// For `add` the price is the last word and everything before it is the name.
    /// Names for `sell` and `restock` are passed through verbatim, so they must
    /// match the product exactly.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(ParseError::Empty),
            "list" | "ls" => Ok(Command::List),
            "add" => {
                let (name, price) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or(ParseError::Usage("add <name> <price>"))?;
                Ok(Command::Add {
                    name: name.trim().to_string(),
                    price: price.to_string(),
                })
            }
            "delete" | "rm" => Ok(Command::Delete {
                name: required(rest, "delete <name>")?,
            }),
            "sell" => Ok(Command::Sell {
                name: required(rest, "sell <name>")?,
            }),
            "restock" => Ok(Command::Restock {
                name: required(rest, "restock <name>")?,
            }),
            "stats" => Ok(Command::Stats),
            "reset-stats" => Ok(Command::ResetStats {
                confirmed: matches!(rest, "yes" | "y" | "--yes"),
            }),
            "reset-cart" => Ok(Command::ResetCart),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn required(rest: &str, usage: &'static str) -> Result<String, ParseError> {
    if rest.is_empty() {
        Err(ParseError::Usage(usage))
    } else {
        Ok(rest.to_string())
    }
}

/// Runs commands against a till and renders the result as text.
pub struct Console<P> {
    till: P,
}

impl<P: PointOfSale> Console<P> {
    pub fn new(till: P) -> Self {
        Self { till }
    }

    pub fn till(&self) -> &P {
        &self.till
    }

    /// Executes one command and returns the text to show.
    ///
    /// Errors from the till are returned as-is; the caller prints them and keeps going.
    /// `Quit` only produces a farewell; stopping is up to the caller.
    pub async fn execute(&self, command: Command) -> Result<String, ActorError> {
        debug!(?command, "Executing");
        match command {
            Command::List => self.redraw(None).await,
            Command::Stats => {
                let snapshot = self.till.snapshot().await?;
                Ok(render_stats(&snapshot.aggregates))
            }
            Command::Add { name, price } => {
                let price = Money::parse(&price).map_err(TillError::from)?;
                let record = self.till.create_product(&name, price).await?;
                self.redraw(Some(format!("Added \"{}\" at £{}", record.name, record.price)))
                    .await
            }
            Command::Delete { name } => {
                let record = self.till.delete_product(&name).await?;
                self.redraw(Some(format!("Product \"{}\" has been deleted.", record.name)))
                    .await
            }
            Command::Sell { name } => {
                let notice = match self.till.sell(&name).await? {
                    SaleOutcome::Sold(receipt) => format!(
                        "Sold one \"{}\" for £{}",
                        receipt.product.name, receipt.product.price
                    ),
                    SaleOutcome::Skipped => format!("No product named \"{}\"", name),
                };
                self.redraw(Some(notice)).await
            }
            Command::Restock { name } => {
                let notice = match self.till.restock(&name).await? {
                    RestockOutcome::Restocked { stock } => {
                        format!("Restocked \"{}\", {} in stock", name, stock)
                    }
                    RestockOutcome::Skipped => format!("No product named \"{}\"", name),
                };
                self.redraw(Some(notice)).await
            }
            Command::ResetStats { confirmed: false } => Ok(
                "Are you sure you want to clear all stats? Run `reset-stats yes` to confirm."
                    .to_string(),
            ),
            Command::ResetStats { confirmed: true } => {
                let aggregates = self.till.reset_stats().await?;
                Ok(render_stats(&aggregates))
            }
            Command::ResetCart => {
                let aggregates = self.till.reset_cart().await?;
                Ok(render_stats(&aggregates))
            }
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok("Bye.".to_string()),
        }
    }

    async fn redraw(&self, notice: Option<String>) -> Result<String, ActorError> {
        let snapshot = self.till.snapshot().await?;
        let mut out = String::new();
        if let Some(notice) = notice {
            out.push_str(&notice);
            out.push_str("\n\n");
        }
        out.push_str(&render_catalog(&snapshot.catalog));
        out.push('\n');
        out.push_str(&render_stats(&snapshot.aggregates));
        Ok(out)
    }
}
