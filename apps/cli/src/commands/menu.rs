//! # Interactive Menu
//!
//! The numbered loop an operator uses when no subcommand is given.
//!
//! ```text
//! ==================================================
//!             STOCKLEDGER INVENTORY
//! ==================================================
//! 1. Add product
//! 2. Remove product
//! 3. List products
//! 4. Dashboard
//! 5. Quit
//! ==================================================
//! Choose an option (1-5):
//! ```
//!
//! Operation errors (bad input, unknown id, a failed write) are printed
//! and the menu is shown again. Only terminal I/O errors end the loop
//! early. End of input behaves like option 5.

use std::io::{BufRead, Write};
use stockledger_core::report;
use stockledger_core::ProductId;
use tracing::debug;

use super::prompt;
use crate::error::{CliError, CliResult};
use crate::render;
use crate::state::{AppConfig, InventoryState};

const RULE_WIDTH: usize = 50;

/// One menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Add,
    Remove,
    List,
    Dashboard,
    Quit,
}

impl MenuOption {
    /// Parses the operator's answer; surrounding whitespace is ignored.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim() {
            "1" => Some(MenuOption::Add),
            "2" => Some(MenuOption::Remove),
            "3" => Some(MenuOption::List),
            "4" => Some(MenuOption::Dashboard),
            "5" => Some(MenuOption::Quit),
            _ => None,
        }
    }
}

/// Whether the loop keeps going after a step.
enum Flow {
    Continue,
    Quit,
}

/// Runs the menu until the operator quits or input ends.
pub async fn run<R: BufRead, W: Write>(
    state: &mut InventoryState,
    config: &AppConfig,
    input: &mut R,
    out: &mut W,
) -> CliResult<()> {
    writeln!(out, "Welcome to StockLedger.")?;

    loop {
        print_menu(out)?;

        let Some(answer) = prompt(input, out, "Choose an option (1-5): ")? else {
            writeln!(out)?;
            break;
        };

        let flow = match MenuOption::parse(&answer) {
            Some(MenuOption::Add) => add_product(state, input, out).await,
            Some(MenuOption::Remove) => remove_product(state, config, input, out).await,
            Some(MenuOption::List) => list_products(state, config, out).map(|_| Flow::Continue),
            Some(MenuOption::Dashboard) => {
                show_dashboard(state, config, out).map(|_| Flow::Continue)
            }
            Some(MenuOption::Quit) => Ok(Flow::Quit),
            None => {
                writeln!(out, "Invalid option. Enter 1, 2, 3, 4 or 5.")?;
                Ok(Flow::Continue)
            }
        };

        match flow {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => report_error(out, err)?,
        }
    }

    writeln!(out, "Goodbye.")?;
    Ok(())
}

fn print_menu<W: Write>(out: &mut W) -> CliResult<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "{:^width$}", "STOCKLEDGER INVENTORY", width = RULE_WIDTH)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "1. Add product")?;
    writeln!(out, "2. Remove product")?;
    writeln!(out, "3. List products")?;
    writeln!(out, "4. Dashboard")?;
    writeln!(out, "5. Quit")?;
    writeln!(out, "{}", rule)?;
    Ok(())
}

/// Prints a recoverable error; I/O errors are passed back up.
fn report_error<W: Write>(out: &mut W, err: CliError) -> CliResult<()> {
    if let CliError::Io(_) = err {
        return Err(err);
    }

    let report = err.report();
    debug!(code = ?report.code, "{}", report.message);
    writeln!(out, "Error: {}", report.message)?;
    Ok(())
}

async fn add_product<R: BufRead, W: Write>(
    state: &mut InventoryState,
    input: &mut R,
    out: &mut W,
) -> CliResult<Flow> {
    writeln!(out, "\n--- ADD PRODUCT ---")?;

    let mut answers = Vec::with_capacity(4);
    for label in ["Name: ", "Category: ", "Unit price: ", "Quantity: "] {
        match prompt(input, out, label)? {
            Some(answer) => answers.push(answer),
            None => return Ok(Flow::Quit),
        }
    }

    let product = state
        .create(&answers[0], &answers[1], &answers[2], &answers[3])
        .await?;
    writeln!(
        out,
        "Product '{}' added with id {}.",
        product.name, product.id
    )?;
    Ok(Flow::Continue)
}

async fn remove_product<R: BufRead, W: Write>(
    state: &mut InventoryState,
    config: &AppConfig,
    input: &mut R,
    out: &mut W,
) -> CliResult<Flow> {
    if state.products().is_empty() {
        writeln!(out, "No products registered.")?;
        return Ok(Flow::Continue);
    }

    writeln!(out, "\n--- REMOVE PRODUCT ---")?;
    writeln!(
        out,
        "{}",
        render::product_table(&report::row_view(state.products()), config)
    )?;

    let Some(answer) = prompt(input, out, "\nId of the product to remove: ")? else {
        return Ok(Flow::Quit);
    };

    let id = match answer.trim().parse::<i64>() {
        Ok(id) => ProductId::new(id),
        Err(_) => {
            writeln!(out, "Enter a valid number.")?;
            return Ok(Flow::Continue);
        }
    };

    let name = state.get(id)?.name.clone();
    if !super::confirm(input, out, &format!("Are you sure you want to remove '{}'?", name))? {
        writeln!(out, "Removal cancelled.")?;
        return Ok(Flow::Continue);
    }

    state.delete(id).await?;
    writeln!(out, "Product removed.")?;
    Ok(Flow::Continue)
}

fn list_products<W: Write>(
    state: &InventoryState,
    config: &AppConfig,
    out: &mut W,
) -> CliResult<()> {
    if state.products().is_empty() {
        writeln!(out, "No products registered.")?;
        return Ok(());
    }

    writeln!(out, "\n--- PRODUCT LIST ---")?;
    writeln!(
        out,
        "{}",
        render::product_table(&report::row_view(state.products()), config)
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        render::summary_block(&report::summary(state.products()), config)
    )?;
    Ok(())
}

fn show_dashboard<W: Write>(
    state: &InventoryState,
    config: &AppConfig,
    out: &mut W,
) -> CliResult<()> {
    let board = report::dashboard(state.products(), config.top_limit);
    writeln!(out, "\n--- DASHBOARD ---")?;
    writeln!(
        out,
        "{}",
        render::dashboard_block(&board, config.top_limit, config)
    )?;
    Ok(())
}
