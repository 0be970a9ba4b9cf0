//! Text rendering.
//!
//! Stateless formatting onto any writer. The session decides what to show;
//! these functions only decide how it looks.

use crate::core::{Money, User, VendingMachine};
use crate::screens::{Screen, ScreenId, ScreenTree, BACK_INDEX};
use std::collections::BTreeMap;
use std::io::{self, Write};

pub const SYSTEM_PREFIX: &str = "[SYSTEM]";
pub const ERROR_PREFIX: &str = "[ERROR]";

/// How a catalog is listed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogStyle {
    /// Numbered for selection on a buy screen.
    Selectable,
    /// Read-only listing on an inventory screen.
    Listing,
}

/// Screen header, body, and balance when the screen shows one.
pub fn display_screen<W: Write>(out: &mut W, screen: &Screen, balance: Option<Money>) -> io::Result<()> {
    writeln!(out, "\n[{}]", screen.name().to_uppercase())?;
    writeln!(out, "{}", screen.content())?;
    if let Some(balance) = balance {
        writeln!(out, "Balance: {balance}")?;
    }
    Ok(())
}

/// Numbered routes. Index 0 points back, the rest point forward.
pub fn display_routes<W: Write>(
    out: &mut W,
    tree: &ScreenTree,
    routes: &BTreeMap<usize, ScreenId>,
) -> io::Result<()> {
    for (index, id) in routes {
        let arrow = if *index == BACK_INDEX { "<-" } else { "->" };
        writeln!(out, "\t[{index}]: {arrow} {}", tree[*id].name().to_uppercase())?;
    }
    Ok(())
}

pub fn display_inventory<W: Write>(
    out: &mut W,
    machine: &VendingMachine,
    style: CatalogStyle,
) -> io::Result<()> {
    if machine.is_empty() {
        return writeln!(out, "(empty)");
    }
    for (i, item) in machine.items().iter().enumerate() {
        let n = i + 1;
        match style {
            CatalogStyle::Selectable => writeln!(
                out,
                "[{n}] {}: {} x{}",
                item.display_name(),
                item.price,
                item.stock
            )?,
            CatalogStyle::Listing => writeln!(
                out,
                "Item {n}: {}, {}, x{}",
                item.display_name(),
                item.price,
                item.stock
            )?,
        }
    }
    Ok(())
}

/// What the user owns.
pub fn display_purchases<W: Write>(out: &mut W, user: &User) -> io::Result<()> {
    if user.purchased().is_empty() {
        return writeln!(out, "You have not bought anything yet.");
    }
    for (name, quantity) in user.purchased() {
        writeln!(out, "{}: x{quantity}", crate::core::title_case(name))?;
    }
    Ok(())
}

/// Choices of a confirmation prompt, numbered from 1.
pub fn display_choices<W: Write>(out: &mut W, choices: &[&str]) -> io::Result<()> {
    for (i, choice) in choices.iter().enumerate() {
        writeln!(out, "\t[{}]: {}", i + 1, choice.to_uppercase())?;
    }
    Ok(())
}

pub fn sys_output<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{SYSTEM_PREFIX}: {message}")
}

pub fn error_output<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{ERROR_PREFIX}: {message}")
}

/// Print a prompt and flush so it shows before input is read.
pub fn prompt<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    write!(out, "\n{text}\n> ")?;
    out.flush()
}
