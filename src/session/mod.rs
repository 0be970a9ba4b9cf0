//! The interactive shell around the pure core.
//!
//! A [`Session`] owns the screen layout, the navigator, the machines and the
//! user, plus the reader and writer it talks through. Each turn reads one
//! line, dispatches it on the kind of the focused screen, and renders the
//! result. The only blocking point is the read.

mod prompt;

use crate::config::Config;
use crate::core::{attempt_purchase, MachineId, User, VendingMachine};
use crate::error::{Error, VendingError};
use crate::screens::{layout, Layout, Navigator, Screen, ScreenKind, ScreenTree};
use crate::view::{self, CatalogStyle};
use std::io::{BufRead, Write};

const AWAITING_INPUT: &str = "Awaiting Input:";

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The user confirmed the exit screen.
    Exited,
    /// Input ran out before the user left.
    InputClosed,
}

/// What the loop should do after a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
    Closed,
}

pub struct Session<R, W> {
    layout: Layout,
    navigator: Navigator,
    machines: Vec<VendingMachine>,
    user: User,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Build the standard layout for `config` and focus the home screen.
    pub fn new(config: Config, input: R, output: W) -> Result<Self, Error> {
        let layout = layout::standard(&config.machines)?;
        let navigator = Navigator::new(&layout.tree, layout.home);
        Ok(Self {
            layout,
            navigator,
            machines: config.machines,
            user: User::new(config.balance),
            input,
            output,
        })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn machines(&self) -> &[VendingMachine] {
        &self.machines
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn tree(&self) -> &ScreenTree {
        &self.layout.tree
    }

    pub fn current_screen(&self) -> &Screen {
        &self.layout.tree[self.navigator.focus()]
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<Outcome, Error> {
        log::info!("session started with balance {}", self.user.balance);
        self.render()?;

        loop {
            let flow = match self.read_line(AWAITING_INPUT)? {
                Some(line) => self.dispatch(&line)?,
                None => Flow::Closed,
            };
            match flow {
                Flow::Continue => {}
                Flow::Exit => {
                    self.log_summary("exited");
                    return Ok(Outcome::Exited);
                }
                Flow::Closed => {
                    self.log_summary("input closed");
                    return Ok(Outcome::InputClosed);
                }
            }
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<Flow, Error> {
        let index: i64 = match line.trim().parse() {
            Ok(index) => index,
            Err(_) => {
                let err = VendingError::Parse {
                    input: line.to_string(),
                };
                return self.recover(&err);
            }
        };

        match self.current_screen().kind() {
            ScreenKind::Exit => return self.confirm_exit(),
            ScreenKind::Buy(machine) if index != 0 => return self.purchase(machine, index),
            _ => {}
        }

        match self.navigator.resolve_index(index) {
            Ok(screen) => {
                self.navigator.go_to_screen(&self.layout.tree, screen);
                self.render()?;
                if self.current_screen().kind().is_final() {
                    return self.confirm_exit();
                }
                Ok(Flow::Continue)
            }
            Err(err) => self.recover(&err),
        }
    }

    /// Show a recoverable error and redraw the unchanged screen.
    fn recover(&mut self, err: &VendingError) -> Result<Flow, Error> {
        log::debug!("recovered from {err:?}");
        view::error_output(&mut self.output, &err.to_string())?;
        self.render()?;
        Ok(Flow::Continue)
    }

    fn purchase(&mut self, machine: MachineId, index: i64) -> Result<Flow, Error> {
        let Some(vending) = self.machines.get(machine.0) else {
            log::warn!("buy screen points at missing machine #{}", machine.0);
            return Ok(Flow::Continue);
        };
        let looked_up = vending
            .lookup_by_display_index(index)
            .map(|(slot, item)| (slot, item.clone()));
        let (slot, item) = match looked_up {
            Ok(found) => found,
            Err(err) => return self.recover(&err),
        };

        let Some(quantity) = self.ask_quantity()? else {
            return Ok(Flow::Closed);
        };
        let Some(tendered) = self.ask_tender()? else {
            return Ok(Flow::Closed);
        };

        log::info!(
            "attempting {} x{} with {} tendered, balance {}",
            item.name,
            quantity,
            tendered,
            self.user.balance
        );
        let settlement = match attempt_purchase(&item, quantity, tendered, self.user.balance) {
            Ok(settlement) => settlement,
            Err(err) => {
                log::warn!("purchase refused: {err}");
                return self.recover(&err);
            }
        };

        view::sys_output(
            &mut self.output,
            &format!(
                "{} x{} costs {}. You inserted {}.",
                item.display_name(),
                quantity,
                settlement.order_price,
                settlement.tendered
            ),
        )?;

        match self.confirm("Confirm purchase?")? {
            None => return Ok(Flow::Closed),
            Some(false) => {
                log::info!("purchase of {} cancelled", item.name);
                view::sys_output(&mut self.output, "Purchase cancelled.")?;
            }
            Some(true) => {
                match self.machines[machine.0].commit(slot, &settlement, &mut self.user) {
                    Ok(receipt) => {
                        log::info!(
                            "receipt {}: {} x{} for {}, balance now {}",
                            receipt.id,
                            receipt.item,
                            receipt.quantity,
                            receipt.total,
                            receipt.balance_after
                        );
                        view::sys_output(&mut self.output, &settlement.message())?;
                    }
                    Err(err) => {
                        log::warn!("commit failed: {err}");
                        view::error_output(&mut self.output, &err.to_string())?;
                    }
                }
            }
        }

        self.render()?;
        Ok(Flow::Continue)
    }

    fn confirm_exit(&mut self) -> Result<Flow, Error> {
        match self.confirm("Are you sure you want to exit?")? {
            None => Ok(Flow::Closed),
            Some(true) => {
                let purchases = self.user.receipts().len();
                view::sys_output(
                    &mut self.output,
                    &format!("Goodbye! You made {purchases} purchase(s)."),
                )?;
                Ok(Flow::Exit)
            }
            Some(false) => {
                self.navigator.go_to_screen(&self.layout.tree, self.layout.home);
                self.render()?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Draw the focused screen with its catalog and routes.
    fn render(&mut self) -> Result<(), Error> {
        let tree = &self.layout.tree;
        let screen = &tree[self.navigator.focus()];
        let kind = screen.kind();
        let balance = kind.shows_balance().then_some(self.user.balance);

        view::display_screen(&mut self.output, screen, balance)?;
        match kind {
            ScreenKind::Inventory(id) | ScreenKind::Buy(id) => {
                let style = if matches!(kind, ScreenKind::Buy(_)) {
                    CatalogStyle::Selectable
                } else {
                    CatalogStyle::Listing
                };
                if let Some(machine) = self.machines.get(id.0) {
                    view::display_inventory(&mut self.output, machine, style)?;
                }
            }
            ScreenKind::UserInventory => view::display_purchases(&mut self.output, &self.user)?,
            ScreenKind::Plain | ScreenKind::Confirm | ScreenKind::Exit => {}
        }
        view::display_routes(&mut self.output, tree, self.navigator.available_screens())?;
        Ok(())
    }

    fn log_summary(&self, reason: &str) {
        let history = self.navigator.history();
        log::info!(
            "session {reason} after {} screen change(s) over {:?}; {} purchase(s), balance {}",
            history.len(),
            history.duration().unwrap_or_default(),
            self.user.receipts().len(),
            self.user.balance
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Money;
    use std::io::Cursor;

    fn run_script(script: &str) -> (Outcome, Session<Cursor<Vec<u8>>, Vec<u8>>) {
        let input = Cursor::new(script.as_bytes().to_vec());
        let mut session = Session::new(Config::default(), input, Vec::new()).unwrap();
        let outcome = session.run().unwrap();
        (outcome, session)
    }

    fn output_of(session: Session<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn starts_on_home() {
        let (outcome, session) = run_script("");
        assert_eq!(outcome, Outcome::InputClosed);
        assert_eq!(session.current_screen().name(), "home");

        let text = output_of(session);
        assert!(text.starts_with("\n[HOME]\nWelcome! Select a screen!\n"));
        assert!(text.contains("\t[1]: -> INFO\n\t[2]: -> INVENTORY\n\t[3]: -> MY ITEMS\n\t[4]: -> EXIT\n"));
    }

    #[test]
    fn non_integer_keeps_focus() {
        let (_, session) = run_script("abc\n");
        assert_eq!(session.current_screen().name(), "home");
        assert!(output_of(session).contains("[ERROR]: Please enter an integer\n\n[HOME]"));
    }

    #[test]
    fn invalid_index_keeps_focus() {
        let (_, session) = run_script("0\n9\n");
        assert_eq!(session.current_screen().name(), "home");
        assert_eq!(output_of(session).matches("[ERROR]: Invalid Index").count(), 2);
    }

    #[test]
    fn navigates_down_and_back() {
        let (_, session) = run_script("1\n1\n0\n0\n2\n");
        assert_eq!(session.current_screen().name(), "inventory");
        let path: Vec<_> = session
            .navigator()
            .history()
            .get_path()
            .into_iter()
            .map(|id| session.tree()[id].name().to_string())
            .collect();
        assert_eq!(path, vec!["home", "info", "about", "info", "home", "inventory"]);
    }

    #[test]
    fn buy_screen_zero_goes_back() {
        let (_, session) = run_script("2\n1\n0\n");
        assert_eq!(session.current_screen().name(), "inventory");
    }

    #[test]
    fn confirmed_purchase_commits() {
        // inventory -> buy -> item 1, qty 2, insert 50, confirm yes
        let (_, session) = run_script("2\n1\n1\n2\n50\n1\n");
        assert_eq!(session.current_screen().name(), "buy");
        assert_eq!(session.user().balance, Money::from_dollars(60));
        assert_eq!(session.machines()[0].items()[0].stock, 8);
        assert_eq!(session.user().purchased().get("chips"), Some(&2));

        let text = output_of(session);
        assert!(text.contains("[SYSTEM]: Chips x2 costs $40.00. You inserted $50.00.\n"));
        assert!(text.contains("[SYSTEM]: Successfully purchased Chips! Change returned: $10.00\n"));
        assert!(text.contains("Balance: $60.00\n[1] Chips: $20.00 x8\n"));
    }

    #[test]
    fn declined_purchase_changes_nothing() {
        let (_, session) = run_script("2\n1\n2\n1\n20\n2\n");
        assert_eq!(session.current_screen().name(), "buy");
        assert_eq!(session.user().balance, Money::from_dollars(100));
        assert_eq!(session.machines()[0].items()[1].stock, 10);
        assert!(session.user().purchased().is_empty());
        assert!(output_of(session).contains("[SYSTEM]: Purchase cancelled.\n"));
    }

    #[test]
    fn refused_purchase_reports_reason() {
        // 11 chips but only 10 in stock, with enough money
        let (_, session) = run_script("2\n1\n1\n11\n100\n");
        assert_eq!(session.user().balance, Money::from_dollars(100));
        assert!(output_of(session).contains("[ERROR]: Not enough stock to purchase chips.\n"));
    }

    #[test]
    fn catalog_index_out_of_range() {
        let (_, session) = run_script("2\n1\n3\n");
        assert_eq!(session.current_screen().name(), "buy");
        assert!(output_of(session).contains("[ERROR]: Index out of range.\n"));
    }

    #[test]
    fn exit_confirmed_ends_session() {
        let (outcome, session) = run_script("4\n1\n2\n");
        assert_eq!(outcome, Outcome::Exited);
        assert!(output_of(session).contains("[SYSTEM]: Goodbye! You made 0 purchase(s).\n"));
    }

    #[test]
    fn exit_declined_returns_home() {
        let (outcome, session) = run_script("4\n2\n");
        assert_eq!(outcome, Outcome::InputClosed);
        assert_eq!(session.current_screen().name(), "home");
    }
}
