//! Line prompts and the Yes/No overlay.
//!
//! Every prompt re-asks until it gets something usable. `Ok(None)` means
//! input ended while waiting.

use super::{Session, AWAITING_INPUT};
use crate::core::{Money, MoneyParseError};
use crate::error::{Error, VendingError};
use crate::view;
use std::io::{BufRead, Write};

const CHOICES: [&str; 2] = ["yes", "no"];

impl<R: BufRead, W: Write> Session<R, W> {
    pub(super) fn read_line(&mut self, prompt: &str) -> Result<Option<String>, Error> {
        view::prompt(&mut self.output, prompt)?;
        // Undecodable bytes become U+FFFD and fail parsing like any other typo.
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }

    pub(super) fn ask_quantity(&mut self) -> Result<Option<u32>, Error> {
        loop {
            let Some(line) = self.read_line("Input quantity:")? else {
                return Ok(None);
            };
            match line.parse::<i64>() {
                Ok(n) if n > 0 => match u32::try_from(n) {
                    Ok(quantity) => return Ok(Some(quantity)),
                    Err(_) => view::error_output(&mut self.output, "That quantity is too large.")?,
                },
                Ok(_) => view::error_output(
                    &mut self.output,
                    &VendingError::NonPositiveQuantity.to_string(),
                )?,
                Err(_) => view::error_output(&mut self.output, "Invalid input.")?,
            }
        }
    }

    pub(super) fn ask_tender(&mut self) -> Result<Option<Money>, Error> {
        loop {
            let Some(line) = self.read_line("Input amount to insert:")? else {
                return Ok(None);
            };
            match line.parse::<Money>() {
                Ok(amount) if !amount.is_zero() => return Ok(Some(amount)),
                Ok(_) | Err(MoneyParseError::Negative(_)) => {
                    view::error_output(&mut self.output, "Please enter a positive amount")?
                }
                Err(err) => {
                    log::debug!("rejected tender {line:?}: {err}");
                    view::error_output(&mut self.output, "Invalid input.")?
                }
            }
        }
    }

    /// Ask a Yes/No question on the confirmation overlay.
    ///
    /// Focus moves to the overlay while asking and returns to the previous
    /// screen afterwards, whatever the answer.
    pub(super) fn confirm(&mut self, question: &str) -> Result<Option<bool>, Error> {
        let previous = self.navigator.focus();
        self.navigator
            .go_to_screen(&self.layout.tree, self.layout.confirm);

        let answer = loop {
            let overlay = &self.layout.tree[self.layout.confirm];
            view::display_screen(&mut self.output, overlay, None)?;
            view::sys_output(&mut self.output, question)?;
            view::display_choices(&mut self.output, &CHOICES)?;

            let Some(line) = self.read_line(AWAITING_INPUT)? else {
                break None;
            };
            match line.parse::<i64>() {
                Ok(1) => break Some(true),
                Ok(2) => break Some(false),
                Ok(_) => view::error_output(&mut self.output, "Please enter 1 or 2")?,
                Err(_) => view::error_output(&mut self.output, "Please enter an integer")?,
            }
        };

        self.navigator.go_to_screen(&self.layout.tree, previous);
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::core::Money;
    use crate::session::Session;
    use std::io::Cursor;

    fn session(script: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(
            Config::default(),
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn quantity_reprompts_until_positive() {
        let mut s = session("zero\n0\n-3\n4\n");
        assert_eq!(s.ask_quantity().unwrap(), Some(4));

        let text = String::from_utf8(s.into_output()).unwrap();
        assert_eq!(text.matches("[ERROR]: Invalid input.").count(), 1);
        assert_eq!(text.matches("[ERROR]: Please enter a positive integer").count(), 2);
    }

    #[test]
    fn quantity_none_at_end_of_input() {
        let mut s = session("nope\n");
        assert_eq!(s.ask_quantity().unwrap(), None);
    }

    #[test]
    fn tender_accepts_decimal_amounts() {
        let mut s = session("0\n-1\nten\n7.25\n");
        assert_eq!(s.ask_tender().unwrap(), Some(Money::from_cents(725)));

        let text = String::from_utf8(s.into_output()).unwrap();
        assert_eq!(text.matches("[ERROR]: Please enter a positive amount").count(), 2);
        assert_eq!(text.matches("[ERROR]: Invalid input.").count(), 1);
    }

    #[test]
    fn confirm_restores_focus() {
        let mut s = session("x\n3\n2\n");
        let before = s.navigator().focus();
        let before_routes = s.navigator().available_screens().clone();

        assert_eq!(s.confirm("Sure?").unwrap(), Some(false));
        assert_eq!(s.navigator().focus(), before);
        assert_eq!(s.navigator().available_screens(), &before_routes);

        let text = String::from_utf8(s.into_output()).unwrap();
        assert!(text.contains("\n[CONFIRM]\nPlease confirm your choice.\n[SYSTEM]: Sure?\n\t[1]: YES\n\t[2]: NO\n"));
        assert!(text.contains("[ERROR]: Please enter an integer"));
        assert!(text.contains("[ERROR]: Please enter 1 or 2"));
    }

    #[test]
    fn quantity_reprompts_after_invalid_utf8() {
        let input = Cursor::new(b"\xc3\x28\n5\n".to_vec());
        let mut s = Session::new(Config::default(), input, Vec::new()).unwrap();
        assert_eq!(s.ask_quantity().unwrap(), Some(5));

        let text = String::from_utf8(s.into_output()).unwrap();
        assert_eq!(text.matches("[ERROR]: Invalid input.").count(), 1);
    }

    #[test]
    fn confirm_yes() {
        let mut s = session("1\n");
        assert_eq!(s.confirm("Sure?").unwrap(), Some(true));
    }

    #[test]
    fn confirm_end_of_input_still_restores_focus() {
        let mut s = session("");
        let before = s.navigator().focus();
        assert_eq!(s.confirm("Sure?").unwrap(), None);
        assert_eq!(s.navigator().focus(), before);
    }
}
