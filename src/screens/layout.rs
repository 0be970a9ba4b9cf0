//! The standard menu layout.
//!
//! ```text
//! home
//! ├── info
//! │   └── about
//! ├── <machine>        (one per vending machine)
//! │   └── buy
//! ├── my items
//! └── exit
//!
//! confirm              (detached overlay)
//! ```

use super::tree::{BuildError, ScreenId, ScreenKind, ScreenTree};
use crate::core::{MachineId, VendingMachine};

const HOME_TEXT: &str = "Welcome! Select a screen!";
const INFO_TEXT: &str = "Select a screen to learn more about this program!";
const ABOUT_TEXT: &str = "This is a vending machine that sells food and beverages. It is composed of \
                          different screens that represent a page of the program!";
const INVENTORY_TEXT: &str = "To purchase an item, please select the buy option.";
const BUY_TEXT: &str = "Enter the item index to purchase it.";
const MY_ITEMS_TEXT: &str = "Items you have purchased.";
const EXIT_TEXT: &str = "Leaving so soon?";
const CONFIRM_TEXT: &str = "Please confirm your choice.";

/// Screens that belong to one machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MachineScreens {
    pub machine: MachineId,
    pub inventory: ScreenId,
    pub buy: ScreenId,
}

/// A built tree plus handles to the screens the session needs by name.
#[derive(Clone, Debug)]
pub struct Layout {
    pub tree: ScreenTree,
    pub home: ScreenId,
    pub info: ScreenId,
    pub about: ScreenId,
    pub machines: Vec<MachineScreens>,
    pub my_items: ScreenId,
    pub exit: ScreenId,
    pub confirm: ScreenId,
}

/// Build the standard tree for `machines`, in catalog order.
///
/// Each machine's inventory screen is named after the machine.
pub fn standard(machines: &[VendingMachine]) -> Result<Layout, BuildError> {
    if machines.is_empty() {
        return Err(BuildError::NoMachines);
    }

    let mut tree = ScreenTree::new();
    let home = tree.add_root("home", HOME_TEXT, ScreenKind::Plain)?;
    let info = tree.add_child(home, "info", INFO_TEXT, ScreenKind::Plain)?;

    let mut machine_screens = Vec::with_capacity(machines.len());
    for (i, machine) in machines.iter().enumerate() {
        let id = MachineId(i);
        let inventory =
            tree.add_child(home, machine.name(), INVENTORY_TEXT, ScreenKind::Inventory(id))?;
        let buy = tree.add_child(inventory, "buy", BUY_TEXT, ScreenKind::Buy(id))?;
        machine_screens.push(MachineScreens {
            machine: id,
            inventory,
            buy,
        });
    }

    let my_items = tree.add_child(home, "my items", MY_ITEMS_TEXT, ScreenKind::UserInventory)?;
    let exit = tree.add_child(home, "exit", EXIT_TEXT, ScreenKind::Exit)?;
    let about = tree.add_child(info, "about", ABOUT_TEXT, ScreenKind::Plain)?;
    let confirm = tree.add_root("confirm", CONFIRM_TEXT, ScreenKind::Confirm)?;

    log::debug!("built {} screens for {} machine(s)", tree.len(), machines.len());

    Ok(Layout {
        tree,
        home,
        info,
        about,
        machines: machine_screens,
        my_items,
        exit,
        confirm,
    })
}
