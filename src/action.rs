//! Menu actions

use serde::{Deserialize, Serialize};

use crate::state::MenuChoice;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    // ===== Menu category =====
    /// A top-level item was chosen
    MenuSelect(MenuChoice),

    /// The selector returned an index with no menu item behind it
    MenuInvalid(usize),

    // ===== Flow category =====
    /// Result: the running flow returned normally
    FlowDidFinish,

    /// Result: the running flow hit an error at its boundary
    FlowDidFail(String),
}
