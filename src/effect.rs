//! Effects - work the menu loop performs after a transition

use crate::state::MenuChoice;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Announce the choice and run its flow to completion
    RunFlow(MenuChoice),
    /// Report an unmapped selection
    InvalidChoice(usize),
    /// Print the exit message
    Farewell,
}
