//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{MenuChoice, MenuPhase, MenuState};

/// The reducer handles all menu transitions
pub fn reducer(state: &mut MenuState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Menu actions =====
        Action::MenuSelect(choice) => {
            if !state.is_awaiting() {
                return DispatchResult::unchanged();
            }
            if choice == MenuChoice::Exit {
                state.phase = MenuPhase::Exited;
                return DispatchResult::changed_with(Effect::Farewell);
            }
            state.phase = MenuPhase::Running(choice);
            DispatchResult::changed_with(Effect::RunFlow(choice))
        }

        Action::MenuInvalid(index) => {
            if !state.is_awaiting() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with(Effect::InvalidChoice(index))
        }

        // ===== Flow actions =====
        Action::FlowDidFinish => {
            if !matches!(state.phase, MenuPhase::Running(_)) {
                return DispatchResult::unchanged();
            }
            state.phase = MenuPhase::AwaitingSelection;
            state.completed_flows += 1;
            DispatchResult::changed()
        }

        Action::FlowDidFail(message) => {
            if !matches!(state.phase, MenuPhase::Running(_)) {
                return DispatchResult::unchanged();
            }
            state.phase = MenuPhase::AwaitingSelection;
            state.failed_flows += 1;
            state.last_error = Some(message);
            DispatchResult::changed()
        }
    }
}
