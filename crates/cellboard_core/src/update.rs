use crate::graph::CellKey;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if !state.start() {
                return (state, Vec::new());
            }
            let mut effects = vec![Effect::LoadCounter];
            effects.extend(state.recompute_from(CellKey::RequestTarget));
            state.mark_dirty();
            effects
        }
        Msg::DraftChanged(text) => {
            state.set_draft(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::AddToListClicked => {
            state.submit_draft();
            state.mark_dirty();
            Vec::new()
        }
        Msg::IncrementClicked => match state.counter_mut().increment() {
            Some(counter) => {
                state.mark_dirty();
                vec![Effect::PersistCounter(counter)]
            }
            None => Vec::new(),
        },
        Msg::ResetClicked => match state.counter_mut().reset() {
            Some(counter) => {
                state.mark_dirty();
                vec![Effect::PersistCounter(counter)]
            }
            None => Vec::new(),
        },
        Msg::RequestTargetChanged(target) => {
            if !state.set_request_target(target) {
                return (state, Vec::new());
            }
            state.mark_dirty();
            state.recompute_from(CellKey::RequestTarget)
        }
        Msg::FetchCompleted {
            request_id,
            outcome,
        } => {
            if state.todo_mut().resolve(request_id, outcome) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FetchCrashed {
            request_id,
            message,
        } => {
            if state.todo_mut().fail(request_id, message) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CounterHydrated(restored) => {
            if state.counter_mut().hydrate(restored.unwrap_or_default()) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick => {
            if state.is_suspended() {
                state.advance_spinner();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
