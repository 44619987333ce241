use cellboard_core::{update, AppState, AsyncState, CounterView, Effect, Msg, LIST_SEED};
use pretty_assertions::assert_eq;

const TARGET: &str = "https://example.com/todos/1";

fn init_logging() {
    cellboard_logging::initialize_for_tests();
}

fn add_item(state: AppState, text: &str) -> AppState {
    let (state, _) = update(state, Msg::DraftChanged(text.to_string()));
    let (state, effects) = update(state, Msg::AddToListClicked);
    assert!(effects.is_empty());
    state
}

#[test]
fn fresh_list_is_seeded() {
    init_logging();
    let state = AppState::new(TARGET);
    assert_eq!(*state.list(), vec!["hello".to_string(), "world".to_string()]);
    assert_eq!(state.view().list, LIST_SEED.map(String::from).to_vec());
}

#[test]
fn start_loads_counter_and_fetches_target() {
    init_logging();
    let (mut state, effects) = update(AppState::new(TARGET), Msg::Started);

    assert_eq!(
        effects,
        vec![
            Effect::LoadCounter,
            Effect::Fetch {
                request_id: 1,
                url: TARGET.to_string(),
            },
        ]
    );
    let view = state.view();
    assert_eq!(view.todo, AsyncState::Pending);
    assert_eq!(view.counter, CounterView::Loading);
    assert!(view.is_gated());
    assert!(state.consume_dirty());

    // Starting twice does not refetch.
    let (_state, effects) = update(state, Msg::Started);
    assert!(effects.is_empty());
}

#[test]
fn append_grows_list_by_one_and_keeps_order() {
    init_logging();
    let mut state = AppState::new(TARGET);
    for text in ["alpha", "", "alpha", "with spaces "] {
        let before = state.list();
        state = add_item(state, text);
        let after = state.list();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after.last().map(String::as_str), Some(text));
        assert_eq!(&after[..before.len()], &before[..]);
    }
    assert_eq!(
        *state.list(),
        vec!["hello", "world", "alpha", "", "alpha", "with spaces "]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
}

#[test]
fn submitting_clears_the_draft() {
    init_logging();
    let (state, _) = update(AppState::new(TARGET), Msg::DraftChanged("typed".into()));
    assert_eq!(state.draft(), "typed");
    assert_eq!(state.view().draft, "typed");

    let (mut state, _) = update(state, Msg::AddToListClicked);
    assert_eq!(state.draft(), "");
    assert!(state.consume_dirty());
}

#[test]
fn earlier_list_snapshots_are_not_mutated() {
    init_logging();
    let state = AppState::new(TARGET);
    let snapshot = state.list();
    let state = add_item(state, "new");

    assert_eq!(snapshot.len(), 2);
    assert_eq!(state.list().len(), 3);
}

#[test]
fn list_subscribers_see_each_append() {
    init_logging();
    use std::sync::{Arc, Mutex};

    let lengths = Arc::new(Mutex::new(Vec::new()));
    let mut state = AppState::new(TARGET);
    let sink = lengths.clone();
    state.subscribe_list(move |items| sink.lock().unwrap().push(items.len()));

    let state = add_item(state, "a");
    let _state = add_item(state, "b");
    assert_eq!(*lengths.lock().unwrap(), vec![3, 4]);
}

#[test]
fn tick_animates_only_while_suspended() {
    init_logging();
    let (mut state, _) = update(AppState::new(TARGET), Msg::Started);
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::Tick);
    assert_eq!(state.view().spinner_frame, 1);
    assert!(state.consume_dirty());
}
