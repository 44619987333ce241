#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Application started; kicks off the initial fetch and storage load.
    Started,
    /// User edited the text input.
    DraftChanged(String),
    /// User pressed "Add to List".
    AddToListClicked,
    /// User pressed "Bears UP".
    IncrementClicked,
    /// User asked to remove all bears.
    ResetClicked,
    /// The request target was replaced; derived cells recompute.
    RequestTargetChanged(String),
    /// Engine finished a fetch (successfully or not).
    FetchCompleted {
        request_id: crate::RequestId,
        outcome: crate::FetchOutcome,
    },
    /// Engine lost a fetch computation before it produced an outcome.
    FetchCrashed {
        request_id: crate::RequestId,
        message: String,
    },
    /// Storage load finished; `None` means nothing usable was stored.
    CounterHydrated(Option<crate::Counter>),
    /// UI/render tick, drives loading animations.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
