use jobdesk_core::{update, ActionResult, AppState, ElementId, Msg};

use crate::{DispatchOutcome, EngineEvent, EngineHandle};

/// Owns the page state and feeds engine events back through `update`.
pub struct ConsoleSession {
    state: AppState,
    engine: EngineHandle,
    submitted_forms: Vec<ElementId>,
}

impl ConsoleSession {
    pub fn new(state: AppState, engine: EngineHandle) -> Self {
        Self {
            state,
            engine,
            submitted_forms: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Apply `msg` and start its effects. Returns whether the page changed.
    pub fn send(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        for effect in effects {
            self.engine.run(effect);
        }
        was_dirty
    }

    /// Wait for the next engine event and apply it. Returns `false` once the engine is gone.
    pub async fn next_event(&mut self) -> bool {
        match self.engine.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    /// Apply every event that is already waiting. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.engine.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Forms whose submission went through since the last call.
    pub fn take_submitted_forms(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.submitted_forms)
    }

    /// Page unload: drop outstanding requests from the state, then stop the engine.
    pub fn shutdown(&mut self) {
        self.send(Msg::PageUnloaded);
        self.engine.shutdown();
    }

    fn apply(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::ActionFinished {
                request_id,
                outcome,
            } => {
                let result = match outcome {
                    DispatchOutcome::Confirmed => ActionResult::Confirmed,
                    DispatchOutcome::Declined(_) => ActionResult::Declined,
                    DispatchOutcome::Failed(_) => ActionResult::Failed,
                };
                self.send(Msg::ActionResolved { request_id, result });
            }
            EngineEvent::ReversionDue(pending) => {
                self.send(Msg::ReversionDue(pending));
            }
            EngineEvent::PreviewRead { target, data_url } => {
                self.send(Msg::PreviewLoaded { target, data_url });
            }
            EngineEvent::FormSubmitted { form } => {
                self.submitted_forms.push(form);
            }
        }
    }
}
