//! Regression test module wiring for the turn sequencer.

mod encounter_flow;
mod flee_flow;

/// Shared imports for sequencer regression tests.
mod support {
    pub(super) use super::super::test_support::*;
    pub(super) use super::super::*;
    pub(super) use crate::presenter::{PresenterCall, RecordingPresenter};
    pub(super) use crate::testing::ScriptedRng;
}
