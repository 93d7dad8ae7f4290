//! Single-queue scheduler that replaces wall-clock timers.
//!
//! Every pacing delay is a queued step carrying the time it waits before
//! running. `Game::advance` drains the queue against a virtual clock, so the
//! battle can be fast-forwarded without sleeping.

use std::collections::VecDeque;
use std::time::Duration;

use crate::content::ItemDrop;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) enum Step {
    IntroApproach,
    IntroDarkness,
    IntroReveal,
    OpenCommandMenu,
    NextQuestion,
    EndRush,
    EnemyWindUp,
    EnemyStrike,
    ResolveVictory,
    AwardExperience { exp: u32, drop: Option<ItemDrop> },
    AnnounceDrop { drop: Option<ItemDrop>, leveled_up: bool },
    NextEncounter,
    GameOver,
    GameClear,
    ReturnToTitle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Scheduled {
    pub(super) delay: Duration,
    pub(super) step: Step,
}

#[derive(Debug, Default)]
pub(super) struct Scheduler {
    queue: VecDeque<Scheduled>,
    clock: Duration,
}

impl Scheduler {
    pub(super) fn schedule(&mut self, delay: Duration, step: Step) {
        self.queue.push_back(Scheduled { delay, step });
    }

    /// Pops the next step and moves the clock past its delay.
    pub(super) fn pop(&mut self) -> Option<Scheduled> {
        let next = self.queue.pop_front()?;
        self.clock += next.delay;
        Some(next)
    }

    pub(super) fn cancel_all(&mut self) {
        self.queue.clear();
    }

    pub(super) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub(super) fn clock(&self) -> Duration {
        self.clock
    }
}

/// Beat lengths, in the order they occur during an encounter.
pub(super) mod pacing {
    use std::time::Duration;

    pub(crate) const INTRO_SILENCE: Duration = Duration::from_millis(1500);
    pub(crate) const INTRO_APPROACH: Duration = Duration::from_millis(2000);
    pub(crate) const INTRO_DARKNESS: Duration = Duration::from_millis(3000);
    pub(crate) const INTRO_REVEAL: Duration = Duration::from_millis(1000);
    pub(crate) const ATTACK_WIND_UP: Duration = Duration::from_millis(1000);
    pub(crate) const AFTER_HIT: Duration = Duration::from_millis(800);
    pub(crate) const AFTER_MISS: Duration = Duration::from_millis(1000);
    pub(crate) const ENEMY_FALLS: Duration = Duration::from_millis(3000);
    pub(crate) const RUSH_TO_VICTORY: Duration = Duration::from_millis(500);
    pub(crate) const RUSH_TO_COUNTER: Duration = Duration::from_millis(1000);
    pub(crate) const ACTION_TO_COUNTER: Duration = Duration::from_millis(1500);
    pub(crate) const COUNTER_WIND_UP: Duration = Duration::from_millis(1000);
    pub(crate) const COUNTER_TO_MENU: Duration = Duration::from_millis(1500);
    pub(crate) const TO_GAME_OVER: Duration = Duration::from_millis(1000);
    pub(crate) const VICTORY_TO_EXP: Duration = Duration::from_millis(1500);
    pub(crate) const EXP_TO_DROP: Duration = Duration::from_millis(1500);
    pub(crate) const DROP_TO_NEXT: Duration = Duration::from_millis(2000);
    pub(crate) const LEVEL_UP_TO_NEXT: Duration = Duration::from_millis(2500);
    pub(crate) const PLAIN_TO_NEXT: Duration = Duration::from_millis(500);
    pub(crate) const FLEE_TO_TITLE: Duration = Duration::from_millis(1000);
    pub(crate) const TO_GAME_CLEAR: Duration = Duration::from_millis(1000);
}
