//! Step Controller — owns the wizard's step index and its transition rules.
//!
//! | State          | advance      | retreat  | skip     |
//! |----------------|--------------|----------|----------|
//! | 0 welcome      | → 1          | —        | —        |
//! | 1..TOTAL-1     | → step + 1   | → step-1 | → step+1 |
//! | TOTAL          | → review     | → step-1 | —        |
//! | review         | —            | → TOTAL  | —        |
//!
//! Rejected transitions leave the step untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of data-entry steps between welcome and review.
pub const TOTAL_STEPS: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Step(u8);

impl Step {
    pub const WELCOME: Step = Step(0);
    pub const FIRST: Step = Step(1);
    pub const LAST: Step = Step(TOTAL_STEPS);
    pub const REVIEW: Step = Step(TOTAL_STEPS + 1);

    pub fn new(index: u8) -> Result<Self, TransitionError> {
        if index > Self::REVIEW.0 {
            return Err(TransitionError::OutOfRange(index));
        }
        Ok(Step(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn is_data_step(self) -> bool {
        (Self::FIRST.0..=Self::LAST.0).contains(&self.0)
    }

    pub fn is_review(self) -> bool {
        self == Self::REVIEW
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Step::WELCOME => write!(f, "welcome"),
            Step::REVIEW => write!(f, "review"),
            Step(n) => write!(f, "step {n} of {TOTAL_STEPS}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Advance,
    Retreat,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {transition:?} from {from}")]
    NotAllowed { transition: Transition, from: Step },

    #[error("step {0} is outside the wizard")]
    OutOfRange(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StepController {
    step: Step,
}

impl Default for Step {
    fn default() -> Self {
        Step::WELCOME
    }
}

impl StepController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Step {
        self.step
    }

    /// "Continue" on a data step, "Let's Go" on welcome, "Complete Setup" on the last step.
    pub fn advance(&mut self) -> Result<Step, TransitionError> {
        if self.step.is_review() {
            return Err(self.refuse(Transition::Advance));
        }
        self.step = Step(self.step.0 + 1);
        Ok(self.step)
    }

    pub fn retreat(&mut self) -> Result<Step, TransitionError> {
        self.step = match self.step {
            Step::WELCOME => return Err(self.refuse(Transition::Retreat)),
            Step::REVIEW => Step::LAST,
            Step(n) => Step(n - 1),
        };
        Ok(self.step)
    }

    /// Only offered on data steps before the last one.
    pub fn skip(&mut self) -> Result<Step, TransitionError> {
        if !self.can_skip() {
            return Err(self.refuse(Transition::Skip));
        }
        self.advance()
    }

    pub fn jump_to(&mut self, index: u8) -> Result<Step, TransitionError> {
        self.step = Step::new(index)?;
        Ok(self.step)
    }

    pub fn can_skip(&self) -> bool {
        self.step.is_data_step() && self.step != Step::LAST
    }

    fn refuse(&self, transition: Transition) -> TransitionError {
        TransitionError::NotAllowed {
            transition,
            from: self.step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(index: u8) -> StepController {
        let mut c = StepController::new();
        c.jump_to(index).unwrap();
        c
    }

    #[test]
    fn test_starts_on_welcome() {
        assert_eq!(StepController::new().current(), Step::WELCOME);
    }

    #[test]
    fn test_advance_then_retreat_round_trips_on_inner_steps() {
        for s in 1..TOTAL_STEPS {
            let mut c = at(s);
            c.advance().unwrap();
            c.retreat().unwrap();
            assert_eq!(c.current().index(), s);
        }
    }

    #[test]
    fn test_last_step_advances_to_review() {
        let mut c = at(TOTAL_STEPS);
        assert_eq!(c.advance().unwrap(), Step::REVIEW);
    }

    #[test]
    fn test_review_has_no_forward_transition() {
        let mut c = at(Step::REVIEW.index());
        assert!(matches!(
            c.advance(),
            Err(TransitionError::NotAllowed {
                transition: Transition::Advance,
                ..
            })
        ));
        assert_eq!(c.current(), Step::REVIEW);
    }

    #[test]
    fn test_retreat_from_review_lands_on_last_step() {
        let mut c = at(Step::REVIEW.index());
        assert_eq!(c.retreat().unwrap(), Step::LAST);
    }

    #[test]
    fn test_retreat_from_welcome_is_rejected() {
        let mut c = StepController::new();
        assert!(c.retreat().is_err());
        assert_eq!(c.current(), Step::WELCOME);
    }

    #[test]
    fn test_retreat_from_first_step_returns_to_welcome() {
        let mut c = at(1);
        assert_eq!(c.retreat().unwrap(), Step::WELCOME);
    }

    #[test]
    fn test_jump_to_welcome_then_advance_lands_on_first() {
        for s in 0..=Step::REVIEW.index() {
            let mut c = at(s);
            c.jump_to(0).unwrap();
            assert_eq!(c.advance().unwrap(), Step::FIRST);
        }
    }

    #[test]
    fn test_skip_only_on_inner_data_steps() {
        assert!(StepController::new().skip().is_err());
        assert!(at(TOTAL_STEPS).skip().is_err());
        assert!(at(Step::REVIEW.index()).skip().is_err());

        let mut c = at(2);
        assert_eq!(c.skip().unwrap().index(), 3);
    }

    #[test]
    fn test_jump_out_of_range_keeps_step() {
        let mut c = at(3);
        assert_eq!(c.jump_to(8), Err(TransitionError::OutOfRange(8)));
        assert_eq!(c.current().index(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Step::WELCOME.to_string(), "welcome");
        assert_eq!(Step::REVIEW.to_string(), "review");
        assert_eq!(Step(2).to_string(), "step 2 of 6");
    }
}
