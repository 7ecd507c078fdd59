//! Group synchronization before clearing.
//!
//! The host framework owns the actual wait (a wait page in the browser
//! flow). The domain only needs to know whether the group may proceed, so
//! the barrier is a trait the host implements. [`SubmissionBarrier`] is the
//! in-process version: it lets the group through once nobody is left to act.

use crate::error::SessionError;
use crate::market::Group;

/// Synchronization point every player of a group must reach before the
/// market is cleared.
pub trait Barrier {
    /// Return once every player of `group` has arrived, or an error naming
    /// who is missing.
    fn await_all(&mut self, group: &Group) -> Result<(), SessionError>;
}

/// Any `FnMut(&Group) -> Result<(), SessionError>` is a barrier.
impl<F> Barrier for F
where
    F: FnMut(&Group) -> Result<(), SessionError>,
{
    fn await_all(&mut self, group: &Group) -> Result<(), SessionError> {
        self(group)
    }
}

/// Passes when every player has chosen an activity and every trader with
/// an auction to bid into has bid.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionBarrier;

impl Barrier for SubmissionBarrier {
    fn await_all(&mut self, group: &Group) -> Result<(), SessionError> {
        let pending = group.pending_players();
        if pending.is_empty() {
            Ok(())
        } else {
            Err(SessionError::BarrierNotReached {
                group: group.id(),
                pending,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::MarketRules;
    use crate::types::Currency;

    fn group() -> Group {
        let evaluations = [4, 9, 9].map(Currency::from_int);
        Group::from_evaluations(5, 1, &evaluations, 0, MarketRules::default())
    }

    #[test]
    fn test_submission_barrier_blocks_until_all_acted() {
        let mut group = group();
        let mut barrier = SubmissionBarrier;

        let err = barrier.await_all(&group).unwrap_err();
        assert!(matches!(
            err,
            SessionError::BarrierNotReached { group: 5, ref pending } if pending == &vec![1, 2, 3]
        ));

        let auction = group.choose_activity(1, true).unwrap().unwrap();
        for trader in [2, 3] {
            group.choose_activity(trader, false).unwrap();
            group.submit_bid(trader, auction, Currency::from_int(5)).unwrap();
        }
        assert!(barrier.await_all(&group).is_ok());
    }

    #[test]
    fn test_closure_barrier() {
        let group = group();
        let mut calls = 0;
        let mut barrier = |_: &Group| -> Result<(), SessionError> {
            calls += 1;
            Ok(())
        };

        assert!(barrier.await_all(&group).is_ok());
        assert!(barrier.await_all(&group).is_ok());
        assert_eq!(calls, 2);
    }
}
