//! Session creation and per-group resolution.
//!
//! ## Creating a session
//!
//! 1. Participants are split, in order, into groups of `num_buyers + num_sellers`
//! 2. In each group the first `num_sellers` players are sellers, the rest buyers
//! 3. Each player draws a private evaluation uniformly on the currency grid
//!    of `[lb, ub]`
//!
//! ## Resolving a group
//!
//! `barrier -> clear_market -> assign_payoffs`, once per group.
//!
//! ## Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use volauction::session::{Session, Settings, SubmissionBarrier};
//!
//! let config = Settings::default().session("volauction").unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let mut session = Session::create(config, &mut rng).unwrap();
//!
//! // Nobody acts: every player is pending and the barrier refuses.
//! assert!(session.resolve_all(&mut SubmissionBarrier, &mut rng).is_err());
//!
//! let group = session.group_mut(1).unwrap();
//! for id in 1..=3 {
//!     group.choose_activity(id, false).unwrap();
//! }
//! // All traders, no auctions: nothing to wait for, everyone gets the baseline.
//! let receipt = session.resolve_all(&mut SubmissionBarrier, &mut rng).unwrap();
//! assert!(receipt.is_empty());
//! ```

use rand::Rng;
use tracing::info;

use crate::engine::clearing::ClearingResult;
use crate::error::{ConfigError, SessionError};
use crate::market::Group;
use crate::session::{Barrier, SessionConfig};
use crate::types::{
    AuctionId, Currency, GroupId, Player, PlayerOutcome, RoundReceipt, RoundRecord,
};

/// Draw a value uniformly from the grid of `[lb, ub]` at `decimal_places`
/// precision. `None` if the bounds are inverted or out of range.
pub fn draw_evaluation<R>(rng: &mut R, lb: Currency, ub: Currency, decimal_places: u32) -> Option<Currency>
where
    R: Rng + ?Sized,
{
    let low = lb.to_minor_units(decimal_places)?;
    let high = ub.to_minor_units(decimal_places)?;
    if low > high {
        return None;
    }
    let units = rng.gen_range(low..=high);
    Some(Currency::from_minor_units(units, decimal_places))
}

/// One session: its config and its groups.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    groups: Vec<Group>,
}

impl Session {
    /// Validate `config`, form groups and assign roles and evaluations.
    pub fn create<R>(config: SessionConfig, rng: &mut R) -> Result<Self, ConfigError>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;

        let group_size = config.group_size() as usize;
        let dp = config.points_decimal_places;
        let rules = config.market_rules();

        let mut groups = Vec::with_capacity(config.num_groups() as usize);
        for index in 0..config.num_groups() {
            let evaluations = (0..group_size)
                .map(|_| {
                    draw_evaluation(rng, config.lb, config.ub, dp).ok_or_else(|| {
                        ConfigError::InvalidValue {
                            key: "lb/ub".to_string(),
                            reason: format!("bounds [{}, {}] cannot be drawn from", config.lb, config.ub),
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let group_id: GroupId = index + 1;
            let first_participant = u64::from(index) * group_size as u64 + 1;
            groups.push(Group::from_evaluations(
                group_id,
                config.num_sellers,
                &evaluations,
                first_participant,
                rules,
            ));
        }

        info!(
            session = %config.name,
            groups = groups.len(),
            participants = config.num_participants,
            "session created"
        );

        Ok(Self { config, groups })
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id() == id)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Result<&mut Group, SessionError> {
        self.groups
            .iter_mut()
            .find(|g| g.id() == id)
            .ok_or(SessionError::UnknownGroup(id))
    }

    /// Every player of every group
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.groups.iter().flat_map(|g| g.players().iter())
    }

    /// Wait at the barrier, clear the group's market and assign payoffs.
    pub fn resolve_group<B, R>(
        &mut self,
        id: GroupId,
        barrier: &mut B,
        rng: &mut R,
    ) -> Result<Vec<(AuctionId, Option<ClearingResult>)>, SessionError>
    where
        B: Barrier + ?Sized,
        R: Rng + ?Sized,
    {
        let group = self.group_mut(id)?;
        barrier.await_all(group)?;
        let results = group.clear_market(rng)?;
        group.assign_payoffs()?;
        Ok(results)
    }

    /// Resolve every group not yet cleared, then summarize the round.
    pub fn resolve_all<B, R>(&mut self, barrier: &mut B, rng: &mut R) -> Result<RoundReceipt, SessionError>
    where
        B: Barrier + ?Sized,
        R: Rng + ?Sized,
    {
        let pending: Vec<GroupId> = self
            .groups
            .iter()
            .filter(|g| !g.is_cleared())
            .map(Group::id)
            .collect();

        for id in pending {
            self.resolve_group(id, barrier, rng)?;
        }

        self.receipt()
    }

    /// Export of every player and auction
    pub fn record(&self) -> RoundRecord {
        let players = self
            .players()
            .map(|p| {
                let payment = p.payoff.and_then(|payoff| self.config.real_world_payment(payoff));
                PlayerOutcome::from_player(p, payment)
            })
            .collect();

        let auctions = self.groups.iter().flat_map(Group::auction_outcomes).collect();

        RoundRecord {
            session: self.config.name.clone(),
            players,
            auctions,
        }
    }

    /// Receipt over the current record
    pub fn receipt(&self) -> Result<RoundReceipt, SessionError> {
        let groups = self.groups.iter().filter(|g| g.is_cleared()).count() as u64;
        Ok(RoundReceipt::from_record(&self.record(), groups)?)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
