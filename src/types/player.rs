//! Player state for one round.
//!
//! A player's role and private evaluation are fixed when the session is
//! created. The activity choice, payoff and the post-clearing data dumps
//! (`trader_is_winner`, `auction_price`, `bid_price`) start out unset and
//! are filled in as the round progresses.

use crate::engine::payoff::trade_payoff;
use crate::types::{Activity, Currency, Direction, GroupId, ParticipantId, Role};

/// A participant in one round.
///
/// ## Example
///
/// ```
/// use volauction::types::{Currency, Player, Role};
///
/// let seller = Player::new(1, 1, 1, Role::Seller, Currency::from_int(4));
/// assert_eq!(seller.trade_payoff(Currency::from_int(7)), Currency::from_int(3));
///
/// let buyer = Player::new(2, 1, 2, Role::Buyer, Currency::from_int(6));
/// assert_eq!(buyer.trade_payoff(Currency::from_int(3)), Currency::from_int(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Session-wide participant identifier
    pub participant_id: ParticipantId,

    /// Group (market) this player belongs to
    pub group_id: GroupId,

    /// Stable 1-based position in the group; drives the role
    pub id_in_group: u32,

    pub role: Role,

    /// Private value of the good, drawn uniformly in `[lb, ub]`
    pub evaluation: Currency,

    /// Auctioneer or trader; `None` until the player has chosen
    pub activity: Option<Activity>,

    /// Final payoff; `None` until payoffs are assigned
    pub payoff: Option<Currency>,

    /// For traders with a bid on a cleared auction: did that bid win
    pub trader_is_winner: Option<bool>,

    /// For auctioneers whose auction cleared: the winning price
    pub auction_price: Option<Currency>,

    /// For traders: the price they submitted
    pub bid_price: Option<Currency>,
}

impl Player {
    pub fn new(
        participant_id: ParticipantId,
        group_id: GroupId,
        id_in_group: u32,
        role: Role,
        evaluation: Currency,
    ) -> Self {
        Self {
            participant_id,
            group_id,
            id_in_group,
            role,
            evaluation,
            activity: None,
            payoff: None,
            trader_is_winner: None,
            auction_price: None,
            bid_price: None,
        }
    }

    /// Payoff sign derived from the role
    #[inline]
    pub fn direction(&self) -> Direction {
        self.role.direction()
    }

    #[inline]
    pub fn is_auctioneer(&self) -> bool {
        self.activity == Some(Activity::Auctioneer)
    }

    #[inline]
    pub fn is_trader(&self) -> bool {
        self.activity == Some(Activity::Trader)
    }

    #[inline]
    pub fn has_chosen(&self) -> bool {
        self.activity.is_some()
    }

    /// Profit from trading at `price`: `direction * (price - evaluation)`
    pub fn trade_payoff(&self, price: Currency) -> Currency {
        trade_payoff(self.direction(), price, self.evaluation)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
