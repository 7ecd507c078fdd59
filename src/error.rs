//! Error types.
//!
//! - [`ConfigError`]: bad session setup; fatal, reported before any player exists
//! - [`MarketError`]: a rejected player action or an out-of-order group step
//! - [`SessionError`]: anything raised while creating or resolving a session

use thiserror::Error;

use crate::types::{AuctionId, AuctionKind, BidId, Currency, GroupId};

/// Invalid session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("number of participants ({participants}) must be a multiple of the group size ({group_size})")]
    ParticipantsNotDivisible { participants: u32, group_size: u32 },

    #[error("number of sellers per group ({num_sellers}) should be less than total number of market participants ({group_size})")]
    TooManySellers { num_sellers: u32, group_size: u32 },

    #[error("a session needs at least one participant")]
    NoParticipants,

    #[error("group size overflows: {num_buyers} buyers + {num_sellers} sellers")]
    GroupSizeOverflow { num_buyers: u32, num_sellers: u32 },

    #[error("evaluation bounds are inverted: lb {lb} > ub {ub}")]
    InvertedBounds { lb: Currency, ub: Currency },

    #[error("points_decimal_places {0} exceeds the supported maximum")]
    TooManyDecimalPlaces(u32),

    #[error("missing session config key `{0}`")]
    MissingKey(String),

    #[error("invalid value for session config key `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("no session config named `{0}`")]
    UnknownSession(String),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// A player action or group step that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    #[error("no player with id_in_group {0} in this group")]
    UnknownPlayer(u32),

    #[error("no auction with id {0} in this group")]
    UnknownAuction(AuctionId),

    #[error("player {0} has already chosen an activity")]
    ActivityAlreadyChosen(u32),

    #[error("player {0} has not chosen an activity yet")]
    ActivityNotChosen(u32),

    #[error("player {0} is an auctioneer and cannot bid")]
    NotATrader(u32),

    #[error("player {0} already runs an auction")]
    AuctionAlreadyOpen(u32),

    #[error("auction {auction} is a {kind:?} auction; player {player} may only bid into {expected:?} auctions")]
    IneligibleAuction {
        player: u32,
        auction: AuctionId,
        kind: AuctionKind,
        expected: AuctionKind,
    },

    #[error("bid {bid} was not placed into auction {auction}")]
    ForeignBid { auction: AuctionId, bid: BidId },

    #[error("player {player} cannot bid into their own auction {auction}")]
    OwnAuction { player: u32, auction: AuctionId },

    #[error("bid price {0} is negative")]
    NegativePrice(Currency),

    #[error("bid price {price} violates the reservation price {evaluation} for a {kind:?} auction")]
    ReservationViolated {
        price: Currency,
        evaluation: Currency,
        kind: AuctionKind,
    },

    #[error("market of group {0} has already been cleared")]
    AlreadyCleared(GroupId),

    #[error("market of group {0} has not been cleared yet")]
    NotCleared(GroupId),
}

/// Failure while creating or resolving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Market(#[from] MarketError),

    #[error("group {group} is still waiting for players {pending:?}")]
    BarrierNotReached { group: GroupId, pending: Vec<u32> },

    #[error("no group with id {0}")]
    UnknownGroup(GroupId),

    #[error("failed to encode round record: {0}")]
    Export(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::ParticipantsNotDivisible {
            participants: 7,
            group_size: 3,
        };
        assert_eq!(
            err.to_string(),
            "number of participants (7) must be a multiple of the group size (3)"
        );

        let err = ConfigError::TooManySellers {
            num_sellers: 3,
            group_size: 3,
        };
        assert!(err.to_string().starts_with("number of sellers per group (3)"));
    }

    #[test]
    fn test_session_error_wraps() {
        let err: SessionError = MarketError::AlreadyCleared(2).into();
        assert_eq!(err.to_string(), "market of group 2 has already been cleared");
    }
}
