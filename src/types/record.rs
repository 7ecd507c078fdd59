//! Round results for export, and a receipt fingerprinting them.
//!
//! A [`RoundRecord`] is the data the experimenter downloads after the
//! session: one [`PlayerOutcome`] per player and one [`AuctionOutcome`] per
//! auction. The [`RoundReceipt`] summarizes it and carries a SHA-256 digest of
//! the JSON export, so two runs of the same seeded session can be checked
//! for identical outcomes without diffing the files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{Activity, AuctionKind, Currency, GroupId, ParticipantId, Player, Role};

/// Per-player export row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerOutcome {
    pub participant_id: ParticipantId,
    pub group_id: GroupId,
    pub id_in_group: u32,
    pub role: Role,
    pub evaluation: Currency,
    pub activity: Option<Activity>,
    pub bid_price: Option<Currency>,
    pub auction_price: Option<Currency>,
    pub trader_is_winner: Option<bool>,
    pub payoff: Option<Currency>,

    /// Real-world money: participation fee plus converted payoff
    pub payment: Option<Decimal>,
}

impl PlayerOutcome {
    /// Snapshot a player; `payment` is computed by the session config
    pub fn from_player(player: &Player, payment: Option<Decimal>) -> Self {
        Self {
            participant_id: player.participant_id,
            group_id: player.group_id,
            id_in_group: player.id_in_group,
            role: player.role,
            evaluation: player.evaluation,
            activity: player.activity,
            bid_price: player.bid_price,
            auction_price: player.auction_price,
            trader_is_winner: player.trader_is_winner,
            payoff: player.payoff,
            payment,
        }
    }
}

/// Per-auction export row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionOutcome {
    pub group_id: GroupId,

    /// `id_in_group` of the auctioneer
    pub auctioneer: u32,
    pub kind: AuctionKind,

    /// Bids carrying a price
    pub bid_count: usize,

    /// `id_in_group` of the winning trader
    pub winner: Option<u32>,
    pub winning_price: Option<Currency>,
}

/// Everything recorded for one round of one session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoundRecord {
    pub session: String,
    pub players: Vec<PlayerOutcome>,
    pub auctions: Vec<AuctionOutcome>,
}

impl RoundRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Auctions that ended with a winning bid
    pub fn cleared_auctions(&self) -> usize {
        self.auctions.iter().filter(|a| a.winner.is_some()).count()
    }
}

/// Summary of a resolved round.
///
/// ## Example
///
/// ```
/// use volauction::types::{RoundReceipt, RoundRecord};
///
/// let record = RoundRecord::default();
/// let receipt = RoundReceipt::from_record(&record, 0).unwrap();
/// assert!(receipt.is_empty());
/// assert_eq!(receipt.digest_hex().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundReceipt {
    /// Number of groups resolved
    pub groups: u64,

    /// Auctions opened across all groups
    pub auctions_opened: u64,

    /// Auctions that found a winner (one trade each)
    pub auctions_cleared: u64,

    /// SHA-256 of the compact JSON export
    pub digest: [u8; 32],
}

impl RoundReceipt {
    pub fn new(groups: u64, auctions_opened: u64, auctions_cleared: u64, digest: [u8; 32]) -> Self {
        Self {
            groups,
            auctions_opened,
            auctions_cleared,
            digest,
        }
    }

    /// Build a receipt by hashing the record's compact JSON encoding
    pub fn from_record(record: &RoundRecord, groups: u64) -> Result<Self, serde_json::Error> {
        let bytes = serde_json::to_vec(record)?;
        Ok(Self::new(
            groups,
            record.auctions.len() as u64,
            record.cleared_auctions() as u64,
            Self::compute_hash(&bytes),
        ))
    }

    /// SHA-256 of `data`
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }

    /// True if no auction was opened
    pub fn is_empty(&self) -> bool {
        self.auctions_opened == 0
    }

    /// Share of opened auctions that cleared; `None` if none were opened
    pub fn clearing_rate(&self) -> Option<f64> {
        if self.auctions_opened == 0 {
            None
        } else {
            Some(self.auctions_cleared as f64 / self.auctions_opened as f64)
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
