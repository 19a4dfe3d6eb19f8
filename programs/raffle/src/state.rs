use anchor_lang::prelude::*;

// Space calculation:
// 8 (discriminator) +
// 1 (bump) +
// 8 (entry_fee) +
// 8 (interval) +
// 32 (vrf_coordinator) +
// 32 (oracle_authority) +
// 32 (key_hash) +
// 8 (subscription_id) +
// 1 (request_confirmations) +
// 4 (callback_gas_limit) +
// 1 (round_state) +
// 8 (last_draw_timestamp) +
// 8 (pending_request) +
// 8 (pot_amount) +
// 32 (recent_winner) +
// 4 (length of entries) =
// 195 bytes before the first entry
pub const RAFFLE_BASE_SIZE: usize = 8 + 1 + 8 + 8 + 32 + 32 + 32 + 8 + 1 + 4 + 1 + 8 + 8 + 8 + 32 + 4;

/// Gate controlling entry acceptance and draw starts.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    /// Entries are accepted; a draw may be requested once the round is ready.
    Open = 0,
    /// A randomness request is in flight; entries and further draws are
    /// rejected until the oracle resolves it.
    Calculating = 1,
}

/// Immutable identifiers of the randomness network, fixed at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct OracleConfig {
    /// The VRF coordinator program that accepts randomness requests.
    pub vrf_coordinator: Pubkey,

    /// The fulfillment endpoint whose signature authorizes `resolve_draw`.
    pub oracle_authority: Pubkey,

    /// Selector of the oracle keypair the coordinator should respond with.
    pub key_hash: [u8; 32],

    /// Funded coordinator subscription billed for each request.
    pub subscription_id: u64,

    /// Slots the oracle waits before responding.
    pub request_confirmations: u8,

    /// Compute budget the coordinator grants the fulfillment callback.
    pub callback_gas_limit: u32,
}

/// The singleton raffle account.
///
/// Configuration fields are written once by `initialize` and never mutated;
/// round fields cycle on every entry and resolution for the lifetime of the
/// program.
#[account]
pub struct Raffle {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Minimum accepted payment per entry, in lamports.
    pub entry_fee: u64,

    /// Seconds that must elapse since the last draw before the next one.
    pub interval: i64,

    /// The VRF coordinator program requests are sent to.
    pub vrf_coordinator: Pubkey,

    /// The only key allowed to sign `resolve_draw`.
    pub oracle_authority: Pubkey,

    /// Oracle key selector forwarded with every request.
    pub key_hash: [u8; 32],

    /// Coordinator subscription paying for requests.
    pub subscription_id: u64,

    /// Slots the oracle waits before responding.
    pub request_confirmations: u8,

    /// Compute budget granted to the fulfillment callback.
    pub callback_gas_limit: u32,

    /// Whether the round accepts entries or waits on the oracle.
    pub round_state: RoundState,

    /// UNIX timestamp of the last resolution (or of initialization).
    pub last_draw_timestamp: i64,

    /// Request id of the in-flight draw; meaningful only while calculating.
    pub pending_request: u64,

    /// Lamports collected this round, held on this account on top of rent.
    pub pot_amount: u64,

    /// Winner of the most recently resolved round, retained for query.
    /// `Pubkey::default()` until the first resolution.
    pub recent_winner: Pubkey,

    /// Ordered entry registry for the current round. Duplicates are allowed:
    /// each repeat entry occupies its own slot and raises that player's win
    /// probability accordingly.
    pub entries: Vec<Pubkey>,
}

impl Raffle {
    /// Account size holding `entry_count` registry slots.
    pub fn space_for(entry_count: usize) -> usize {
        RAFFLE_BASE_SIZE + entry_count * 32
    }

    /// Readiness predicate for starting a draw. Pure; callable any number of
    /// times with no side effects. Used as the `request_draw` guard and
    /// exposed to off-chain pollers through `check_upkeep`.
    pub fn draw_ready(&self, now: i64) -> bool {
        self.round_state == RoundState::Open
            && now.saturating_sub(self.last_draw_timestamp) >= self.interval
            && self.pot_amount > 0
            && !self.entries.is_empty()
    }

    /// Maps a random word onto the registry. Selection is uniform over slots,
    /// not unique players. Returns `None` on an empty registry.
    pub fn select_winner(&self, word: u64) -> Option<Pubkey> {
        if self.entries.is_empty() {
            return None;
        }
        let index = (word % self.entries.len() as u64) as usize;
        Some(self.entries[index])
    }

    pub fn entry_count(&self) -> u64 {
        self.entries.len() as u64
    }

    pub fn entry_at(&self, index: u64) -> Option<Pubkey> {
        self.entries.get(index as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raffle_with(entries: Vec<Pubkey>, pot: u64, state: RoundState) -> Raffle {
        Raffle {
            bump: 255,
            entry_fee: 100,
            interval: 30,
            vrf_coordinator: Pubkey::new_unique(),
            oracle_authority: Pubkey::new_unique(),
            key_hash: [0; 32],
            subscription_id: 1,
            request_confirmations: 3,
            callback_gas_limit: 200_000,
            round_state: state,
            last_draw_timestamp: 1_000,
            pending_request: 0,
            pot_amount: pot,
            recent_winner: Pubkey::default(),
            entries,
        }
    }

    #[test]
    fn draw_ready_requires_all_four_conditions() {
        let player = Pubkey::new_unique();
        let ready = raffle_with(vec![player], 100, RoundState::Open);
        assert!(ready.draw_ready(1_030));

        // interval not elapsed
        assert!(!ready.draw_ready(1_029));

        // empty registry
        let empty = raffle_with(vec![], 100, RoundState::Open);
        assert!(!empty.draw_ready(1_030));

        // zero pot
        let unfunded = raffle_with(vec![player], 0, RoundState::Open);
        assert!(!unfunded.draw_ready(1_030));

        // draw already in flight
        let calculating = raffle_with(vec![player], 100, RoundState::Calculating);
        assert!(!calculating.draw_ready(1_030));
    }

    #[test]
    fn draw_ready_is_idempotent() {
        let raffle = raffle_with(vec![Pubkey::new_unique()], 100, RoundState::Open);
        for _ in 0..3 {
            assert!(raffle.draw_ready(1_031));
        }
    }

    #[test]
    fn select_winner_maps_word_modulo_registry_length() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let c = Pubkey::new_unique();
        let raffle = raffle_with(vec![a, b, c], 300, RoundState::Calculating);

        assert_eq!(raffle.select_winner(0), Some(a));
        assert_eq!(raffle.select_winner(4), Some(b));
        assert_eq!(raffle.select_winner(5), Some(c));
    }

    #[test]
    fn sole_entrant_always_wins() {
        let a = Pubkey::new_unique();
        let raffle = raffle_with(vec![a], 100, RoundState::Calculating);
        for word in [0u64, 1, 7, u64::MAX] {
            assert_eq!(raffle.select_winner(word), Some(a));
        }
    }

    #[test]
    fn duplicate_entries_occupy_distinct_slots() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        // a holds two of three slots and wins on two of three indices
        let raffle = raffle_with(vec![a, b, a], 300, RoundState::Calculating);
        let wins = (0..3)
            .filter(|&word| raffle.select_winner(word) == Some(a))
            .count();
        assert_eq!(wins, 2);
    }

    #[test]
    fn select_winner_on_empty_registry_is_none() {
        let raffle = raffle_with(vec![], 0, RoundState::Open);
        assert_eq!(raffle.select_winner(42), None);
    }

    #[test]
    fn entry_accessors() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let raffle = raffle_with(vec![a, b], 200, RoundState::Open);

        assert_eq!(raffle.entry_count(), 2);
        assert_eq!(raffle.entry_at(0), Some(a));
        assert_eq!(raffle.entry_at(1), Some(b));
        assert_eq!(raffle.entry_at(2), None);
    }

    #[test]
    fn space_grows_by_one_pubkey_per_entry() {
        assert_eq!(Raffle::space_for(0), RAFFLE_BASE_SIZE);
        assert_eq!(Raffle::space_for(3), RAFFLE_BASE_SIZE + 96);
    }
}
