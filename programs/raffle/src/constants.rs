/// Seed of the singleton raffle PDA.
pub const RAFFLE_SEED: &[u8] = b"raffle";

/// Random words requested per draw. One word selects one registry slot.
pub const NUM_WORDS: u32 = 1;
