use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::state::{OracleConfig, Raffle, RoundState};

/// Accounts required to create the singleton raffle account.
/// `init` fails if the PDA already exists, so this runs exactly once.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The account paying for account creation.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The raffle state account holding configuration, round state and the
    /// entry registry.
    #[account(
        init,
        payer = payer,
        space = Raffle::space_for(0),
        seeds = [RAFFLE_SEED],
        bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Stores the immutable configuration and opens the first round.
///
/// # Arguments
/// * `ctx` - Context holding the Initialize accounts
/// * `entry_fee` - Minimum accepted payment per entry, in lamports
/// * `interval` - Seconds between draws
/// * `oracle` - Randomness-network identifiers, fixed for the program's life
pub fn process_initialize(
    ctx: Context<Initialize>,
    entry_fee: u64,
    interval: i64,
    oracle: OracleConfig,
) -> Result<()> {
    let clock = Clock::get()?;
    let raffle = &mut ctx.accounts.raffle;
    raffle.bump = ctx.bumps.raffle;
    raffle.entry_fee = entry_fee;
    raffle.interval = interval;
    raffle.vrf_coordinator = oracle.vrf_coordinator;
    raffle.oracle_authority = oracle.oracle_authority;
    raffle.key_hash = oracle.key_hash;
    raffle.subscription_id = oracle.subscription_id;
    raffle.request_confirmations = oracle.request_confirmations;
    raffle.callback_gas_limit = oracle.callback_gas_limit;
    raffle.round_state = RoundState::Open;
    raffle.last_draw_timestamp = clock.unix_timestamp;
    raffle.pending_request = 0;
    raffle.pot_amount = 0;
    raffle.recent_winner = Pubkey::default();
    raffle.entries = Vec::new();
    Ok(())
}
