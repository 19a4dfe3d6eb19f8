use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::state::Raffle;

/// Accounts required to evaluate draw readiness.
#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    /// The raffle state account, read only.
    #[account(
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,
}

/// Reports whether a draw may start right now.
///
/// Pure read: no account is mutated, so automation can poll this by
/// simulation at any frequency. The same predicate guards `request_draw`
/// internally.
pub fn process_check_upkeep(ctx: Context<CheckUpkeep>) -> Result<bool> {
    let clock = Clock::get()?;
    Ok(ctx.accounts.raffle.draw_ready(clock.unix_timestamp))
}
