use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::error::RaffleError;
use crate::state::{Raffle, RoundState};

/// Event emitted when a round has been resolved and paid.
#[event]
pub struct WinnerPicked {
    /// The selected entrant.
    pub winner: Pubkey,
    /// Lamports paid out; the full pool of the round.
    pub prize: u64,
    /// The fulfilled randomness request.
    pub request_id: u64,
}

/// Accounts required to resolve a draw. Only the oracle fulfillment
/// authority configured at initialization may invoke this.
#[derive(Accounts)]
pub struct ResolveDraw<'info> {
    /// The oracle endpoint delivering the random words.
    #[account(
        constraint = oracle.key() == raffle.oracle_authority @ RaffleError::CallerNotAuthorized,
    )]
    pub oracle: Signer<'info>,

    /// The raffle state account.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    /// The prize recipient.
    /// CHECK: compared against the drawn registry slot in the handler.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

/// Consumes the oracle's randomness, selects the winner, resets the round and
/// pays the pool.
///
/// Every piece of round state is settled before the prize moves: recent
/// winner, gate back to open, registry cleared, timestamp and pool zeroed.
/// The lamport move comes last, so any failure aborts the instruction and the
/// runtime discards the full resolution. It either completes or never
/// happened.
///
/// # Arguments
/// * `ctx` - Context containing ResolveDraw accounts
/// * `request_id` - Must match the outstanding request
/// * `random_words` - Oracle output; only the first word is used
pub fn process_resolve_draw(
    ctx: Context<ResolveDraw>,
    request_id: u64,
    random_words: Vec<u64>,
) -> Result<()> {
    let clock = Clock::get()?;

    require!(
        ctx.accounts.raffle.round_state == RoundState::Calculating,
        RaffleError::UnknownRequest
    );
    require!(
        request_id == ctx.accounts.raffle.pending_request,
        RaffleError::UnknownRequest
    );
    require!(!random_words.is_empty(), RaffleError::InvariantViolation);

    // unreachable while the draw invariants hold; a cleared registry here
    // would otherwise divide by zero
    let winner = ctx
        .accounts
        .raffle
        .select_winner(random_words[0])
        .ok_or(RaffleError::InvariantViolation)?;
    require!(
        winner == ctx.accounts.winner.key(),
        RaffleError::WinnerAccountMismatch
    );

    let prize = ctx.accounts.raffle.pot_amount;

    ctx.accounts.raffle.recent_winner = winner;
    ctx.accounts.raffle.round_state = RoundState::Open;
    ctx.accounts.raffle.entries.clear();
    ctx.accounts.raffle.last_draw_timestamp = clock.unix_timestamp;
    ctx.accounts.raffle.pending_request = 0;
    ctx.accounts.raffle.pot_amount = 0;

    let raffle_info = ctx.accounts.raffle.to_account_info();
    let winner_info = ctx.accounts.winner.to_account_info();

    let drained = raffle_info
        .lamports()
        .checked_sub(prize)
        .ok_or(RaffleError::PayoutTransferFailed)?;
    let credited = winner_info
        .lamports()
        .checked_add(prize)
        .ok_or(RaffleError::PayoutTransferFailed)?;
    **raffle_info.try_borrow_mut_lamports()? = drained;
    **winner_info.try_borrow_mut_lamports()? = credited;

    emit!(WinnerPicked {
        winner,
        prize,
        request_id,
    });

    Ok(())
}
