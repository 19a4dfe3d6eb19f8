use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::RAFFLE_SEED;
use crate::error::RaffleError;
use crate::state::{Raffle, RoundState};

/// Event emitted when an entry is recorded.
#[event]
pub struct EntryRecorded {
    /// The entering player.
    pub player: Pubkey,
    /// Lamports paid into the pool.
    pub amount: u64,
    /// Registry slot this entry occupies.
    pub slot_index: u64,
}

/// Accounts required to enter the current round.
#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    /// The player entering and paying the fee. Also covers the rent delta for
    /// the registry slot.
    #[account(mut)]
    pub player: Signer<'info>,

    /// The raffle account, grown by one registry slot.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
        realloc = Raffle::space_for(raffle.entries.len() + 1),
        realloc::payer = player,
        realloc::zero = false,
    )]
    pub raffle: Account<'info, Raffle>,

    /// System program for the payment transfer and the realloc.
    pub system_program: Program<'info, System>,
}

/// Records an entry for the caller.
///
/// Steps performed:
/// 1. Check the payment covers the entry fee.
/// 2. Check the round is open.
/// 3. Append the player to the registry and grow the pool.
/// 4. Transfer the payment into the raffle account.
///
/// The registry and pool are updated before the payment crosses the program
/// boundary; a failed transfer unwinds the whole instruction.
///
/// # Arguments
/// * `ctx` - Context containing EnterRaffle accounts
/// * `amount` - Lamports paid; anything at or above the entry fee is accepted
pub fn process_enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    require!(
        amount >= ctx.accounts.raffle.entry_fee,
        RaffleError::InsufficientPayment
    );
    require!(
        ctx.accounts.raffle.round_state == RoundState::Open,
        RaffleError::RoundNotOpen
    );

    let player = ctx.accounts.player.key();
    let slot_index = ctx.accounts.raffle.entry_count();
    ctx.accounts.raffle.entries.push(player);
    ctx.accounts.raffle.pot_amount = ctx
        .accounts
        .raffle
        .pot_amount
        .checked_add(amount)
        .ok_or(RaffleError::Overflow)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.raffle.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(EntryRecorded {
        player,
        amount,
        slot_index,
    });

    Ok(())
}
