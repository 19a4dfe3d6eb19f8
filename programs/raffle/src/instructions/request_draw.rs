use anchor_lang::prelude::*;

use crate::constants::{NUM_WORDS, RAFFLE_SEED};
use crate::error::RaffleError;
use crate::state::{Raffle, RoundState};
use crate::vrf;

/// Event emitted when a randomness request has been accepted by the
/// coordinator.
#[event]
pub struct DrawRequested {
    /// Coordinator-assigned id correlating the eventual fulfillment.
    pub request_id: u64,
}

/// Accounts required to start a draw. The crank is permissionless: automation
/// polls `check_upkeep` and sends this, and anyone may do the same by hand.
#[derive(Accounts)]
pub struct RequestDraw<'info> {
    /// Pays coordinator-side fees for the request.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The raffle state account.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    /// The coordinator configured at initialization.
    /// CHECK: address is pinned to the stored configuration.
    #[account(address = raffle.vrf_coordinator)]
    pub vrf_coordinator: UncheckedAccount<'info>,

    /// Coordinator global state.
    /// CHECK: owned and validated by the coordinator program.
    #[account(mut)]
    pub coordinator_state: UncheckedAccount<'info>,

    /// The funded subscription billed for this request.
    /// CHECK: owned and validated by the coordinator program.
    #[account(mut)]
    pub subscription: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Starts a draw: closes the entry gate, then asks the coordinator for one
/// random word.
///
/// The state transition happens before the external call, so a second request
/// fails `DrawNotReady` until the oracle resolves the first. At most one
/// request is ever outstanding without any explicit lock.
pub fn process_request_draw(ctx: Context<RequestDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let raffle = &ctx.accounts.raffle;

    if !raffle.draw_ready(clock.unix_timestamp) {
        msg!("pot: {}", raffle.pot_amount);
        msg!("entries: {}", raffle.entries.len());
        msg!("state: {:?}", raffle.round_state);
        return Err(RaffleError::DrawNotReady.into());
    }

    ctx.accounts.raffle.round_state = RoundState::Calculating;

    let key_hash = ctx.accounts.raffle.key_hash;
    let subscription_id = ctx.accounts.raffle.subscription_id;
    let request_confirmations = ctx.accounts.raffle.request_confirmations;
    let callback_gas_limit = ctx.accounts.raffle.callback_gas_limit;
    let bump = ctx.accounts.raffle.bump;

    let coordinator_info = ctx.accounts.vrf_coordinator.to_account_info();
    let coordinator_state_info = ctx.accounts.coordinator_state.to_account_info();
    let subscription_info = ctx.accounts.subscription.to_account_info();
    let raffle_info = ctx.accounts.raffle.to_account_info();
    let payer_info = ctx.accounts.payer.to_account_info();
    let system_program_info = ctx.accounts.system_program.to_account_info();

    let signer_seeds: &[&[&[u8]]] = &[&[RAFFLE_SEED, &[bump]]];
    let request_id = vrf::request_random_words(
        vrf::RandomWordsRequest {
            coordinator: &coordinator_info,
            coordinator_state: &coordinator_state_info,
            subscription: &subscription_info,
            requester: &raffle_info,
            payer: &payer_info,
            system_program: &system_program_info,
        },
        key_hash,
        subscription_id,
        request_confirmations,
        callback_gas_limit,
        NUM_WORDS,
        signer_seeds,
    )?;

    ctx.accounts.raffle.pending_request = request_id;

    emit!(DrawRequested { request_id });

    Ok(())
}
