use anchor_lang::prelude::*;
use instructions::*;
use state::OracleConfig;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod vrf;

declare_id!("74p8VGnpLY9Yy7f94NJDfrSWxjibZS7jGrU9whua5Ec4");

#[program]
pub mod raffle {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        entry_fee: u64,
        interval: i64,
        oracle: OracleConfig,
    ) -> Result<()> {
        process_initialize(ctx, entry_fee, interval, oracle)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        process_enter_raffle(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<bool> {
        process_check_upkeep(ctx)
    }

    pub fn request_draw(ctx: Context<RequestDraw>) -> Result<()> {
        process_request_draw(ctx)
    }

    pub fn resolve_draw(
        ctx: Context<ResolveDraw>,
        request_id: u64,
        random_words: Vec<u64>,
    ) -> Result<()> {
        process_resolve_draw(ctx, request_id, random_words)
    }
}
