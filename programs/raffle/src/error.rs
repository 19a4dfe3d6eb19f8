use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    #[msg("Payment is below the entry fee")]
    InsufficientPayment,
    #[msg("Round is not open for entries")]
    RoundNotOpen,
    #[msg("Draw preconditions are not met")]
    DrawNotReady,
    #[msg("Caller is not the configured randomness oracle")]
    CallerNotAuthorized,
    #[msg("Request id does not match the outstanding draw")]
    UnknownRequest,
    #[msg("Winner account does not match the drawn entry")]
    WinnerAccountMismatch,
    #[msg("Prize transfer to the winner failed")]
    PayoutTransferFailed,
    #[msg("Coordinator returned no request id")]
    MissingRequestId,
    Overflow,
    #[msg("Round state violates a draw invariant")]
    InvariantViolation,
}
