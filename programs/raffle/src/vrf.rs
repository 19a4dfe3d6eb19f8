// Consumer-side interface to the external VRF coordinator program.
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::{get_return_data, invoke_signed};
use anchor_lang::solana_program::program_error::ProgramError;

use crate::error::RaffleError;

/// Wire format of the coordinator instructions this program issues.
///
/// The coordinator assigns a fresh request id to every accepted request and
/// hands it back through CPI return data; its oracle later submits the random
/// words in a separate transaction signed by the fulfillment authority.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum CoordinatorInstruction {
    RequestRandomWords {
        key_hash: [u8; 32],
        subscription_id: u64,
        request_confirmations: u8,
        callback_gas_limit: u32,
        num_words: u32,
    },
}

/// Accounts the coordinator expects on a request.
pub struct RandomWordsRequest<'a, 'info> {
    /// The coordinator program itself.
    pub coordinator: &'a AccountInfo<'info>,
    /// Coordinator global state (request counter lives here).
    pub coordinator_state: &'a AccountInfo<'info>,
    /// The subscription billed for this request.
    pub subscription: &'a AccountInfo<'info>,
    /// The consumer identity, signed via PDA seeds.
    pub requester: &'a AccountInfo<'info>,
    /// Fee payer for any coordinator-side account creation.
    pub payer: &'a AccountInfo<'info>,
    pub system_program: &'a AccountInfo<'info>,
}

/// Submits one randomness request and returns the coordinator-assigned
/// request id.
pub fn request_random_words(
    accounts: RandomWordsRequest,
    key_hash: [u8; 32],
    subscription_id: u64,
    request_confirmations: u8,
    callback_gas_limit: u32,
    num_words: u32,
    signer_seeds: &[&[&[u8]]],
) -> Result<u64> {
    let mut data = Vec::with_capacity(1 + 32 + 8 + 1 + 4 + 4);
    CoordinatorInstruction::RequestRandomWords {
        key_hash,
        subscription_id,
        request_confirmations,
        callback_gas_limit,
        num_words,
    }
    .serialize(&mut data)
    .map_err(|_| ProgramError::InvalidInstructionData)?;

    let instruction = Instruction {
        program_id: *accounts.coordinator.key,
        accounts: vec![
            AccountMeta::new(*accounts.coordinator_state.key, false),
            AccountMeta::new(*accounts.subscription.key, false),
            AccountMeta::new_readonly(*accounts.requester.key, true),
            AccountMeta::new(*accounts.payer.key, true),
            AccountMeta::new_readonly(*accounts.system_program.key, false),
        ],
        data,
    };

    invoke_signed(
        &instruction,
        &[
            accounts.coordinator_state.clone(),
            accounts.subscription.clone(),
            accounts.requester.clone(),
            accounts.payer.clone(),
            accounts.system_program.clone(),
            accounts.coordinator.clone(),
        ],
        signer_seeds,
    )?;

    read_request_id(accounts.coordinator.key)
}

/// Pulls the request id out of the coordinator's return data.
fn read_request_id(coordinator: &Pubkey) -> Result<u64> {
    let (program_id, data) = get_return_data().ok_or(RaffleError::MissingRequestId)?;
    if program_id != *coordinator || data.len() != 8 {
        return Err(RaffleError::MissingRequestId.into());
    }
    let mut id_bytes = [0u8; 8];
    id_bytes.copy_from_slice(&data);
    Ok(u64::from_le_bytes(id_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_encodes_as_tagged_borsh() {
        let mut data = Vec::new();
        CoordinatorInstruction::RequestRandomWords {
            key_hash: [7; 32],
            subscription_id: 42,
            request_confirmations: 3,
            callback_gas_limit: 200_000,
            num_words: 1,
        }
        .serialize(&mut data)
        .unwrap();

        // enum tag, key hash, subscription, confirmations, gas limit, words
        assert_eq!(data.len(), 1 + 32 + 8 + 1 + 4 + 4);
        assert_eq!(data[0], 0);
        assert_eq!(&data[1..33], &[7; 32]);
        assert_eq!(u64::from_le_bytes(data[33..41].try_into().unwrap()), 42);
        assert_eq!(data[41], 3);
    }

    #[test]
    fn request_roundtrips() {
        let original = CoordinatorInstruction::RequestRandomWords {
            key_hash: [1; 32],
            subscription_id: 7,
            request_confirmations: 1,
            callback_gas_limit: 50_000,
            num_words: 1,
        };
        let mut data = Vec::new();
        original.serialize(&mut data).unwrap();
        let decoded = CoordinatorInstruction::try_from_slice(&data).unwrap();
        assert_eq!(decoded, original);
    }
}
