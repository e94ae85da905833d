//! Accounts loaded for one instruction and the borrow discipline around
//! them.

use {
    crate::{account::AccountSharedData, instruction::InstructionError, pubkey::Pubkey},
    std::cell::{RefCell, RefMut},
};

pub type TransactionAccount = (Pubkey, AccountSharedData);

/// Index of an account inside of the TransactionContext or an
/// InstructionContext.
pub type IndexOfAccount = u16;

/// Contains account meta data which varies between instructions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstructionAccount {
    /// Points to the account in the `TransactionContext`.
    pub index_in_transaction: IndexOfAccount,
    /// Is this account supposed to sign?
    pub is_signer: bool,
    /// Is this account allowed to become writable?
    pub is_writable: bool,
}

/// Loaded transaction shared between runtime and programs.
///
/// This context is valid for the entire duration of a transaction being
/// processed.
#[derive(Debug)]
pub struct TransactionContext {
    account_keys: Vec<Pubkey>,
    accounts: Vec<RefCell<AccountSharedData>>,
    instruction_context: InstructionContext,
}

impl TransactionContext {
    pub fn new(
        transaction_accounts: Vec<TransactionAccount>,
        instruction_context: InstructionContext,
    ) -> Self {
        let (account_keys, accounts): (Vec<Pubkey>, Vec<RefCell<AccountSharedData>>) =
            transaction_accounts
                .into_iter()
                .map(|(key, account)| (key, RefCell::new(account)))
                .unzip();
        Self {
            account_keys,
            accounts,
            instruction_context,
        }
    }

    /// Used by the runtime to write back the processed accounts.
    pub fn deconstruct_without_keys(self) -> Vec<AccountSharedData> {
        self.accounts
            .into_iter()
            .map(|account| account.into_inner())
            .collect()
    }

    /// Returns the total number of accounts loaded in this transaction.
    pub fn get_number_of_accounts(&self) -> IndexOfAccount {
        self.accounts.len() as IndexOfAccount
    }

    /// Searches for an account by its index.
    pub fn get_key_of_account_at_index(
        &self,
        index_in_transaction: IndexOfAccount,
    ) -> Result<&Pubkey, InstructionError> {
        self.account_keys
            .get(index_in_transaction as usize)
            .ok_or(InstructionError::NotEnoughAccountKeys)
    }

    /// Searches for an account by its index.
    pub fn get_account_at_index(
        &self,
        index_in_transaction: IndexOfAccount,
    ) -> Result<&RefCell<AccountSharedData>, InstructionError> {
        self.accounts
            .get(index_in_transaction as usize)
            .ok_or(InstructionError::NotEnoughAccountKeys)
    }

    /// Returns the InstructionContext of the instruction being processed.
    pub fn get_instruction_context(&self) -> &InstructionContext {
        &self.instruction_context
    }
}

/// Loaded instruction shared between runtime and program.
///
/// This context is valid for the entire duration of an instruction being
/// processed.
#[derive(Debug, Clone, Default)]
pub struct InstructionContext {
    program_id: Pubkey,
    instruction_accounts: Vec<InstructionAccount>,
    instruction_data: Vec<u8>,
}

impl InstructionContext {
    pub fn new(
        program_id: Pubkey,
        instruction_accounts: &[InstructionAccount],
        instruction_data: &[u8],
    ) -> Self {
        Self {
            program_id,
            instruction_accounts: instruction_accounts.to_vec(),
            instruction_data: instruction_data.to_vec(),
        }
    }

    /// The program id which processes this instruction.
    pub fn get_program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Data parameter for the program's `process_instruction` handler.
    pub fn get_instruction_data(&self) -> &[u8] {
        &self.instruction_data
    }

    /// Number of accounts in this instruction.
    pub fn get_number_of_instruction_accounts(&self) -> IndexOfAccount {
        self.instruction_accounts.len() as IndexOfAccount
    }

    /// Translates the given instruction wide index into a transaction wide
    /// index.
    pub fn get_index_of_instruction_account_in_transaction(
        &self,
        index_in_instruction: IndexOfAccount,
    ) -> Result<IndexOfAccount, InstructionError> {
        Ok(self
            .instruction_accounts
            .get(index_in_instruction as usize)
            .ok_or(InstructionError::NotEnoughAccountKeys)?
            .index_in_transaction)
    }

    /// Returns whether an instruction account is a signer.
    pub fn is_instruction_account_signer(
        &self,
        index_in_instruction: IndexOfAccount,
    ) -> Result<bool, InstructionError> {
        Ok(self
            .instruction_accounts
            .get(index_in_instruction as usize)
            .ok_or(InstructionError::NotEnoughAccountKeys)?
            .is_signer)
    }

    /// Returns whether an instruction account is writable.
    pub fn is_instruction_account_writable(
        &self,
        index_in_instruction: IndexOfAccount,
    ) -> Result<bool, InstructionError> {
        Ok(self
            .instruction_accounts
            .get(index_in_instruction as usize)
            .ok_or(InstructionError::NotEnoughAccountKeys)?
            .is_writable)
    }

    /// Gets an instruction account of this instruction.
    ///
    /// This is the only way to obtain access to an account's contents; the
    /// returned guard is exclusive for as long as it lives.
    pub fn try_borrow_instruction_account<'a>(
        &'a self,
        transaction_context: &'a TransactionContext,
        index_in_instruction: IndexOfAccount,
    ) -> Result<BorrowedAccount<'a>, InstructionError> {
        let instruction_account = self
            .instruction_accounts
            .get(index_in_instruction as usize)
            .ok_or(InstructionError::NotEnoughAccountKeys)?;
        let index_in_transaction = instruction_account.index_in_transaction;
        if index_in_transaction >= transaction_context.get_number_of_accounts() {
            return Err(InstructionError::MissingAccount);
        }
        let account = transaction_context.accounts[index_in_transaction as usize]
            .try_borrow_mut()
            .map_err(|_| InstructionError::AccountBorrowFailed)?;
        Ok(BorrowedAccount {
            account,
            key: &transaction_context.account_keys[index_in_transaction as usize],
            is_signer: instruction_account.is_signer,
            is_writable: instruction_account.is_writable,
        })
    }
}

/// Shared account borrowed from the TransactionContext and an
/// InstructionContext.
///
/// This is the capability to read and mutate one account: non-copyable,
/// single-owner, released when dropped. A second outstanding borrow of the
/// same account fails with `AccountBorrowFailed`.
#[derive(Debug)]
pub struct BorrowedAccount<'a> {
    account: RefMut<'a, AccountSharedData>,
    key: &'a Pubkey,
    is_signer: bool,
    is_writable: bool,
}

impl BorrowedAccount<'_> {
    /// Returns the public key of this account (transaction wide).
    pub fn get_key(&self) -> &Pubkey {
        self.key
    }

    /// Returns the owner of this account (transaction wide).
    pub fn get_owner(&self) -> &Pubkey {
        self.account.owner()
    }

    /// Returns the number of lamports of this account (transaction wide).
    pub fn get_lamports(&self) -> u64 {
        self.account.lamports()
    }

    /// Adds lamports to this account (transaction wide).
    pub fn checked_add_lamports(&mut self, lamports: u64) -> Result<(), InstructionError> {
        let lamports = self
            .get_lamports()
            .checked_add(lamports)
            .ok_or(InstructionError::ArithmeticOverflow)?;
        self.account.set_lamports(lamports);
        Ok(())
    }

    /// Subtracts lamports from this account (transaction wide).
    pub fn checked_sub_lamports(&mut self, lamports: u64) -> Result<(), InstructionError> {
        let lamports = self
            .get_lamports()
            .checked_sub(lamports)
            .ok_or(InstructionError::ArithmeticOverflow)?;
        self.account.set_lamports(lamports);
        Ok(())
    }

    /// Returns a read-only slice of the account data (transaction wide).
    pub fn get_data(&self) -> &[u8] {
        self.account.data()
    }

    /// Returns a writable slice of the account data (transaction wide).
    pub fn get_data_mut(&mut self) -> &mut [u8] {
        self.account.data_as_mut_slice()
    }

    /// Overwrites the account data and size (transaction wide).
    pub fn set_data_from_slice(&mut self, data: &[u8]) {
        self.account.set_data_from_slice(data);
    }

    /// Resizes the account data (transaction wide), zero-filling any
    /// extension.
    pub fn set_data_length(&mut self, new_length: usize) {
        self.account.resize(new_length);
    }

    /// Returns whether this account is a signer (instruction wide).
    pub fn is_signer(&self) -> bool {
        self.is_signer
    }

    /// Returns whether this account is writable (instruction wide).
    pub fn is_writable(&self) -> bool {
        self.is_writable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_two_accounts() -> TransactionContext {
        let accounts = vec![
            (Pubkey::new_unique(), AccountSharedData::new(100, 8, &Pubkey::new_unique())),
            (Pubkey::new_unique(), AccountSharedData::new(0, 0, &Pubkey::new_unique())),
        ];
        let instruction_accounts = vec![
            InstructionAccount {
                index_in_transaction: 0,
                is_signer: false,
                is_writable: true,
            },
            InstructionAccount {
                index_in_transaction: 1,
                is_signer: true,
                is_writable: false,
            },
        ];
        TransactionContext::new(
            accounts,
            InstructionContext::new(Pubkey::new_unique(), &instruction_accounts, &[]),
        )
    }

    #[test]
    fn test_borrow_is_exclusive() {
        let transaction_context = context_with_two_accounts();
        let instruction_context = transaction_context.get_instruction_context();
        let first = instruction_context
            .try_borrow_instruction_account(&transaction_context, 0)
            .unwrap();
        assert_eq!(
            instruction_context
                .try_borrow_instruction_account(&transaction_context, 0)
                .err(),
            Some(InstructionError::AccountBorrowFailed),
        );
        // A different account can be borrowed concurrently
        assert!(instruction_context
            .try_borrow_instruction_account(&transaction_context, 1)
            .is_ok());
        drop(first);
        assert!(instruction_context
            .try_borrow_instruction_account(&transaction_context, 0)
            .is_ok());
    }

    #[test]
    fn test_out_of_range_index() {
        let transaction_context = context_with_two_accounts();
        let instruction_context = transaction_context.get_instruction_context();
        assert_eq!(
            instruction_context
                .try_borrow_instruction_account(&transaction_context, 2)
                .err(),
            Some(InstructionError::NotEnoughAccountKeys),
        );
        assert_eq!(
            instruction_context.get_index_of_instruction_account_in_transaction(2),
            Err(InstructionError::NotEnoughAccountKeys),
        );
    }

    #[test]
    fn test_privilege_flags() {
        let transaction_context = context_with_two_accounts();
        let instruction_context = transaction_context.get_instruction_context();
        let program = instruction_context
            .try_borrow_instruction_account(&transaction_context, 0)
            .unwrap();
        assert!(!program.is_signer());
        assert!(program.is_writable());
        assert_eq!(instruction_context.is_instruction_account_signer(1), Ok(true));
        assert_eq!(instruction_context.is_instruction_account_writable(1), Ok(false));
    }

    #[test]
    fn test_lamport_arithmetic() {
        let transaction_context = context_with_two_accounts();
        let instruction_context = transaction_context.get_instruction_context();
        let mut account = instruction_context
            .try_borrow_instruction_account(&transaction_context, 0)
            .unwrap();
        assert_eq!(
            account.checked_sub_lamports(101),
            Err(InstructionError::ArithmeticOverflow),
        );
        account.checked_sub_lamports(100).unwrap();
        assert_eq!(
            account.checked_add_lamports(u64::MAX),
            Ok(()),
        );
        assert_eq!(
            account.checked_add_lamports(1),
            Err(InstructionError::ArithmeticOverflow),
        );
    }
}
