use {
    crate::{
        loaded_programs::ProgramLoader,
        log_collector::LogCollector,
        sysvar_cache::SysvarCache,
    },
    loader_v4_sdk::{
        account::AccountSharedData,
        instruction::InstructionError,
        pubkey::Pubkey,
        transaction_context::{
            InstructionAccount, InstructionContext, TransactionAccount, TransactionContext,
        },
    },
    std::{cell::RefCell, rc::Rc},
};

/// Main pipeline from runtime to program invocation.
pub struct InvokeContext<'a> {
    /// Information about the currently executing transaction.
    pub transaction_context: &'a TransactionContext,
    sysvar_cache: &'a SysvarCache,
    program_loader: &'a dyn ProgramLoader,
    log_collector: Option<Rc<RefCell<LogCollector>>>,
}

impl<'a> InvokeContext<'a> {
    pub fn new(
        transaction_context: &'a TransactionContext,
        sysvar_cache: &'a SysvarCache,
        program_loader: &'a dyn ProgramLoader,
        log_collector: Option<Rc<RefCell<LogCollector>>>,
    ) -> Self {
        Self {
            transaction_context,
            sysvar_cache,
            program_loader,
            log_collector,
        }
    }

    pub fn get_log_collector(&self) -> Option<Rc<RefCell<LogCollector>>> {
        self.log_collector.clone()
    }

    pub fn get_sysvar_cache(&self) -> &SysvarCache {
        self.sysvar_cache
    }

    pub fn program_loader(&self) -> &dyn ProgramLoader {
        self.program_loader
    }
}

/// Processes one instruction against a fresh transaction context and
/// compares the outcome against `expected_result`.
///
/// Returns the accounts in the state the processor left them in, so
/// callers can chain invocations and inspect the results.
#[allow(clippy::too_many_arguments)]
pub fn mock_process_instruction<F>(
    program_id: &Pubkey,
    instruction_data: &[u8],
    transaction_accounts: Vec<TransactionAccount>,
    instruction_accounts: Vec<InstructionAccount>,
    sysvar_cache: &SysvarCache,
    program_loader: &dyn ProgramLoader,
    expected_result: Result<(), InstructionError>,
    process_instruction: F,
) -> Vec<AccountSharedData>
where
    F: FnOnce(&mut InvokeContext) -> Result<(), InstructionError>,
{
    let instruction_context =
        InstructionContext::new(*program_id, &instruction_accounts, instruction_data);
    let transaction_context = TransactionContext::new(transaction_accounts, instruction_context);
    let log_collector = LogCollector::new_ref();
    let mut invoke_context = InvokeContext::new(
        &transaction_context,
        sysvar_cache,
        program_loader,
        Some(log_collector),
    );
    let result = process_instruction(&mut invoke_context);
    assert_eq!(result, expected_result);
    transaction_context.deconstruct_without_keys()
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::loaded_programs::NoopLoader,
        loader_v4_sdk::{clock::Clock, rent::Rent},
    };

    #[test]
    fn test_invoke_context_accessors() {
        let program_id = Pubkey::new_unique();
        let instruction_context = InstructionContext::new(program_id, &[], &[]);
        let transaction_context = TransactionContext::new(Vec::new(), instruction_context);
        let mut sysvar_cache = SysvarCache::default();
        sysvar_cache.set_clock(Clock::default());
        sysvar_cache.set_rent(Rent::default());
        let program_loader = NoopLoader::default();
        let invoke_context = InvokeContext::new(
            &transaction_context,
            &sysvar_cache,
            &program_loader,
            Some(LogCollector::new_ref()),
        );
        assert!(invoke_context.get_sysvar_cache().get_clock().is_ok());
        assert!(invoke_context.get_log_collector().is_some());
        assert!(invoke_context.program_loader().load(&[]).is_ok());
        assert_eq!(
            invoke_context
                .transaction_context
                .get_instruction_context()
                .get_program_id(),
            &program_id,
        );
    }

    #[test]
    fn test_mock_process_instruction_returns_accounts() {
        let program_id = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let transaction_accounts = vec![(
            Pubkey::new_unique(),
            AccountSharedData::new(42, 0, &owner),
        )];
        let accounts = mock_process_instruction(
            &program_id,
            &[],
            transaction_accounts,
            Vec::new(),
            &SysvarCache::default(),
            &NoopLoader::default(),
            Ok(()),
            |_invoke_context| Ok(()),
        );
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].lamports(), 42);
    }
}
