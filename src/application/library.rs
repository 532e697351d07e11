use crate::adapters::memory::{self, BookCatalog as MemoryBookCatalog, LoanLedger as MemoryLoanLedger};
use crate::domain::value_objects::LoanPeriod;
use crate::ports::{BookCatalog, LoanLedger};

use super::{catalog_service::add_book, errors::Result};

/// セッションの状態（蔵書目録 + 貸出台帳）
///
/// セッション開始時に1つ作り、各操作に `&mut` で渡す。
/// 1操作 = 1回の可変借用なので、複数セッション対応時はここが
/// トランザクション境界になる。
pub struct Library {
    pub catalog: Box<dyn BookCatalog>,
    pub ledger: Box<dyn LoanLedger>,
    pub loan_period: LoanPeriod,
}

impl Library {
    pub fn new(
        catalog: Box<dyn BookCatalog>,
        ledger: Box<dyn LoanLedger>,
        loan_period: LoanPeriod,
    ) -> Self {
        Self {
            catalog,
            ledger,
            loan_period,
        }
    }

    /// 空のインメモリ目録・台帳で作る
    pub fn in_memory(loan_period: LoanPeriod) -> Self {
        Self::new(
            Box::new(MemoryBookCatalog::new()),
            Box::new(MemoryLoanLedger::new()),
            loan_period,
        )
    }

    /// 初期蔵書を登録済みのインメモリ状態で作る
    pub fn seeded(loan_period: LoanPeriod) -> Result<Self> {
        let mut library = Self::in_memory(loan_period);
        for cmd in memory::seed_books() {
            add_book(&mut library, cmd)?;
        }
        Ok(library)
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("books", &self.catalog.len())
            .field("loans", &self.ledger.loans().count())
            .field("loan_period", &self.loan_period)
            .finish()
    }
}
