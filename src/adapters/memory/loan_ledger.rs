use crate::domain::loan::Loan;
use crate::ports::loan_ledger::LoanLedger as LoanLedgerTrait;

/// LoanLedgerのインメモリ実装
#[derive(Debug, Default)]
pub struct LoanLedger {
    loans: Vec<Loan>,
}

impl LoanLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoanLedgerTrait for LoanLedger {
    fn append(&mut self, loan: Loan) {
        self.loans.push(loan);
    }

    fn save(&mut self, loan: Loan) -> bool {
        match self.loans.iter_mut().find(|l| l.loan_id == loan.loan_id) {
            Some(existing) => {
                *existing = loan;
                true
            }
            None => false,
        }
    }

    fn loans(&self) -> Box<dyn Iterator<Item = &Loan> + '_> {
        Box::new(self.loans.iter())
    }
}
