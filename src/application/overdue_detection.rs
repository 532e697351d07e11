use chrono::NaiveDate;

use crate::domain::{self, loan::Loan};

use super::library::Library;
use super::loan_service::list_active_loans;

/// 延滞している貸出を台帳順に返す
///
/// ビジネスルール：
/// - 貸出中で、返却期限が基準日より厳密に前のものを延滞とする
/// - 返却期限当日は延滞ではない
/// - 返却済みは対象外
///
/// 基準日の既定値（当日）は呼び出し側が決める。
pub fn list_overdue_loans(library: &Library, as_of: NaiveDate) -> impl Iterator<Item = &Loan> + '_ {
    list_active_loans(library).filter(move |loan| domain::loan::is_overdue(loan, as_of))
}
