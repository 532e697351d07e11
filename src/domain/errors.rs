/// 在庫数の増減エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyAccountingError {
    /// 在庫0から減らそうとした
    Exhausted,
    /// 全冊が書架にあるのに増やそうとした
    AllCopiesOnShelf,
}

/// 書籍登録のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterBookError {
    /// 必須項目が空
    BlankField(&'static str),
    /// 冊数が0
    NoCopies,
    /// 在庫数が冊数を超えている
    AvailableExceedsTotal { available: u32, total: u32 },
}

/// 貸出のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowBookError {
    /// 必須項目が空
    BlankField(&'static str),
    /// 返却期限が貸出日より前
    DueBeforeBorrow,
    /// 既定の返却期限が日付の範囲外
    DueDateOutOfRange,
    /// 貸出可能な在庫がない
    Unavailable,
    /// 在庫数の更新に失敗
    Copy(CopyAccountingError),
}

impl From<CopyAccountingError> for BorrowBookError {
    fn from(err: CopyAccountingError) -> Self {
        BorrowBookError::Copy(err)
    }
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnLoanError {
    /// 既に返却済み
    AlreadyReturned,
    /// 在庫数の更新に失敗
    Copy(CopyAccountingError),
}

impl From<CopyAccountingError> for ReturnLoanError {
    fn from(err: CopyAccountingError) -> Self {
        ReturnLoanError::Copy(err)
    }
}
