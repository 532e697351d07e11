use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 識別子の検証エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdError {
    /// 空文字または空白のみ
    Blank,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::Blank => f.write_str("identifier must not be blank"),
        }
    }
}

fn non_blank(value: String) -> Result<String, IdError> {
    if value.trim().is_empty() {
        return Err(IdError::Blank);
    }
    Ok(value)
}

/// 書籍ID - 登録時に呼び出し側が採番する（例: "B001"）
///
/// 作成後は不変。空白のみのIDは作成できない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookId(String);

impl BookId {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        non_blank(value.into()).map(Self)
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BookId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BookId> for String {
    fn from(id: BookId) -> Self {
        id.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 利用者ID - 自由入力（例: "STU001"）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BorrowerId(String);

impl BorrowerId {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        non_blank(value.into()).map(Self)
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BorrowerId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BorrowerId> for String {
    fn from(id: BorrowerId) -> Self {
        id.0
    }
}

impl fmt::Display for BorrowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 貸出ID - 台帳の行を応答で参照するためだけに使う
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanId(Uuid);

impl LoanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for LoanId {
    fn default() -> Self {
        Self::new()
    }
}

/// 書籍の在庫状態
///
/// 不変条件：`available_copies > 0` のときに限り `Available`。
/// 保存はされるが、常に在庫数から導出し直す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookStatus {
    Available,
    OutOfStock,
}

impl BookStatus {
    /// 在庫数から状態を導出する
    pub fn derive(available_copies: u32) -> Self {
        if available_copies > 0 {
            BookStatus::Available
        } else {
            BookStatus::OutOfStock
        }
    }

    /// 画面・CSV用の表示名
    pub fn label(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::OutOfStock => "Out of Stock",
        }
    }
}

/// 貸出ステータス
///
/// 遷移は `Borrowed → Returned` の一方向のみ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// 貸出中
    Borrowed,
    /// 返却済み
    Returned,
}

impl LoanStatus {
    pub fn is_borrowed(&self) -> bool {
        matches!(self, LoanStatus::Borrowed)
    }

    pub fn is_returned(&self) -> bool {
        matches!(self, LoanStatus::Returned)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Borrowed => "borrowed",
            LoanStatus::Returned => "returned",
        }
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "borrowed" => Ok(LoanStatus::Borrowed),
            "returned" => Ok(LoanStatus::Returned),
            _ => Err(format!("Invalid loan status: {}", s)),
        }
    }
}

/// 検索対象の項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchField {
    Title,
    Author,
    Category,
    Id,
}

impl std::str::FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "category" => Ok(SearchField::Category),
            "id" | "book_id" | "book id" => Ok(SearchField::Id),
            _ => Err(format!("Invalid search field: {}", s)),
        }
    }
}

/// 既定の貸出期間（日数）
pub const DEFAULT_LOAN_PERIOD_DAYS: u32 = 14;

/// 設定可能な貸出期間の上限（日数）
pub const MAX_LOAN_PERIOD_DAYS: u32 = 365;

/// 貸出期間エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanPeriodError {
    /// 0日は不可
    Zero,
    /// 上限を超えた
    TooLong,
}

impl fmt::Display for LoanPeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanPeriodError::Zero => f.write_str("loan period must be at least one day"),
            LoanPeriodError::TooLong => write!(
                f,
                "loan period must not exceed {} days",
                MAX_LOAN_PERIOD_DAYS
            ),
        }
    }
}

/// 貸出期間
///
/// 不変条件：1日以上、上限以下。
/// 返却期限が省略された場合に `貸出日 + 期間` を期限とする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPeriod(u32);

impl LoanPeriod {
    pub fn days(&self) -> u32 {
        self.0
    }

    /// 貸出日から既定の返却期限を求める
    ///
    /// 期限が暦の範囲を超える場合は `None`。
    pub fn due_date_from(&self, borrow_date: NaiveDate) -> Option<NaiveDate> {
        borrow_date.checked_add_days(Days::new(u64::from(self.0)))
    }
}

impl Default for LoanPeriod {
    fn default() -> Self {
        Self(DEFAULT_LOAN_PERIOD_DAYS)
    }
}

impl TryFrom<u32> for LoanPeriod {
    type Error = LoanPeriodError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(LoanPeriodError::Zero);
        }
        if value > MAX_LOAN_PERIOD_DAYS {
            return Err(LoanPeriodError::TooLong);
        }
        Ok(Self(value))
    }
}
