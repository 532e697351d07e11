use crate::domain::loan::Loan;

/// 貸出台帳ポート
///
/// 追記専用の貸出記録。行の削除はなく、返却時の状態更新のみ許す。
pub trait LoanLedger: Send {
    /// 新しい貸出を末尾に追加する
    fn append(&mut self, loan: Loan);

    /// 既存の行を置き換える
    ///
    /// 同じloan_idの行がなければ `false` を返し、何もしない。
    fn save(&mut self, loan: Loan) -> bool;

    /// 台帳順（貸出の古い順）に全行を返す
    fn loans(&self) -> Box<dyn Iterator<Item = &Loan> + '_>;
}
