//! アプリケーション全体のエラー定義モジュール
//! 盤面の構築やセル指定などの契約違反を統一管理する。
//! 埋まったマスへの着手や終局後の着手はエラーではなく無視として扱う。

use thiserror::Error;

/// ゲームロジックに関連するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Invalid row size: {row_size} (must be between {min} and {max})")]
    InvalidRowSize {
        row_size: usize,
        min: usize,
        max: usize,
    },

    #[error("Cell index out of range: {index} (board has {cell_count} cells)")]
    CellIndexOutOfRange { index: usize, cell_count: usize },
}

/// ゲームエラーをベースとした結果型
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::InvalidRowSize { row_size: 3, min: 4, max: 8 };
        assert_eq!(err.to_string(), "Invalid row size: 3 (must be between 4 and 8)");

        let err = GameError::CellIndexOutOfRange { index: 16, cell_count: 16 };
        assert!(err.to_string().contains("16 cells"));
    }
}
