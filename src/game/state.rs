//! ゲーム状態管理モジュール
//! 手番、進行状態、手数、直前の着手位置などを管理する。

use super::types::{Player, Position};
use super::win_condition::WinConditionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ゲームの進行状態を表すenum
/// Won・Drawnは新しいゲームを開始するまで変化しない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// ゲーム進行中
    InProgress,
    /// 勝敗決定（勝者と成立した勝利条件の種類を記録）
    Won {
        winner: Player,
        kind: WinConditionType,
    },
    /// 全マスが埋まり勝者なし
    Drawn,
}

/// 1ゲーム分の進行状態を保持する構造体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub id: Uuid,
    pub row_size: usize,
    pub current_player: Player,
    pub status: GameStatus,
    pub move_count: usize,
    pub last_move: Option<Position>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl GameState {
    /// 新しいゲーム状態を作成する
    /// 初期状態：Xの番でゲーム開始
    pub fn new(row_size: usize) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            row_size,
            current_player: Player::X,
            status: GameStatus::InProgress,
            move_count: 0,
            last_move: None,
            created_at: now,
            last_updated: now,
        }
    }

    /// 盤面の総マス数
    pub fn board_size(&self) -> usize {
        self.row_size * self.row_size
    }

    /// ゲームが終了しているかチェックする
    pub fn is_game_over(&self) -> bool {
        !matches!(self.status, GameStatus::InProgress)
    }

    /// 勝者を取得する
    /// 引き分けや進行中の場合はNone
    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won { winner, .. } => Some(winner),
            _ => None,
        }
    }

    /// 全マスが埋まったかチェックする
    pub fn is_board_filled(&self) -> bool {
        self.move_count == self.board_size()
    }

    /// 着手を記録する
    pub fn record_move(&mut self, position: Position) {
        self.move_count += 1;
        self.last_move = Some(position);
        self.last_updated = Utc::now();
    }

    /// 現在のプレイヤーを交代する
    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opposite();
        self.last_updated = Utc::now();
    }

    /// 現在のプレイヤーの勝利でゲームを終了させる
    pub fn finish_with_winner(&mut self, kind: WinConditionType) {
        self.status = GameStatus::Won {
            winner: self.current_player,
            kind,
        };
        self.last_updated = Utc::now();
    }

    /// 引き分けでゲームを終了させる
    pub fn finish_with_draw(&mut self) {
        self.status = GameStatus::Drawn;
        self.last_updated = Utc::now();
    }
}
