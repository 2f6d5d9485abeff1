//! 三目並べのゲーム進行エンジン
//! 手番管理、着手の検証、勝利・引き分け判定、盤面サイズ変更を担当し、
//! 状態が変わるたびにGameViewへ通知する。

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::board::{validate_row_size, Board, BoardCache, DEFAULT_ROW_SIZE, MAX_ROW_SIZE, MIN_ROW_SIZE};
use super::state::{GameState, GameStatus};
use super::types::{Player, Position, TileColor};
use super::view::GameView;
use super::win_condition::{WinConditionIndex, WinConditionType};
use crate::config::GameConfig;
use crate::error::{GameError, Result};

/// 盤面サイズの変更方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardSizeChange {
    Increment,
    Decrement,
}

/// 着手が無視された理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// まだゲームが開始されていない
    NoActiveGame,
    GameOver,
    CellOccupied,
}

/// 着手の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// 盤面は変化していない
    Ignored(IgnoreReason),
    /// 着手が適用され、手番が移った
    Continued { next_player: Player },
    Won {
        winner: Player,
        kind: WinConditionType,
    },
    Drawn,
}

/// ゲーム全体を管理するエンジン
/// 盤面・勝利条件の索引・進行状態を単独で所有し、UI側とはGameView経由でのみやり取りする
pub struct GameEngine<V: GameView> {
    view: V,
    board_cache: BoardCache,
    win_conditions: Option<WinConditionIndex>,
    state: GameState,
    row_size: usize,
    first_launch: bool,
}

impl<V: GameView> GameEngine<V> {
    /// デフォルトの盤面サイズでエンジンを作成する
    /// ゲームはstart_new_gameを呼ぶまで開始されない
    pub fn new(view: V) -> Self {
        Self {
            view,
            board_cache: BoardCache::new(),
            win_conditions: None,
            state: GameState::new(DEFAULT_ROW_SIZE),
            row_size: DEFAULT_ROW_SIZE,
            first_launch: true,
        }
    }

    /// 指定した盤面サイズでエンジンを作成する
    pub fn with_row_size(row_size: usize, view: V) -> Result<Self> {
        validate_row_size(row_size)?;

        let mut engine = Self::new(view);
        engine.row_size = row_size;
        engine.state = GameState::new(row_size);
        Ok(engine)
    }

    /// 設定の初期盤面サイズでエンジンを作成する
    pub fn with_config(config: &GameConfig, view: V) -> Result<Self> {
        Self::with_row_size(config.initial_row_size, view)
    }

    /// 新しいゲームを開始する、または既存のゲームを再表示する
    ///
    /// ユーザー操作か初回起動の場合は盤面と勝利条件を作り直して状態をリセットする。
    /// それ以外（画面の再構築など）はキャッシュ済みの盤面をそのまま使い、状態も保持する。
    /// どちらの場合も現在の状態（手番・勝者・引き分け）と全マスを通知する。
    #[instrument(skip(self), fields(row_size = self.row_size))]
    pub fn start_new_game(&mut self, user_requested: bool) -> Result<()> {
        if user_requested || self.first_launch {
            let board = self.board_cache.setup(self.row_size, true)?;
            self.win_conditions = Some(WinConditionIndex::for_board(board)?);
            self.state = GameState::new(self.row_size);
            self.first_launch = false;
            info!(game_id = %self.state.id, "new game started");
        } else {
            self.board_cache.setup(self.row_size, false)?;
            debug!(game_id = %self.state.id, "resuming cached game");
        }

        match self.state.status {
            GameStatus::InProgress => self.view.display_player_turn(self.state.current_player),
            GameStatus::Won { winner, .. } => self.view.display_game_won(winner),
            GameStatus::Drawn => self.view.display_game_draw(),
        }

        if let Some(board) = self.board_cache.board() {
            self.view.display_new_game(board.tiles(), board.row_size());
        }
        Ok(())
    }

    /// 現在のプレイヤーの手を指定したマスに置く
    ///
    /// 終局後の着手と埋まったマスへの着手は無視される。
    /// 盤面外のインデックスは呼び出し側の契約違反としてエラーを返す。
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, cell_index: usize) -> Result<MoveOutcome> {
        let (Some(board), Some(win_conditions)) =
            (self.board_cache.board_mut(), self.win_conditions.as_ref())
        else {
            debug!("move ignored: no active game");
            return Ok(MoveOutcome::Ignored(IgnoreReason::NoActiveGame));
        };

        let out_of_range = GameError::CellIndexOutOfRange {
            index: cell_index,
            cell_count: board.cell_count(),
        };
        let position = match Position::from_index(cell_index, board.row_size()) {
            Some(position) => position,
            None => {
                warn!(cell_index, "move rejected: {}", out_of_range);
                return Err(out_of_range);
            }
        };

        if self.state.is_game_over() {
            debug!("move ignored: game over");
            return Ok(MoveOutcome::Ignored(IgnoreReason::GameOver));
        }

        let player = self.state.current_player;
        let tile = board.tile_at_mut(cell_index).ok_or(out_of_range)?;
        if !tile.is_open() {
            debug!("move ignored: cell occupied");
            return Ok(MoveOutcome::Ignored(IgnoreReason::CellOccupied));
        }
        tile.set_status(player.to_status());
        tile.set_color(TileColor::LastMove);

        // 前回の着手マスのハイライトを戻す
        if let Some(previous) = self.state.last_move {
            if let Some(previous_tile) = board.tile_mut(previous) {
                previous_tile.set_color(TileColor::Normal);
            }
        }
        self.state.record_move(position);
        debug!(%player, row = position.row, col = position.col, "move applied");
        self.view.display_player_move();

        let winning = win_conditions
            .conditions_touching(cell_index)
            .find(|condition| condition.is_met(board));

        if let Some(condition) = winning {
            for &cell in condition.cells() {
                if let Some(winning_tile) = board.tile_at_mut(cell) {
                    winning_tile.set_color(TileColor::Winner);
                }
            }
            let kind = condition.kind();
            self.state.finish_with_winner(kind);
            info!(winner = %player, ?kind, moves = self.state.move_count, "game won");
            self.view.display_game_won(player);
            return Ok(MoveOutcome::Won { winner: player, kind });
        }

        self.state.switch_player();
        let next_player = self.state.current_player;
        self.view.display_player_turn(next_player);

        if self.state.is_board_filled() {
            self.state.finish_with_draw();
            info!(moves = self.state.move_count, "game drawn");
            self.view.display_game_draw();
            return Ok(MoveOutcome::Drawn);
        }

        Ok(MoveOutcome::Continued { next_player })
    }

    /// 盤面サイズを1つ増減して新しいゲームを開始する
    /// 上限・下限に達している場合は何もせずfalseを返す
    #[instrument(skip(self), fields(row_size = self.row_size))]
    pub fn change_board_size(&mut self, change: BoardSizeChange) -> Result<bool> {
        let target = match change {
            BoardSizeChange::Increment if self.row_size < MAX_ROW_SIZE => self.row_size + 1,
            BoardSizeChange::Decrement if self.row_size > MIN_ROW_SIZE => self.row_size - 1,
            _ => {
                debug!("board size change ignored: already at bound");
                return Ok(false);
            }
        };

        self.row_size = target;
        self.start_new_game(true)?;
        Ok(true)
    }

    pub fn increment_board_size(&mut self) -> Result<bool> {
        self.change_board_size(BoardSizeChange::Increment)
    }

    pub fn decrement_board_size(&mut self) -> Result<bool> {
        self.change_board_size(BoardSizeChange::Decrement)
    }

    /// キャッシュ済みの盤面と勝利条件を破棄する
    /// 次のstart_new_gameは初回起動として扱われる
    pub fn teardown(&mut self) {
        self.board_cache.reset();
        self.win_conditions = None;
        self.first_launch = true;
        debug!("engine torn down");
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> Option<&Board> {
        self.board_cache.board()
    }

    pub fn win_conditions(&self) -> Option<&WinConditionIndex> {
        self.win_conditions.as_ref()
    }

    /// 現在の盤面サイズ（次のゲームに使われるサイズ）
    pub fn row_size(&self) -> usize {
        self.row_size
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}
