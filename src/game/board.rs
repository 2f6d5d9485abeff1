//! 三目並べの盤面状態を管理するモジュール
//! N×Nグリッドの盤面とマスの配置、操作を担当する。

use super::types::{Position, Tile, TileStatus};
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 盤面の一辺の最小マス数
pub const MIN_ROW_SIZE: usize = 4;
/// 盤面の一辺の最大マス数
pub const MAX_ROW_SIZE: usize = 8;
/// 初回起動時の一辺のマス数
pub const DEFAULT_ROW_SIZE: usize = MIN_ROW_SIZE;

/// 一辺が範囲内かチェックする
pub fn validate_row_size(row_size: usize) -> Result<()> {
    if (MIN_ROW_SIZE..=MAX_ROW_SIZE).contains(&row_size) {
        Ok(())
    } else {
        Err(GameError::InvalidRowSize {
            row_size,
            min: MIN_ROW_SIZE,
            max: MAX_ROW_SIZE,
        })
    }
}

/// N×N盤面を表現する構造体
/// マスは行優先で保持し、線形インデックスでも座標でもアクセスできる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    row_size: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// 全マスが空きの盤面を作成する
    /// 一辺がMIN_ROW_SIZE..=MAX_ROW_SIZEの範囲外ならエラー
    pub fn new(row_size: usize) -> Result<Self> {
        validate_row_size(row_size)?;

        Ok(Board {
            row_size,
            tiles: vec![Tile::new(); row_size * row_size],
        })
    }

    pub fn row_size(&self) -> usize {
        self.row_size
    }

    /// 盤面の総マス数
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// 行優先で並んだ全マス
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// 指定した位置のマスを取得する
    /// 範囲外の場合はNoneを返す
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        if position.is_valid(self.row_size) {
            self.tiles.get(position.to_index(self.row_size))
        } else {
            None
        }
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        if position.is_valid(self.row_size) {
            let index = position.to_index(self.row_size);
            self.tiles.get_mut(index)
        } else {
            None
        }
    }

    /// 線形インデックスでマスを取得する
    pub fn tile_at(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn tile_at_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    /// 既に置かれたマスの数を数える
    pub fn count_occupied(&self) -> usize {
        self.tiles.iter().filter(|tile| !tile.is_open()).count()
    }

    /// デバッグ用の盤面表示文字列を生成する
    /// X、O、.で空きマスを表現
    pub fn display(&self) -> String {
        let mut result = String::from(" ");
        for col in 0..self.row_size {
            result.push_str(&format!(" {}", col));
        }
        result.push('\n');

        for (row_idx, row) in self.tiles.chunks(self.row_size).enumerate() {
            result.push_str(&format!("{}", row_idx));
            for tile in row {
                let symbol = match tile.status() {
                    TileStatus::Open => ".",
                    TileStatus::PlayerX => "X",
                    TileStatus::PlayerO => "O",
                };
                result.push_str(&format!(" {}", symbol));
            }
            result.push('\n');
        }

        result
    }
}

/// 盤面の生成とキャッシュを担当する構造体
/// 新規ゲームでなければ既存の盤面をそのまま返し、画面の再構築などで状態を保持する
#[derive(Debug, Default)]
pub struct BoardCache {
    board: Option<Board>,
}

impl BoardCache {
    pub fn new() -> Self {
        Self { board: None }
    }

    /// 盤面を取得する
    /// キャッシュが空か新規ゲームの場合のみ新しい盤面を作成する
    pub fn setup(&mut self, row_size: usize, new_game: bool) -> Result<&mut Board> {
        let board = match self.board.take() {
            Some(existing) if !new_game => existing,
            previous => match Board::new(row_size) {
                Ok(fresh) => {
                    debug!(row_size, "allocating fresh board");
                    fresh
                }
                Err(err) => {
                    self.board = previous;
                    return Err(err);
                }
            },
        };
        Ok(self.board.insert(board))
    }

    /// キャッシュ済みの盤面
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn board_mut(&mut self) -> Option<&mut Board> {
        self.board.as_mut()
    }

    /// キャッシュを破棄する
    pub fn reset(&mut self) {
        self.board = None;
    }
}
