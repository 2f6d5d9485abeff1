//! ゲームの基本型定義モジュール
//! 三目並べで使用される基本的な型とenum、構造体を定義する。

use serde::{Deserialize, Serialize};
use std::fmt;

/// ゲームのプレイヤーを表すenum
/// 先手はX、後手はO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// 相手プレイヤーを返す
    pub fn opposite(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// プレイヤーを対応するマスの占有状態に変換する
    pub fn to_status(self) -> TileStatus {
        match self {
            Player::X => TileStatus::PlayerX,
            Player::O => TileStatus::PlayerO,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// マスを誰が占有しているかを表すenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileStatus {
    Open,
    PlayerX,
    PlayerO,
}

impl TileStatus {
    /// 占有しているプレイヤーを返す
    /// 空きマスの場合はNone
    pub fn player(self) -> Option<Player> {
        match self {
            TileStatus::Open => None,
            TileStatus::PlayerX => Some(Player::X),
            TileStatus::PlayerO => Some(Player::O),
        }
    }
}

/// マスの表示ハイライト
/// UI側が描画に使うヒントで、ゲーム判定には影響しない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileColor {
    Normal,
    /// 直前に着手されたマス
    LastMove,
    /// 勝利ラインを構成するマス
    Winner,
}

/// 盤面の1マスを表す構造体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    status: TileStatus,
    color: TileColor,
}

impl Tile {
    /// 空きマス・通常表示のマスを作成する
    pub fn new() -> Self {
        Self {
            status: TileStatus::Open,
            color: TileColor::Normal,
        }
    }

    pub fn status(&self) -> TileStatus {
        self.status
    }

    pub fn color(&self) -> TileColor {
        self.color
    }

    pub fn set_status(&mut self, status: TileStatus) {
        self.status = status;
    }

    pub fn set_color(&mut self, color: TileColor) {
        self.color = color;
    }

    /// まだ誰も置いていないマスかチェックする
    pub fn is_open(&self) -> bool {
        self.status == TileStatus::Open
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new()
    }
}

/// N×N盤面上の座標を表す構造体
/// 線形インデックスは row * row_size + col
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// 範囲チェック付きのコンストラクタ
    /// row_size×row_size盤面の範囲外の座標の場合はNoneを返す
    pub fn new(row: usize, col: usize, row_size: usize) -> Option<Position> {
        if row < row_size && col < row_size {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// 線形インデックスから座標に変換する
    pub fn from_index(index: usize, row_size: usize) -> Option<Position> {
        if row_size == 0 || index >= row_size * row_size {
            return None;
        }
        Some(Position {
            row: index / row_size,
            col: index % row_size,
        })
    }

    /// 座標を線形インデックスに変換する
    pub fn to_index(&self, row_size: usize) -> usize {
        self.row * row_size + self.col
    }

    /// 座標が有効範囲内かチェックする
    pub fn is_valid(&self, row_size: usize) -> bool {
        self.row < row_size && self.col < row_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opposite() {
        assert_eq!(Player::X.opposite(), Player::O);
        assert_eq!(Player::O.opposite(), Player::X);
    }

    #[test]
    fn test_player_to_status() {
        assert_eq!(Player::X.to_status(), TileStatus::PlayerX);
        assert_eq!(Player::O.to_status(), TileStatus::PlayerO);
        assert_eq!(TileStatus::PlayerO.player(), Some(Player::O));
        assert_eq!(TileStatus::Open.player(), None);
    }

    #[test]
    fn test_tile_default_state() {
        let tile = Tile::new();
        assert_eq!(tile.status(), TileStatus::Open);
        assert_eq!(tile.color(), TileColor::Normal);
        assert!(tile.is_open());
    }

    #[test]
    fn test_tile_update() {
        let mut tile = Tile::new();
        tile.set_status(TileStatus::PlayerO);
        tile.set_color(TileColor::LastMove);

        assert_eq!(tile.status(), TileStatus::PlayerO);
        assert_eq!(tile.color(), TileColor::LastMove);
        assert!(!tile.is_open());
    }

    #[test]
    fn test_position_new() {
        assert_eq!(Position::new(3, 2, 4), Some(Position { row: 3, col: 2 }));
        assert!(Position::new(4, 0, 4).is_none());
        assert!(Position::new(0, 4, 4).is_none());
        assert!(Position::new(7, 7, 8).is_some());
    }

    #[test]
    fn test_position_index_conversion() {
        let pos = Position::from_index(6, 4).unwrap();
        assert_eq!(pos, Position { row: 1, col: 2 });
        assert_eq!(pos.to_index(4), 6);

        assert_eq!(Position::from_index(15, 4), Some(Position { row: 3, col: 3 }));
        assert!(Position::from_index(16, 4).is_none());
        assert!(Position::from_index(0, 0).is_none());
    }

    #[test]
    fn test_player_display() {
        assert_eq!(Player::X.to_string(), "X");
        assert_eq!(Player::O.to_string(), "O");
    }
}
