//! 勝利条件の生成と索引モジュール
//! 盤面サイズから全ての勝利ライン（行・列・対角・2×2正方形・四隅）を導出し、
//! マスごとに関係する勝利条件の一覧を引けるようにする。

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::board::{validate_row_size, Board};
use super::types::{Player, TileStatus};
use crate::error::Result;

/// 勝利条件の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinConditionType {
    Row,
    Column,
    Diagonal,
    /// 隣接する2×2のマス
    Square,
    /// 盤面の四隅
    Corners,
}

/// 1つの勝利条件を盤面に照らした結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinConditionOutcome {
    /// 全マスが同じプレイヤーで埋まっている
    Met(Player),
    /// 空きマスが残っている
    OpenTileFound,
    /// 両プレイヤーの石が混在しており、今後も成立しない
    ConflictingStates,
}

/// 勝利条件を構成するマスの集合
/// マスは線形インデックスで保持し、構築後は変更されない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinCondition {
    cells: Vec<usize>,
    kind: WinConditionType,
}

impl WinCondition {
    pub(crate) fn new(cells: Vec<usize>, kind: WinConditionType) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells, kind }
    }

    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn kind(&self) -> WinConditionType {
        self.kind
    }

    pub fn contains(&self, cell_index: usize) -> bool {
        self.cells.contains(&cell_index)
    }

    /// 盤面上でこの条件を評価する
    /// 最初の空きマス、または最初の不一致で打ち切る
    pub fn evaluate(&self, board: &Board) -> WinConditionOutcome {
        let status_at =
            |index: usize| board.tile_at(index).map_or(TileStatus::Open, |tile| tile.status());

        let Some((&first, rest)) = self.cells.split_first() else {
            return WinConditionOutcome::OpenTileFound;
        };
        let target = status_at(first);
        let Some(player) = target.player() else {
            return WinConditionOutcome::OpenTileFound;
        };

        for &index in rest {
            let status = status_at(index);
            if status == TileStatus::Open {
                return WinConditionOutcome::OpenTileFound;
            }
            if status != target {
                return WinConditionOutcome::ConflictingStates;
            }
        }

        WinConditionOutcome::Met(player)
    }

    /// 全マスが同じプレイヤーで埋まっているか
    pub fn is_met(&self, board: &Board) -> bool {
        matches!(self.evaluate(board), WinConditionOutcome::Met(_))
    }
}

/// 盤面サイズごとの全勝利条件と、マス→勝利条件の索引
/// 着手のたびに全条件を走査せず、そのマスに関係する条件だけを調べるために使う
#[derive(Debug, Clone)]
pub struct WinConditionIndex {
    row_size: usize,
    conditions: Vec<WinCondition>,
    /// マスの線形インデックスごとの勝利条件ID（登録順）
    by_cell: Vec<Vec<usize>>,
}

impl WinConditionIndex {
    /// 一辺のマス数から全勝利条件を生成する
    /// 登録順は行、列、対角、正方形、四隅
    pub fn build(row_size: usize) -> Result<Self> {
        validate_row_size(row_size)?;

        let mut index = Self {
            row_size,
            conditions: Vec::new(),
            by_cell: vec![Vec::new(); row_size * row_size],
        };
        index.add_rows();
        index.add_columns();
        index.add_diagonals();
        index.add_squares();
        index.add_corners();

        debug!(
            row_size,
            conditions = index.conditions.len(),
            "win condition index built"
        );
        Ok(index)
    }

    /// 盤面と同じサイズの索引を生成する
    pub fn for_board(board: &Board) -> Result<Self> {
        Self::build(board.row_size())
    }

    fn cell(&self, row: usize, col: usize) -> usize {
        self.row_size * row + col
    }

    fn register(&mut self, cells: Vec<usize>, kind: WinConditionType) {
        let id = self.conditions.len();
        for &cell in &cells {
            self.by_cell[cell].push(id);
        }
        self.conditions.push(WinCondition::new(cells, kind));
    }

    fn add_rows(&mut self) {
        for row in 0..self.row_size {
            let cells = (0..self.row_size).map(|col| self.cell(row, col)).collect();
            self.register(cells, WinConditionType::Row);
        }
    }

    fn add_columns(&mut self) {
        for col in 0..self.row_size {
            let cells = (0..self.row_size).map(|row| self.cell(row, col)).collect();
            self.register(cells, WinConditionType::Column);
        }
    }

    fn add_diagonals(&mut self) {
        let last = self.row_size - 1;

        // 左上から右下
        let main = (0..self.row_size).map(|i| self.cell(i, i)).collect();
        self.register(main, WinConditionType::Diagonal);

        // 右上から左下
        let anti = (0..self.row_size).map(|i| self.cell(i, last - i)).collect();
        self.register(anti, WinConditionType::Diagonal);
    }

    fn add_squares(&mut self) {
        for row in 0..self.row_size - 1 {
            for col in 0..self.row_size - 1 {
                let cells = vec![
                    self.cell(row, col),
                    self.cell(row + 1, col),
                    self.cell(row, col + 1),
                    self.cell(row + 1, col + 1),
                ];
                self.register(cells, WinConditionType::Square);
            }
        }
    }

    fn add_corners(&mut self) {
        let last = self.row_size - 1;
        let cells = vec![
            self.cell(0, 0),
            self.cell(0, last),
            self.cell(last, last),
            self.cell(last, 0),
        ];
        self.register(cells, WinConditionType::Corners);
    }

    pub fn row_size(&self) -> usize {
        self.row_size
    }

    /// 登録順の全勝利条件
    pub fn conditions(&self) -> &[WinCondition] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// 指定した種類の勝利条件の数
    pub fn count_of(&self, kind: WinConditionType) -> usize {
        self.conditions.iter().filter(|c| c.kind == kind).count()
    }

    /// 指定したマスを含む勝利条件を登録順に返す
    /// 範囲外のインデックスでは何も返さない
    pub fn conditions_touching(&self, cell_index: usize) -> impl Iterator<Item = &WinCondition> + '_ {
        self.by_cell
            .get(cell_index)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&id| &self.conditions[id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{Position, TileStatus};

    fn place(board: &mut Board, row: usize, col: usize, status: TileStatus) {
        let pos = Position::new(row, col, board.row_size()).unwrap();
        board.tile_mut(pos).unwrap().set_status(status);
    }

    #[test]
    fn test_condition_counts() {
        for n in 4..=8 {
            let index = WinConditionIndex::build(n).unwrap();
            assert_eq!(index.count_of(WinConditionType::Row), n);
            assert_eq!(index.count_of(WinConditionType::Column), n);
            assert_eq!(index.count_of(WinConditionType::Diagonal), 2);
            assert_eq!(index.count_of(WinConditionType::Square), (n - 1) * (n - 1));
            assert_eq!(index.count_of(WinConditionType::Corners), 1);
            assert_eq!(index.len(), 2 * n + 3 + (n - 1) * (n - 1));
        }
    }

    #[test]
    fn test_build_rejects_invalid_row_size() {
        assert!(WinConditionIndex::build(3).is_err());
        assert!(WinConditionIndex::build(9).is_err());
    }

    #[test]
    fn test_condition_cell_layout() {
        let index = WinConditionIndex::build(4).unwrap();
        let conditions = index.conditions();

        assert_eq!(conditions[1].cells(), &[4, 5, 6, 7]);
        assert_eq!(conditions[1].kind(), WinConditionType::Row);
        assert_eq!(conditions[4 + 2].cells(), &[2, 6, 10, 14]);
        assert_eq!(conditions[8].cells(), &[0, 5, 10, 15]);
        assert_eq!(conditions[9].cells(), &[3, 6, 9, 12]);
        assert_eq!(conditions[10].cells(), &[0, 4, 1, 5]);
        assert_eq!(conditions[10].kind(), WinConditionType::Square);

        let corners = conditions.last().unwrap();
        assert_eq!(corners.kind(), WinConditionType::Corners);
        assert_eq!(corners.cells(), &[0, 3, 15, 12]);
    }

    #[test]
    fn test_conditions_touching_matches_membership() {
        let index = WinConditionIndex::build(5).unwrap();

        for cell in 0..25 {
            let touching: Vec<_> = index.conditions_touching(cell).collect();
            assert!(touching.iter().all(|c| c.contains(cell)));

            let expected = index.conditions().iter().filter(|c| c.contains(cell)).count();
            assert_eq!(touching.len(), expected);
        }
    }

    #[test]
    fn test_conditions_touching_registration_order() {
        let index = WinConditionIndex::build(4).unwrap();
        let kinds: Vec<_> = index.conditions_touching(0).map(WinCondition::kind).collect();

        assert_eq!(
            kinds,
            vec![
                WinConditionType::Row,
                WinConditionType::Column,
                WinConditionType::Diagonal,
                WinConditionType::Square,
                WinConditionType::Corners,
            ]
        );
    }

    #[test]
    fn test_conditions_touching_out_of_range() {
        let index = WinConditionIndex::build(4).unwrap();
        assert_eq!(index.conditions_touching(16).count(), 0);
    }

    #[test]
    fn test_evaluate_open_tile() {
        let mut board = Board::new(4).unwrap();
        let index = WinConditionIndex::for_board(&board).unwrap();
        let row = &index.conditions()[0];

        assert_eq!(row.evaluate(&board), WinConditionOutcome::OpenTileFound);

        for col in 0..3 {
            place(&mut board, 0, col, TileStatus::PlayerX);
        }
        assert_eq!(row.evaluate(&board), WinConditionOutcome::OpenTileFound);
        assert!(!row.is_met(&board));
    }

    #[test]
    fn test_evaluate_conflicting_states() {
        let mut board = Board::new(4).unwrap();
        let index = WinConditionIndex::for_board(&board).unwrap();
        let row = &index.conditions()[0];

        place(&mut board, 0, 0, TileStatus::PlayerX);
        place(&mut board, 0, 1, TileStatus::PlayerO);
        place(&mut board, 0, 2, TileStatus::PlayerX);
        place(&mut board, 0, 3, TileStatus::PlayerX);

        assert_eq!(row.evaluate(&board), WinConditionOutcome::ConflictingStates);
        assert!(!row.is_met(&board));
    }

    #[test]
    fn test_evaluate_met() {
        let mut board = Board::new(6).unwrap();
        let index = WinConditionIndex::for_board(&board).unwrap();

        place(&mut board, 0, 0, TileStatus::PlayerO);
        place(&mut board, 0, 5, TileStatus::PlayerO);
        place(&mut board, 5, 5, TileStatus::PlayerO);
        place(&mut board, 5, 0, TileStatus::PlayerO);

        let corners = index.conditions().last().unwrap();
        assert_eq!(corners.evaluate(&board), WinConditionOutcome::Met(Player::O));
        assert!(corners.is_met(&board));
    }
}
