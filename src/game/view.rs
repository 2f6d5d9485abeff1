//! UI側への通知インターフェースモジュール
//! エンジンは状態が変わるたびにGameViewへ通知し、描画はUI側に任せる。

use serde::{Deserialize, Serialize};

use super::types::{Player, Tile};

/// エンジンから状態変化を受け取るUI側のインターフェース
/// 通知はエンジンの操作中に同期的に呼ばれる
pub trait GameView {
    /// 新しいゲーム（または再表示）の全マスを受け取る
    /// tilesは行優先で並んでいる
    fn display_new_game(&mut self, tiles: &[Tile], row_size: usize);

    /// いずれかのマスの状態が変わった
    fn display_player_move(&mut self);

    /// 次の手番のプレイヤー
    fn display_player_turn(&mut self, player: Player);

    fn display_game_won(&mut self, winner: Player);

    fn display_game_draw(&mut self);
}

/// GameViewへの通知をデータとして表したenum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    NewGame { tiles: Vec<Tile>, row_size: usize },
    MoveApplied,
    TurnChanged(Player),
    GameWon(Player),
    GameDrawn,
}

/// 受け取った通知を順番に記録するGameView実装
/// テストや、コールバックよりイベント列を扱いたい呼び出し側で使う
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Vec<GameEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// 記録済みのイベントを取り出して空にする
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn win_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, GameEvent::GameWon(_)))
            .count()
    }

    pub fn draw_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, GameEvent::GameDrawn))
            .count()
    }
}

impl GameView for EventRecorder {
    fn display_new_game(&mut self, tiles: &[Tile], row_size: usize) {
        self.events.push(GameEvent::NewGame {
            tiles: tiles.to_vec(),
            row_size,
        });
    }

    fn display_player_move(&mut self) {
        self.events.push(GameEvent::MoveApplied);
    }

    fn display_player_turn(&mut self, player: Player) {
        self.events.push(GameEvent::TurnChanged(player));
    }

    fn display_game_won(&mut self, winner: Player) {
        self.events.push(GameEvent::GameWon(winner));
    }

    fn display_game_draw(&mut self) {
        self.events.push(GameEvent::GameDrawn);
    }
}
