//! 三目並べエンジンのコンソール版エントリポイント
//! 設定読み込み、ログ初期化を行い、標準入力のコマンドでゲームを進める。

use std::io::{self, BufRead, Write};

use tracing::{error, info};
use TicTacToe::{
    config::Config,
    game::{GameEngine, GameView, Player, Position, Tile},
    logging,
};

/// 通知を標準出力に表示するGameView実装
struct ConsoleView;

impl GameView for ConsoleView {
    fn display_new_game(&mut self, tiles: &[Tile], row_size: usize) {
        let open = tiles.iter().filter(|tile| tile.is_open()).count();
        println!("盤面 {}x{} (空きマス: {})", row_size, row_size, open);
    }

    fn display_player_move(&mut self) {}

    fn display_player_turn(&mut self, player: Player) {
        println!("{} の番です", player);
    }

    fn display_game_won(&mut self, winner: Player) {
        println!("{} の勝ち!", winner);
    }

    fn display_game_draw(&mut self) {
        println!("引き分け");
    }
}

/// 標準入力から受け付けるコマンド
#[derive(Debug, PartialEq, Eq)]
enum Command {
    New,
    Move(usize),
    Play { row: usize, col: usize },
    Grow,
    Shrink,
    Show,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Command> {
        let mut parts = line.split_whitespace();
        let command = match parts.next()? {
            "new" => Command::New,
            "move" => Command::Move(parts.next()?.parse().ok()?),
            "play" => Command::Play {
                row: parts.next()?.parse().ok()?,
                col: parts.next()?.parse().ok()?,
            },
            "grow" => Command::Grow,
            "shrink" => Command::Shrink,
            "show" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

const HELP: &str = "コマンド: new | move <index> | play <row> <col> | grow | shrink | show | help | quit";

fn print_board(engine: &GameEngine<ConsoleView>) {
    if let Some(board) = engine.board() {
        print!("{}", board.display());
    }
}

/// メイン関数 - 設定とログを初期化し、入力ループを回す
fn main() {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("設定エラー: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&config.logging);

    let mut engine = match GameEngine::with_config(&config.game, ConsoleView) {
        Ok(engine) => engine,
        Err(e) => {
            error!("engine construction failed: {}", e);
            std::process::exit(1);
        }
    };
    info!(row_size = engine.row_size(), "console session started");

    if let Err(e) = engine.start_new_game(false) {
        error!("failed to start game: {}", e);
        std::process::exit(1);
    }
    print_board(&engine);
    println!("{}", HELP);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("failed to read input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let result = match Command::parse(&line) {
            Some(Command::New) => engine.start_new_game(true),
            Some(Command::Move(index)) => engine.submit_move(index).map(|_| ()),
            Some(Command::Play { row, col }) => {
                let row_size = engine.row_size();
                match Position::new(row, col, row_size) {
                    Some(position) => engine.submit_move(position.to_index(row_size)).map(|_| ()),
                    None => {
                        println!("範囲外の座標です: ({}, {})", row, col);
                        continue;
                    }
                }
            }
            Some(Command::Grow) => engine.increment_board_size().map(|_| ()),
            Some(Command::Shrink) => engine.decrement_board_size().map(|_| ()),
            Some(Command::Show) => Ok(()),
            Some(Command::Help) => {
                println!("{}", HELP);
                continue;
            }
            Some(Command::Quit) => break,
            None => {
                println!("不明なコマンド: {}", line.trim());
                continue;
            }
        };

        if let Err(e) = result {
            println!("エラー: {}", e);
        }
        print_board(&engine);
        let _ = io::stdout().flush();
    }

    engine.teardown();
    info!("console session finished");
}
