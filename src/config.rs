//! アプリケーション設定管理モジュール
//! 初期盤面サイズやログ出力などの設定を
//! 設定ファイルと環境変数から読み込んで管理する。

use serde::{Deserialize, Serialize};
use std::{env, fs, io, path::Path};

use crate::game::{DEFAULT_ROW_SIZE, MAX_ROW_SIZE, MIN_ROW_SIZE};

/// ゲームの設定を管理する構造体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// 最初のゲームの一辺のマス数
    pub initial_row_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_row_size: DEFAULT_ROW_SIZE,
        }
    }
}

/// ログ出力の設定を管理する構造体
/// RUST_LOGが設定されている場合はそちらが優先される
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter形式のフィルタ（例: "info", "TicTacToe=debug"）
    pub level: String,
    /// ANSIカラー出力を使うか
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
        }
    }
}

/// アプリケーションの全設定を統合するメイン設定構造体
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 設定関連のエラーを表すenum
/// ファイル読み込み、パース、検証エラーなどを含む
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("設定ファイル読み込みエラー: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("設定ファイル解析エラー: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("環境変数エラー: {name} = {value}")]
    EnvVarError { name: String, value: String },

    #[error("設定値が無効です: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

/// 設定ファイルの探索順
const CONFIG_SEARCH_PATHS: [&str; 2] = ["tictactoe.json", "config/tictactoe.json"];

impl Config {
    /// 指定したファイルパスから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 環境変数から設定を読み込む
    /// デフォルト値をベースに環境変数で上書きする
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// 環境変数の値で現在の設定を上書きする
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(row_size) = env::var("TICTACTOE_ROW_SIZE") {
            self.game.initial_row_size = row_size.parse().map_err(|_| ConfigError::EnvVarError {
                name: "TICTACTOE_ROW_SIZE".to_string(),
                value: row_size,
            })?;
        }

        if let Ok(level) = env::var("TICTACTOE_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(ansi) = env::var("TICTACTOE_LOG_ANSI") {
            self.logging.ansi = ansi.parse().map_err(|_| ConfigError::EnvVarError {
                name: "TICTACTOE_LOG_ANSI".to_string(),
                value: ansi,
            })?;
        }

        Ok(())
    }

    /// 設定ファイルと環境変数を結合して設定を読み込む
    /// 設定ファイルがなくてもデフォルト値で動作するが、
    /// 存在するファイルが読めない・解析できない場合はエラーを返す
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::find_config_file()?.unwrap_or_default();

        // 環境変数で設定を上書き
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// 探索順に設定ファイルを探し、最初に見つかったものを読み込む
    /// 存在しないファイルだけを読み飛ばす
    fn find_config_file() -> Result<Option<Self>, ConfigError> {
        for path in CONFIG_SEARCH_PATHS {
            match Self::from_file(path) {
                Ok(config) => return Ok(Some(config)),
                Err(ConfigError::FileReadError(e)) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// 現在の設定を指定したファイルに保存する
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 設定値の妥当性をチェックする
    /// 不正な値がある場合はConfigErrorを返す
    pub fn validate(&self) -> Result<(), ConfigError> {
        let row_size = self.game.initial_row_size;
        if !(MIN_ROW_SIZE..=MAX_ROW_SIZE).contains(&row_size) {
            return Err(ConfigError::InvalidValue {
                field: "game.initial_row_size".to_string(),
                value: row_size.to_string(),
            });
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
            });
        }

        Ok(())
    }
}
