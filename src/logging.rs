//! ログ出力の初期化モジュール
//! ライブラリ側はtracingのマクロを使うだけで、購読者の登録はバイナリ側で一度だけ行う。

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// LoggingConfigからEnvFilterを組み立てる
/// RUST_LOGが設定されていればそちらを優先する
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// グローバルなtracing購読者を登録する
/// 既に登録済みの場合は何もしない
pub fn init(config: &LoggingConfig) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_ansi(config.ansi)
        .with_writer(std::io::stderr)
        .try_init();

    // 二度目以降の呼び出しでは既存の購読者をそのまま使う
    if let Err(e) = result {
        tracing::debug!("tracing subscriber already installed: {}", e);
    }
}
