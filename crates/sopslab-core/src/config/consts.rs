//! システム全体で使用される定数定義

use std::time::Duration;

/// 管理対象ツールの識別情報
pub mod tool {
    /// ツール名（キャッシュキーと実行ファイル名の基礎）
    pub const NAME: &str = "sops";

    /// リリース一覧が取得できない場合に使用する安定版
    ///
    /// 更新ポリシー: sopslab のリリース時に、全サポートプラットフォーム向けの
    /// アセットが揃っている最新の安定版（rc ではないもの）へ更新する。
    /// この値以外の場所にバージョン文字列を直接書かないこと。
    pub const STABLE_VERSION: &str = "v3.8.1";

    /// 「最新の安定版」を意味する入力値（大文字小文字を区別しない）
    pub const LATEST_SENTINEL: &str = "latest";
}

/// GitHub 上の配布元
pub mod github {
    pub const BASE_URL: &str = "https://github.com";
    pub const API_BASE_URL: &str = "https://api.github.com";
    pub const OWNER: &str = "getsops";
    pub const REPO: &str = "sops";
}

/// ネットワーク設定
pub mod network {
    use super::Duration;

    /// リリース一覧取得のタイムアウト
    pub const INDEX_TIMEOUT: Duration = Duration::from_secs(30);

    /// バイナリダウンロードのタイムアウト
    pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

    pub const USER_AGENT: &str = "sopslab";
}

/// ローカルキャッシュ設定
pub mod cache {
    use super::Duration;

    /// 同一バージョンのインストールを待つ最大時間
    pub const LOCK_TIMEOUT: Duration = Duration::from_secs(300);

    /// `{arch}.complete` マーカーの拡張子
    pub const COMPLETE_MARKER_EXT: &str = "complete";

    /// OS 既定キャッシュ配下のディレクトリ名
    pub const DIR_NAME: &str = "sopslab";
    pub const TOOLS_DIR: &str = "tools";
}

/// 参照する環境変数名
pub mod env {
    pub const CACHE_DIR: &str = "SOPSLAB_CACHE_DIR";
    pub const LOCK_TIMEOUT_SECS: &str = "SOPSLAB_LOCK_TIMEOUT_SECS";
    pub const RUNNER_TOOL_CACHE: &str = "RUNNER_TOOL_CACHE";
    pub const INPUT_VERSION: &str = "INPUT_VERSION";
    pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";
    pub const GITHUB_PATH: &str = "GITHUB_PATH";
    pub const PATH: &str = "PATH";
}
