use super::consts;
use crate::error::{Result, SopslabError};
use std::path::PathBuf;
use std::time::Duration;

/// 実行時設定 - 環境変数から解決される
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// ツールキャッシュのルート
    pub cache_root: PathBuf,
    /// キャッシュロック取得のタイムアウト
    pub lock_timeout: Duration,
}

impl Settings {
    /// 指定したキャッシュルートと既定値で作成
    pub fn with_cache_root(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            lock_timeout: consts::cache::LOCK_TIMEOUT,
        }
    }

    /// プロセス環境から設定を読み込む
    ///
    /// Cache root priority:
    /// 1. `SOPSLAB_CACHE_DIR`
    /// 2. `RUNNER_TOOL_CACHE` (shared with other setup actions on the runner)
    /// 3. `{os cache dir}/sopslab/tools`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む（テスト用に分離）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let cache_root = match non_empty(consts::env::CACHE_DIR)
            .or_else(|| non_empty(consts::env::RUNNER_TOOL_CACHE))
        {
            Some(dir) => PathBuf::from(dir),
            None => default_cache_root()?,
        };

        let lock_timeout = match non_empty(consts::env::LOCK_TIMEOUT_SECS) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    SopslabError::ConfigInvalidValue {
                        field: consts::env::LOCK_TIMEOUT_SECS.to_string(),
                        reason: format!("'{}' is not a number of seconds: {}", raw, e),
                    }
                })?;
                Duration::from_secs(secs)
            }
            None => consts::cache::LOCK_TIMEOUT,
        };

        Ok(Self {
            cache_root,
            lock_timeout,
        })
    }
}

/// OS 既定のキャッシュディレクトリ
///
/// - macOS: ~/Library/Caches/sopslab/tools
/// - Linux: ~/.cache/sopslab/tools
/// - Windows: %LOCALAPPDATA%\sopslab\tools
fn default_cache_root() -> Result<PathBuf> {
    let base = dirs::cache_dir().ok_or_else(|| SopslabError::CacheDirUnavailable {
        env_var: consts::env::CACHE_DIR.to_string(),
    })?;

    Ok(base.join(consts::cache::DIR_NAME).join(consts::cache::TOOLS_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_cache_dir_wins() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("SOPSLAB_CACHE_DIR", "/explicit"),
            ("RUNNER_TOOL_CACHE", "/runner"),
        ]))
        .unwrap();
        assert_eq!(settings.cache_root, PathBuf::from("/explicit"));
    }

    #[test]
    fn test_runner_tool_cache_used_when_no_override() {
        let settings =
            Settings::from_lookup(lookup_from(&[("RUNNER_TOOL_CACHE", "/opt/hostedtoolcache")]))
                .unwrap();
        assert_eq!(settings.cache_root, PathBuf::from("/opt/hostedtoolcache"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("SOPSLAB_CACHE_DIR", "  "),
            ("RUNNER_TOOL_CACHE", "/runner"),
        ]))
        .unwrap();
        assert_eq!(settings.cache_root, PathBuf::from("/runner"));
    }

    #[test]
    fn test_default_cache_root_ends_with_tools_dir() {
        // dirs::cache_dir() may be None in stripped-down containers
        if let Ok(settings) = Settings::from_lookup(lookup_from(&[])) {
            assert!(settings.cache_root.ends_with("sopslab/tools")
                || settings.cache_root.ends_with("sopslab\\tools"));
            assert_eq!(settings.lock_timeout, consts::cache::LOCK_TIMEOUT);
        }
    }

    #[test]
    fn test_lock_timeout_override() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("SOPSLAB_CACHE_DIR", "/c"),
            ("SOPSLAB_LOCK_TIMEOUT_SECS", "12"),
        ]))
        .unwrap();
        assert_eq!(settings.lock_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_invalid_lock_timeout_is_rejected() {
        let result = Settings::from_lookup(lookup_from(&[
            ("SOPSLAB_CACHE_DIR", "/c"),
            ("SOPSLAB_LOCK_TIMEOUT_SECS", "soon"),
        ]));
        match result {
            Err(SopslabError::ConfigInvalidValue { field, .. }) => {
                assert_eq!(field, "SOPSLAB_LOCK_TIMEOUT_SECS");
            }
            other => panic!("expected ConfigInvalidValue, got {:?}", other),
        }
    }
}
