//! Assets Config

use std::path::PathBuf;

use clap::Args;

/// Static asset and debug settings.
#[derive(Debug, Args)]
pub struct AssetsConfig {
    /// Directory holding `Views/` and the static files
    #[arg(long, env = "ASSETS_DIR", default_value = "public")]
    pub assets_dir: PathBuf,

    /// Enable the `/log-tokens` debug sink
    #[arg(long, env = "DEBUG_TOKEN_LOG", default_value_t = false)]
    pub debug_token_log: bool,
}
