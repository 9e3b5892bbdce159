//=========================================================================
// Application Error
//=========================================================================
//
// Every start-up failure, by layer. `main` maps any of them to exit
// code -1.
//
//=========================================================================

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::platform_bridge::PlatformError;
use crate::render::AssetError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}
