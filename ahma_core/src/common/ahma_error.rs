use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the AHMA system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 5,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 17,
}

#[derive(Debug, Error)]
#[error("{errcode}: {msg}")]
pub struct AhmaError {
    pub errcode: ErrCode,
    pub msg: String,
}

impl AhmaError {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }
}

impl From<serde_json::Error> for AhmaError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string(), ErrCode::ConfigError)
    }
}
