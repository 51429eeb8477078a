//! Core error types

use crate::kind::ResourceKind;
use crate::resource::ResourceStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("cannot mark non-existent {kind} '{name}' as {target}")]
    InvalidTransition {
        kind: ResourceKind,
        name: String,
        target: ResourceStatus,
    },

    #[error("{kind} resources do not support an active/inactive status")]
    StatusUnsupported { kind: ResourceKind },

    #[error("invalid value '{value}' for {field}: expected one of {expected}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
