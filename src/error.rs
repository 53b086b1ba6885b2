use derive_builder::UninitializedFieldError;
use std::{io, string::FromUtf8Error};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("a pattern needs at least one piece")]
    Empty,
    #[error("piece #{index} has an invalid {dimension}: {value}")]
    InvalidDimension {
        index: usize,
        dimension: &'static str,
        value: f64,
    },
    #[error("piece #{index} has an invalid position: {value}")]
    InvalidPosition { index: usize, value: f64 },
    #[error("malformed pattern data")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed layout configuration")]
    Parse(#[from] serde_json::Error),
    #[error("scale must be a positive number, got {0}")]
    InvalidScale(f64),
    #[error("canvas size must be positive, got {0}x{1}")]
    InvalidCanvas(f64, f64),
}

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("incomplete shape")]
    IncompleteShape(#[from] UninitializedFieldError),
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("I/O failure")]
    IoFailure(#[from] io::Error),
    #[error("rendered output is not valid UTF-8")]
    Encoding(#[from] FromUtf8Error),
}

/// A failure reported by the page hosting the utilities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("host failure: {0}")]
pub struct HostError(pub String);

#[derive(Error, Debug)]
pub enum VisualizerError {
    #[error("no container element with id `{0}`")]
    ContainerNotFound(String),
    #[error("invalid layout configuration")]
    Config(#[from] ConfigError),
    #[error("cannot lay out pattern")]
    Layout(#[from] LayoutError),
    #[error("cannot render pattern")]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Host(#[from] HostError),
}

#[derive(Error, Debug)]
pub enum PrintError {
    #[error("no article content matches `{0}`")]
    ContentNotFound(String),
    #[error("the print window was blocked")]
    PopupBlocked,
    #[error("cannot render print document")]
    Template(#[from] askama::Error),
    #[error(transparent)]
    Host(#[from] HostError),
}
