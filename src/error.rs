//! Error types for the cutting engine.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes reported to callers alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Input file not found (-1)
    FileNotFound = -1,
    /// Empty input file (-2)
    EmptyFile = -2,
    /// Malformed request payload (-3)
    ParseError = -3,
    /// Width/height not positive or not finite (E100)
    InvalidDimension = 100,
    /// Price field not finite or negative (E101)
    NonFiniteValue = 101,
    /// Frame bar width leaves no inner opening (E102)
    InvalidFrame = 102,
    /// Piece can never fit on a sheet (E200)
    OversizePart = 200,
    /// Sheet size not usable (E201)
    InvalidSheet = 201,
    /// Engine configuration rejected (E300)
    InvalidConfig = 300,
}

/// Main error type for the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Part {part_id}: invalid dimensions ({width} x {height} mm)")]
    InvalidDimension {
        part_id: String,
        width: f64,
        height: f64,
    },

    #[error("Part {part_id}: '{field}' must be a finite, non-negative number, got {value}")]
    NonFiniteValue {
        part_id: String,
        field: String,
        value: f64,
    },

    #[error("Part {part_id}: frame bar width {bar_width} mm leaves no opening in {width} x {height} mm")]
    InvalidFrame {
        part_id: String,
        bar_width: f64,
        width: f64,
        height: f64,
    },

    #[error("Piece {piece_id} ({width} x {height} mm) can never be placed: {reason}")]
    OversizePart {
        piece_id: String,
        width: f64,
        height: f64,
        reason: String,
    },

    #[error("Invalid sheet size: {width} x {height} mm")]
    InvalidSheet { width: f64, height: f64 },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Malformed request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::InvalidDimension { .. } => ErrorCode::InvalidDimension,
            EngineError::NonFiniteValue { .. } => ErrorCode::NonFiniteValue,
            EngineError::InvalidFrame { .. } => ErrorCode::InvalidFrame,
            EngineError::OversizePart { .. } => ErrorCode::OversizePart,
            EngineError::InvalidSheet { .. } => ErrorCode::InvalidSheet,
            EngineError::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            EngineError::FileNotFound { .. } => ErrorCode::FileNotFound,
            EngineError::EmptyFile { .. } => ErrorCode::EmptyFile,
            EngineError::Json(_) => ErrorCode::ParseError,
            EngineError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
