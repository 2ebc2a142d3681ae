// src/error.rs

use std::fmt;

/// Global client error enum.
/// Centralizes everything that can go wrong talking to the platform.
#[derive(Debug)]
pub enum ClientError {
    /// The request never completed (DNS, connect, timeout).
    Transport(String),

    /// The backend answered with a non-success status.
    Api { status: u16, message: String },

    /// The backend answered 2xx but the body could not be decoded,
    /// or did not line up with the exam it claims to answer.
    InvalidResponse(String),

    /// A client-built payload failed validation before being sent.
    Validation(String),

    /// The local attempt state machine refused the operation.
    State(ExamStateError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "request failed: {}", msg),
            ClientError::Api { status, message } => {
                write!(f, "server responded with {}: {}", status, message)
            }
            ClientError::InvalidResponse(msg) => write!(f, "unexpected server response: {}", msg),
            ClientError::Validation(msg) => write!(f, "invalid request: {}", msg),
            ClientError::State(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ClientError {}

/// Converts `reqwest::Error` into `ClientError`.
/// Allows using the `?` operator around every service call.
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(err: validator::ValidationErrors) -> Self {
        ClientError::Validation(err.to_string())
    }
}

impl From<ExamStateError> for ClientError {
    fn from(err: ExamStateError) -> Self {
        ClientError::State(err)
    }
}

/// Violations of the exam attempt lifecycle or of the shape a submission
/// must keep relative to its exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamStateError {
    /// `start` called on an attempt that already left `NotStarted`.
    AlreadyStarted,

    /// A student edit or submit arrived before the attempt was started.
    NotStarted,

    /// A student edit or submit arrived after the attempt was submitted.
    AlreadySubmitted,

    /// A review edit arrived before the attempt was submitted.
    NotSubmitted,

    /// The addressed question index does not exist.
    IndexOutOfRange { index: usize, len: usize },

    /// The answer variant does not match the question variant at that index.
    AnswerKindMismatch { index: usize },

    /// The submission carries a different number of items than the exam.
    ItemCountMismatch { expected: usize, actual: usize },

    /// A submitted item's stored question index disagrees with its position.
    MisorderedItem { index: usize },

    /// A submission flagged as submitted is missing its submission date.
    MissingSubmissionDate,
}

impl fmt::Display for ExamStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamStateError::AlreadyStarted => {
                write!(f, "the exam attempt has already been started")
            }
            ExamStateError::NotStarted => write!(f, "the exam attempt has not been started"),
            ExamStateError::AlreadySubmitted => write!(f, "the exam has already been submitted"),
            ExamStateError::NotSubmitted => write!(f, "the exam has not been submitted yet"),
            ExamStateError::IndexOutOfRange { index, len } => write!(
                f,
                "question index {} is out of range for an exam with {} items",
                index, len
            ),
            ExamStateError::AnswerKindMismatch { index } => write!(
                f,
                "the answer at index {} does not match the question type",
                index
            ),
            ExamStateError::ItemCountMismatch { expected, actual } => write!(
                f,
                "expected {} submitted items, found {}",
                expected, actual
            ),
            ExamStateError::MisorderedItem { index } => write!(
                f,
                "submitted item at position {} carries a different question index",
                index
            ),
            ExamStateError::MissingSubmissionDate => {
                write!(f, "a submitted exam must carry a submission date")
            }
        }
    }
}

impl std::error::Error for ExamStateError {}
