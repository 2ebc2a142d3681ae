// src/models/exam.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ClientError, ExamStateError};
use crate::services::ExamService;
use crate::session::Session;

/// One question within an exam, identified by its position in the exam's
/// item list rather than by a stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ExamItem {
    Open {
        question: String,
    },
    MultipleChoice {
        question: String,
        options: Vec<String>,
    },
    TrueFalse {
        question: String,
    },
    MultipleSelect {
        question: String,
        options: Vec<String>,
    },
}

impl ExamItem {
    /// The tag this item carries on the wire.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ExamItem::Open { .. } => "open",
            ExamItem::MultipleChoice { .. } => "multiple-choice",
            ExamItem::TrueFalse { .. } => "true-false",
            ExamItem::MultipleSelect { .. } => "multiple-select",
        }
    }

    pub fn question(&self) -> &str {
        match self {
            ExamItem::Open { question }
            | ExamItem::MultipleChoice { question, .. }
            | ExamItem::TrueFalse { question }
            | ExamItem::MultipleSelect { question, .. } => question,
        }
    }
}

/// A student-supplied answer to one exam item.
///
/// The variant must match the variant of the item it answers: a
/// multiple-choice answer holds the selected option index, a
/// multiple-select answer holds one flag per option, and so on. `None`
/// (or an empty string) means the student has not answered yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "answer", rename_all = "kebab-case")]
pub enum ExamItemAnswer {
    Open(String),
    MultipleChoice(Option<usize>),
    TrueFalse(Option<bool>),
    MultipleSelect(Vec<bool>),
}

impl ExamItemAnswer {
    /// The blank answer a fresh attempt starts with for `item`.
    pub fn blank_for(item: &ExamItem) -> Self {
        match item {
            ExamItem::Open { .. } => ExamItemAnswer::Open(String::new()),
            ExamItem::MultipleChoice { .. } => ExamItemAnswer::MultipleChoice(None),
            ExamItem::TrueFalse { .. } => ExamItemAnswer::TrueFalse(None),
            ExamItem::MultipleSelect { options, .. } => {
                ExamItemAnswer::MultipleSelect(vec![false; options.len()])
            }
        }
    }

    /// Whether this answer's variant fits the given item's variant.
    pub fn matches(&self, item: &ExamItem) -> bool {
        matches!(
            (self, item),
            (ExamItemAnswer::Open(_), ExamItem::Open { .. })
                | (ExamItemAnswer::MultipleChoice(_), ExamItem::MultipleChoice { .. })
                | (ExamItemAnswer::TrueFalse(_), ExamItem::TrueFalse { .. })
                | (ExamItemAnswer::MultipleSelect(_), ExamItem::MultipleSelect { .. })
        )
    }

    /// Whether the student has actually answered, as opposed to the blank
    /// default.
    pub fn is_answered(&self) -> bool {
        match self {
            ExamItemAnswer::Open(text) => !text.trim().is_empty(),
            ExamItemAnswer::MultipleChoice(choice) => choice.is_some(),
            ExamItemAnswer::TrueFalse(choice) => choice.is_some(),
            ExamItemAnswer::MultipleSelect(picks) => picks.iter().any(|picked| *picked),
        }
    }
}

/// One answered (or still blank) item inside a submission.
///
/// `correct` is only ever populated during teacher review; students never
/// set it and it is left off the wire until then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedExamItem {
    #[serde(rename = "questionIndex")]
    pub question_index: usize,

    #[serde(flatten)]
    pub answer: ExamItemAnswer,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

/// The full set of a student's answers to an exam, plus submission metadata.
///
/// `submitted` is spelled `submited` on the wire; the backend has always
/// used that spelling and every stored submission carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSubmission {
    pub items: Vec<SubmittedExamItem>,

    #[serde(rename = "submited")]
    pub submitted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_date: Option<DateTime<Utc>>,
}

impl ExamSubmission {
    /// A fresh, unsubmitted submission with one blank answer per item.
    pub fn blank(items: &[ExamItem]) -> Self {
        Self {
            items: items
                .iter()
                .enumerate()
                .map(|(index, item)| SubmittedExamItem {
                    question_index: index,
                    answer: ExamItemAnswer::blank_for(item),
                    correct: None,
                })
                .collect(),
            submitted: false,
            due_date: None,
            submission_date: None,
        }
    }

    /// Checks this submission against the exam it claims to answer:
    /// item counts match, items are stored in question order, every answer
    /// variant fits its question variant, and a submitted submission
    /// carries its submission date.
    pub fn conforms_to(&self, items: &[ExamItem]) -> Result<(), ExamStateError> {
        if self.items.len() != items.len() {
            return Err(ExamStateError::ItemCountMismatch {
                expected: items.len(),
                actual: self.items.len(),
            });
        }
        for (index, (entry, item)) in self.items.iter().zip(items).enumerate() {
            if entry.question_index != index {
                return Err(ExamStateError::MisorderedItem { index });
            }
            if !entry.answer.matches(item) {
                return Err(ExamStateError::AnswerKindMismatch { index });
            }
        }
        if self.submitted && self.submission_date.is_none() {
            return Err(ExamStateError::MissingSubmissionDate);
        }
        Ok(())
    }
}

/// DTO for creating a new exam (teacher role).
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateExamRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title length must be between 1 and 200 characters."
    ))]
    pub title: String,

    #[serde(rename = "dueDate")]
    pub due_date: DateTime<Utc>,

    #[validate(custom(function = validate_items))]
    pub items: Vec<ExamItem>,
}

fn validate_items(items: &[ExamItem]) -> Result<(), validator::ValidationError> {
    if items.is_empty() {
        return Err(validator::ValidationError::new("items_cannot_be_empty"));
    }
    for item in items {
        if let ExamItem::MultipleChoice { options, .. } | ExamItem::MultipleSelect { options, .. } =
            item
        {
            if options.len() < 2 {
                return Err(validator::ValidationError::new("choice_needs_two_options"));
            }
        }
    }
    Ok(())
}

/// Where an attempt sits in its lifecycle. Transitions only move forward:
/// `NotStarted → InProgress → Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    NotStarted,
    InProgress,
    Submitted,
}

/// A student's in-memory attempt at one exam.
///
/// The attempt owns the item list and the evolving submission. Edits are
/// local until `submit` sends everything in one call; after that the
/// attempt is read-only for the student, and only the teacher-review
/// overlay (`set_correct_answer`) may still write to it.
#[derive(Debug, Clone)]
pub struct ExamAttempt {
    course_id: i64,
    exam_id: i64,
    items: Vec<ExamItem>,
    submission: ExamSubmission,
    phase: AttemptPhase,
}

impl ExamAttempt {
    /// A fresh attempt with blank answers, waiting for the student to
    /// confirm the start.
    pub fn new(
        course_id: i64,
        exam_id: i64,
        items: Vec<ExamItem>,
        due_date: Option<DateTime<Utc>>,
    ) -> Self {
        let mut submission = ExamSubmission::blank(&items);
        submission.due_date = due_date;
        Self {
            course_id,
            exam_id,
            items,
            submission,
            phase: AttemptPhase::NotStarted,
        }
    }

    /// Rebuilds an attempt around a submission fetched from the backend.
    ///
    /// A submitted submission resumes read-only. An unsubmitted one resumes
    /// as not yet started: local edits are never persisted remotely, so
    /// whatever the student typed before navigating away is gone and the
    /// start confirmation applies again.
    pub fn resume(
        course_id: i64,
        exam_id: i64,
        items: Vec<ExamItem>,
        submission: ExamSubmission,
    ) -> Result<Self, ExamStateError> {
        submission.conforms_to(&items)?;
        let phase = if submission.submitted {
            AttemptPhase::Submitted
        } else {
            AttemptPhase::NotStarted
        };
        Ok(Self {
            course_id,
            exam_id,
            items,
            submission,
            phase,
        })
    }

    /// Confirms the start of the exam. One-way: once started, an attempt
    /// can never return to `NotStarted`.
    pub fn start(&mut self) -> Result<(), ExamStateError> {
        match self.phase {
            AttemptPhase::NotStarted => {
                self.phase = AttemptPhase::InProgress;
                Ok(())
            }
            AttemptPhase::InProgress | AttemptPhase::Submitted => {
                Err(ExamStateError::AlreadyStarted)
            }
        }
    }

    /// Replaces the answer at `index`, leaving every other item untouched.
    ///
    /// Requires an attempt in progress, an index within the exam, and an
    /// answer variant matching the question variant at that index.
    pub fn set_student_answer(
        &mut self,
        index: usize,
        answer: ExamItemAnswer,
    ) -> Result<(), ExamStateError> {
        match self.phase {
            AttemptPhase::NotStarted => return Err(ExamStateError::NotStarted),
            AttemptPhase::Submitted => return Err(ExamStateError::AlreadySubmitted),
            AttemptPhase::InProgress => {}
        }
        let item = self
            .items
            .get(index)
            .ok_or(ExamStateError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })?;
        if !answer.matches(item) {
            return Err(ExamStateError::AnswerKindMismatch { index });
        }
        self.submission.items[index].answer = answer;
        Ok(())
    }

    /// Overlays a correctness judgment at `index` (teacher review).
    /// Only a submitted attempt can be reviewed.
    pub fn set_correct_answer(&mut self, index: usize, correct: bool) -> Result<(), ExamStateError> {
        if self.phase != AttemptPhase::Submitted {
            return Err(ExamStateError::NotSubmitted);
        }
        let len = self.submission.items.len();
        let entry = self
            .submission
            .items
            .get_mut(index)
            .ok_or(ExamStateError::IndexOutOfRange { index, len })?;
        entry.correct = Some(correct);
        Ok(())
    }

    /// Sends the full answer sequence to the backend in one call.
    ///
    /// On success the attempt becomes `Submitted` and records the
    /// submission date; that is terminal for the student. On failure the
    /// local state is left untouched so the student can retry.
    pub async fn submit(
        &mut self,
        service: &dyn ExamService,
        session: &Session,
    ) -> Result<(), ClientError> {
        match self.phase {
            AttemptPhase::NotStarted => return Err(ExamStateError::NotStarted.into()),
            AttemptPhase::Submitted => return Err(ExamStateError::AlreadySubmitted.into()),
            AttemptPhase::InProgress => {}
        }
        service
            .submit_exam(session, self.course_id, self.exam_id, &self.submission.items)
            .await?;
        self.submission.submitted = true;
        self.submission.submission_date = Some(Utc::now());
        self.phase = AttemptPhase::Submitted;
        Ok(())
    }

    pub fn phase(&self) -> AttemptPhase {
        self.phase
    }

    pub fn course_id(&self) -> i64 {
        self.course_id
    }

    pub fn exam_id(&self) -> i64 {
        self.exam_id
    }

    pub fn items(&self) -> &[ExamItem] {
        &self.items
    }

    pub fn submission(&self) -> &ExamSubmission {
        &self.submission
    }

    /// How many items the student has answered so far.
    pub fn answered_count(&self) -> usize {
        self.submission
            .items
            .iter()
            .filter(|entry| entry.answer.is_answered())
            .count()
    }
}
