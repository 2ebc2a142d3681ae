use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Handle to a file the student attached to a submission.
/// Upload mechanics live elsewhere; the model only carries the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    pub name: String,
    pub url: String,
}

/// A student's submission for a course activity.
///
/// Same wire quirk as exams: `submitted` is spelled `submited` by the
/// backend. An activity can be marked delivered without an attachment, so
/// the response file stays optional; the submission date is always present
/// once the activity has been submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySubmission {
    #[serde(rename = "submited")]
    pub submitted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_file: Option<FileReference>,
}

impl ActivitySubmission {
    /// The state of an activity the student has not delivered yet.
    pub fn blank() -> Self {
        Self {
            submitted: false,
            submission_date: None,
            response_file: None,
        }
    }

    /// A submission stamped at `now`, optionally carrying an attachment.
    pub fn delivered_at(now: DateTime<Utc>, response_file: Option<FileReference>) -> Self {
        Self {
            submitted: true,
            submission_date: Some(now),
            response_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_submission_has_no_metadata() {
        let submission = ActivitySubmission::blank();
        assert!(!submission.submitted);
        assert!(submission.submission_date.is_none());
        assert!(submission.response_file.is_none());
    }

    #[test]
    fn test_delivered_submission_is_stamped() {
        let now = Utc::now();
        let file = FileReference {
            name: "informe.pdf".to_string(),
            url: "https://files.example.com/informe.pdf".to_string(),
        };

        let submission = ActivitySubmission::delivered_at(now, Some(file.clone()));
        assert!(submission.submitted);
        assert_eq!(submission.submission_date, Some(now));
        assert_eq!(submission.response_file, Some(file));
    }

    #[test]
    fn test_wire_spelling_and_optional_fields() {
        let value = serde_json::to_value(ActivitySubmission::blank()).unwrap();
        assert_eq!(value["submited"], false);
        assert!(value.get("responseFile").is_none());
        assert!(value.get("submissionDate").is_none());

        let parsed: ActivitySubmission =
            serde_json::from_value(serde_json::json!({ "submited": false })).unwrap();
        assert_eq!(parsed, ActivitySubmission::blank());
    }
}
