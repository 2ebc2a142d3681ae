// src/utils/labels.rs

use once_cell::sync::Lazy;

use crate::utils::bimap::BiMap;

/// Spanish display labels for question types, paired with the tags the
/// backend understands. Built once from a static pair list.
pub static QUESTION_TYPE_LABELS: Lazy<BiMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("Pregunta abierta", "open"),
        ("Opción múltiple", "multiple-choice"),
        ("Verdadero o falso", "true-false"),
        ("Selección múltiple", "multiple-select"),
    ]
    .into_iter()
    .collect()
});

/// Display labels for boolean answers on true/false questions.
pub static TRUE_FALSE_LABELS: Lazy<BiMap<&'static str, &'static str>> =
    Lazy::new(|| [("Verdadero", "true"), ("Falso", "false")].into_iter().collect());

/// Display label for a question-type tag.
/// Falls back to showing the raw tag when no label exists.
pub fn question_type_label(tag: &str) -> &str {
    QUESTION_TYPE_LABELS.get_front(tag).copied().unwrap_or(tag)
}

/// Wire tag for a question-type display label, if the label is known.
pub fn question_type_tag(label: &str) -> Option<&'static str> {
    QUESTION_TYPE_LABELS.get_back(label).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        assert_eq!(question_type_label("multiple-choice"), "Opción múltiple");
        assert_eq!(question_type_tag("Opción múltiple"), Some("multiple-choice"));
    }

    #[test]
    fn test_every_item_kind_has_a_label() {
        use crate::models::exam::ExamItem;

        let items = [
            ExamItem::Open {
                question: String::new(),
            },
            ExamItem::MultipleChoice {
                question: String::new(),
                options: vec![],
            },
            ExamItem::TrueFalse {
                question: String::new(),
            },
            ExamItem::MultipleSelect {
                question: String::new(),
                options: vec![],
            },
        ];
        for item in &items {
            // The label table and the wire tags must stay in sync.
            assert_ne!(question_type_label(item.type_tag()), item.type_tag());
        }
    }

    #[test]
    fn test_unknown_tag_falls_back_to_raw_value() {
        assert_eq!(question_type_label("essay"), "essay");
        assert_eq!(question_type_tag("Ensayo"), None);
    }

    #[test]
    fn test_true_false_labels() {
        assert_eq!(TRUE_FALSE_LABELS.get_back("Verdadero"), Some(&"true"));
        assert_eq!(TRUE_FALSE_LABELS.get_front("false"), Some(&"Falso"));
    }
}
