use super::level::SkillLevel;
use crate::core::quiz::QuizGrade;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Learning signals accumulated by one user for one module.
///
/// Signal sets are deduplicated and keep first-insertion order for display. The
/// question counter only grows. The skill level only moves forward, and only
/// through [`MasteryRecord::promote_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryRecord {
    user_id: String,
    module_id: String,
    skill_level: SkillLevel,
    concepts_explored: IndexSet<String>,
    insights_unlocked: IndexSet<String>,
    questions_asked: u32,
    exercises_completed: IndexSet<String>,
    last_quiz_score: Option<u8>,
    last_quiz_at: Option<DateTime<Utc>>,
}

impl MasteryRecord {
    pub fn new(user_id: impl Into<String>, module_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            module_id: module_id.into(),
            skill_level: SkillLevel::Novice,
            concepts_explored: IndexSet::new(),
            insights_unlocked: IndexSet::new(),
            questions_asked: 0,
            exercises_completed: IndexSet::new(),
            last_quiz_score: None,
            last_quiz_at: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn skill_level(&self) -> SkillLevel {
        self.skill_level
    }

    pub fn concepts_explored(&self) -> &IndexSet<String> {
        &self.concepts_explored
    }

    pub fn insights_unlocked(&self) -> &IndexSet<String> {
        &self.insights_unlocked
    }

    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    pub fn exercises_completed(&self) -> &IndexSet<String> {
        &self.exercises_completed
    }

    pub fn last_quiz_score(&self) -> Option<u8> {
        self.last_quiz_score
    }

    pub fn last_quiz_at(&self) -> Option<DateTime<Utc>> {
        self.last_quiz_at
    }

    pub(crate) fn explore_concept(&mut self, concept: &str) -> bool {
        self.concepts_explored.insert(concept.to_string())
    }

    pub(crate) fn unlock_insight(&mut self, insight: &str) -> bool {
        self.insights_unlocked.insert(insight.to_string())
    }

    pub(crate) fn complete_exercise(&mut self, exercise_id: &str) -> bool {
        self.exercises_completed.insert(exercise_id.to_string())
    }

    pub(crate) fn ask_question(&mut self) {
        self.questions_asked = self.questions_asked.saturating_add(1);
    }

    pub(crate) fn record_quiz(&mut self, grade: &QuizGrade) {
        self.last_quiz_score = Some(grade.score);
        self.last_quiz_at = Some(grade.graded_at);
    }

    /// Moves the level forward. Returns `false` and leaves the record untouched
    /// when `level` is not above the current one.
    pub(crate) fn promote_to(&mut self, level: SkillLevel) -> bool {
        if level > self.skill_level {
            self.skill_level = level;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fresh_record_starts_empty_at_novice() {
        let record = MasteryRecord::new("ada", "esmfold");
        assert_eq!(record.user_id(), "ada");
        assert_eq!(record.module_id(), "esmfold");
        assert_eq!(record.skill_level(), SkillLevel::Novice);
        assert!(record.concepts_explored().is_empty());
        assert_eq!(record.questions_asked(), 0);
        assert_eq!(record.last_quiz_score(), None);
    }

    #[test]
    fn signal_sets_deduplicate_by_value() {
        let mut record = MasteryRecord::new("ada", "esmfold");
        assert!(record.explore_concept("plddt"));
        assert!(!record.explore_concept("plddt"));
        assert!(record.unlock_insight("low plddt is disorder"));
        assert!(!record.unlock_insight("low plddt is disorder"));
        assert!(record.complete_exercise("ex-1"));
        assert!(!record.complete_exercise("ex-1"));
        assert_eq!(record.concepts_explored().len(), 1);
        assert_eq!(record.insights_unlocked().len(), 1);
        assert_eq!(record.exercises_completed().len(), 1);
    }

    #[test]
    fn concepts_keep_first_insertion_order() {
        let mut record = MasteryRecord::new("ada", "esmfold");
        for concept in ["msa", "plddt", "msa", "pae"] {
            record.explore_concept(concept);
        }
        let ordered: Vec<_> = record.concepts_explored().iter().map(String::as_str).collect();
        assert_eq!(ordered, vec!["msa", "plddt", "pae"]);
    }

    #[test]
    fn promotion_never_moves_backwards() {
        let mut record = MasteryRecord::new("ada", "esmfold");
        assert!(record.promote_to(SkillLevel::Intermediate));
        assert!(!record.promote_to(SkillLevel::Beginner));
        assert!(!record.promote_to(SkillLevel::Intermediate));
        assert_eq!(record.skill_level(), SkillLevel::Intermediate);
    }

    #[test]
    fn quiz_grade_overwrites_previous_score() {
        let mut record = MasteryRecord::new("ada", "esmfold");
        let first = QuizGrade {
            correct: 9,
            total: 10,
            score: 90,
            graded_at: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
        };
        let second = QuizGrade {
            correct: 1,
            total: 2,
            score: 50,
            graded_at: Utc.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap(),
        };
        record.record_quiz(&first);
        record.record_quiz(&second);
        assert_eq!(record.last_quiz_score(), Some(50));
        assert_eq!(record.last_quiz_at(), Some(second.graded_at));
    }

    #[test]
    fn serde_round_trip_preserves_sets() {
        let mut record = MasteryRecord::new("ada", "esmfold");
        record.explore_concept("b");
        record.explore_concept("a");
        record.ask_question();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"skillLevel\":\"NOVICE\""));
        let restored: MasteryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }
}
