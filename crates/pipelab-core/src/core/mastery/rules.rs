use super::level::SkillLevel;
use super::record::MasteryRecord;
use serde::{Deserialize, Serialize};

/// Demonstrated competence: a quiz score at or above `min_quiz_score`, or at
/// least `min_exercises` completed exercises. Either one suffices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct EvidenceGate {
    pub min_quiz_score: u8,
    pub min_exercises: usize,
}

impl EvidenceGate {
    fn is_met(&self, record: &MasteryRecord) -> bool {
        record
            .last_quiz_score()
            .is_some_and(|score| score >= self.min_quiz_score)
            || record.exercises_completed().len() >= self.min_exercises
    }
}

/// Conditions for leaving one level for the next. All must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TransitionRule {
    pub min_questions: u32,
    pub min_concepts: usize,
    pub evidence: Option<EvidenceGate>,
}

impl TransitionRule {
    pub fn is_satisfied_by(&self, record: &MasteryRecord) -> bool {
        record.questions_asked() >= self.min_questions
            && record.concepts_explored().len() >= self.min_concepts
            && self.evidence.is_none_or(|gate| gate.is_met(record))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProgressionThresholds {
    pub to_beginner: TransitionRule,
    pub to_intermediate: TransitionRule,
    pub to_advanced: TransitionRule,
}

impl Default for ProgressionThresholds {
    fn default() -> Self {
        Self {
            to_beginner: TransitionRule {
                min_questions: 3,
                min_concepts: 1,
                evidence: None,
            },
            to_intermediate: TransitionRule {
                min_questions: 0,
                min_concepts: 5,
                evidence: Some(EvidenceGate {
                    min_quiz_score: 70,
                    min_exercises: 1,
                }),
            },
            to_advanced: TransitionRule {
                min_questions: 10,
                min_concepts: 8,
                evidence: Some(EvidenceGate {
                    min_quiz_score: 85,
                    min_exercises: 2,
                }),
            },
        }
    }
}

impl ProgressionThresholds {
    /// The rule guarding the way out of `level`, if there is one.
    pub fn rule_from(&self, level: SkillLevel) -> Option<&TransitionRule> {
        match level {
            SkillLevel::Novice => Some(&self.to_beginner),
            SkillLevel::Beginner => Some(&self.to_intermediate),
            SkillLevel::Intermediate => Some(&self.to_advanced),
            SkillLevel::Advanced => None,
        }
    }
}

/// The level `record` qualifies for next, looking only one step above its
/// current level. Never skips a level, never returns a lower one.
pub fn next_level(record: &MasteryRecord, thresholds: &ProgressionThresholds) -> Option<SkillLevel> {
    let current = record.skill_level();
    let rule = thresholds.rule_from(current)?;
    if rule.is_satisfied_by(record) {
        current.next()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quiz::QuizGrade;
    use chrono::Utc;

    fn record_with(questions: u32, concepts: usize, exercises: usize) -> MasteryRecord {
        let mut record = MasteryRecord::new("u", "m");
        for _ in 0..questions {
            record.ask_question();
        }
        for i in 0..concepts {
            record.explore_concept(&format!("concept-{i}"));
        }
        for i in 0..exercises {
            record.complete_exercise(&format!("exercise-{i}"));
        }
        record
    }

    fn grade(score: u8) -> QuizGrade {
        QuizGrade {
            correct: score as usize,
            total: 100,
            score,
            graded_at: Utc::now(),
        }
    }

    #[test]
    fn novice_needs_three_questions_and_one_concept() {
        let thresholds = ProgressionThresholds::default();
        assert_eq!(next_level(&record_with(2, 1, 0), &thresholds), None);
        assert_eq!(next_level(&record_with(3, 0, 0), &thresholds), None);
        assert_eq!(
            next_level(&record_with(3, 1, 0), &thresholds),
            Some(SkillLevel::Beginner)
        );
    }

    #[test]
    fn beginner_needs_five_concepts_and_quiz_or_exercise() {
        let thresholds = ProgressionThresholds::default();
        let mut record = record_with(0, 5, 0);
        record.promote_to(SkillLevel::Beginner);
        assert_eq!(next_level(&record, &thresholds), None);

        record.record_quiz(&grade(69));
        assert_eq!(next_level(&record, &thresholds), None);

        record.record_quiz(&grade(70));
        assert_eq!(next_level(&record, &thresholds), Some(SkillLevel::Intermediate));

        let mut by_exercise = record_with(0, 5, 1);
        by_exercise.promote_to(SkillLevel::Beginner);
        assert_eq!(
            next_level(&by_exercise, &thresholds),
            Some(SkillLevel::Intermediate)
        );
    }

    #[test]
    fn intermediate_needs_questions_concepts_and_strong_evidence() {
        let thresholds = ProgressionThresholds::default();
        let mut record = record_with(10, 8, 1);
        record.promote_to(SkillLevel::Intermediate);
        assert_eq!(next_level(&record, &thresholds), None);

        record.complete_exercise("another");
        assert_eq!(next_level(&record, &thresholds), Some(SkillLevel::Advanced));

        let mut quiz_path = record_with(10, 8, 0);
        quiz_path.promote_to(SkillLevel::Intermediate);
        quiz_path.record_quiz(&grade(85));
        assert_eq!(next_level(&quiz_path, &thresholds), Some(SkillLevel::Advanced));

        let mut too_few_questions = record_with(9, 8, 2);
        too_few_questions.promote_to(SkillLevel::Intermediate);
        assert_eq!(next_level(&too_few_questions, &thresholds), None);
    }

    #[test]
    fn only_one_level_is_considered_per_evaluation() {
        let thresholds = ProgressionThresholds::default();
        let record = record_with(20, 10, 5);
        assert_eq!(next_level(&record, &thresholds), Some(SkillLevel::Beginner));
    }

    #[test]
    fn advanced_has_no_next_level() {
        let thresholds = ProgressionThresholds::default();
        let mut record = record_with(50, 50, 50);
        record.promote_to(SkillLevel::Advanced);
        assert_eq!(next_level(&record, &thresholds), None);
    }
}
