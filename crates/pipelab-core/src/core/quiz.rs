use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// Result of grading one quiz attempt. `score` is the rounded percentage of
/// correct answers; it and `graded_at` are what mastery tracking consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizGrade {
    pub correct: usize,
    pub total: usize,
    pub score: u8,
    pub graded_at: DateTime<Utc>,
}

pub fn grade(questions: &[QuizQuestion], answers: &[usize]) -> QuizGrade {
    grade_at(questions, answers, Utc::now())
}

/// Grades `answers` positionally against `questions`. Missing answers count as
/// wrong and extra answers are ignored; an empty quiz scores zero.
pub fn grade_at(questions: &[QuizQuestion], answers: &[usize], graded_at: DateTime<Utc>) -> QuizGrade {
    let total = questions.len();
    let correct = questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.correct_index == **answer)
        .count();
    QuizGrade {
        correct,
        total,
        score: percentage(correct, total),
        graded_at,
    }
}

pub fn percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = correct.min(total) as f64 / total as f64;
    (ratio * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn question(correct_index: usize) -> QuizQuestion {
        QuizQuestion {
            prompt: "Which metric reports per-residue confidence?".to_string(),
            options: vec!["pLDDT".into(), "PAE".into(), "RMSD".into()],
            correct_index,
        }
    }

    #[test]
    fn all_correct_scores_one_hundred() {
        let questions = vec![question(0), question(2)];
        let result = grade(&questions, &[0, 2]);
        assert_eq!(result.correct, 2);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn score_is_rounded_percentage() {
        let questions = vec![question(0), question(0), question(0)];
        assert_eq!(grade(&questions, &[0, 0, 1]).score, 67);
        assert_eq!(grade(&questions, &[0, 1, 1]).score, 33);
    }

    #[test]
    fn half_percent_rounds_up() {
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(7, 8), 88);
    }

    #[test]
    fn missing_answers_count_as_wrong_and_extras_are_ignored() {
        let questions = vec![question(1), question(1)];
        assert_eq!(grade(&questions, &[1]).score, 50);
        assert_eq!(grade(&questions, &[1, 1, 0, 0]).score, 100);
    }

    #[test]
    fn empty_quiz_scores_zero() {
        let result = grade(&[], &[]);
        assert_eq!(result.total, 0);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn grade_at_uses_supplied_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
        let result = grade_at(&[question(0)], &[0], at);
        assert_eq!(result.graded_at, at);
    }
}
