use super::config::ProgressionConfig;
use super::error::{EngineError, require_non_empty};
use super::store::MasteryStore;
use crate::core::mastery::level::SkillLevel;
use crate::core::mastery::record::MasteryRecord;
use crate::core::mastery::rules::next_level;
use crate::core::quiz::QuizGrade;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Notification that a user moved up one level on a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUp {
    pub user_id: String,
    pub module_id: String,
    pub from: SkillLevel,
    pub to: SkillLevel,
}

/// Sole writer of [`MasteryRecord`]s.
///
/// The `record_*` operations create the record on first use and are idempotent
/// per distinct value. [`ProgressionEngine::evaluate`] considers only the
/// transition out of the current level, so a single call promotes at most one
/// level. The `on_*` handlers record a signal and evaluate in one step, logging
/// and swallowing storage failures so the triggering action never fails because
/// of tracking.
pub struct ProgressionEngine<S: MasteryStore> {
    store: S,
    config: ProgressionConfig,
}

impl<S: MasteryStore> ProgressionEngine<S> {
    pub fn new(store: S, config: ProgressionConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn record(&self, user_id: &str, module_id: &str) -> Result<Option<MasteryRecord>, EngineError> {
        let user_id = require_non_empty(user_id, "user_id")?;
        let module_id = require_non_empty(module_id, "module_id")?;
        Ok(self.store.get(user_id, module_id)?)
    }

    pub fn summary(&self, user_id: &str) -> Result<Vec<MasteryRecord>, EngineError> {
        let user_id = require_non_empty(user_id, "user_id")?;
        Ok(self.store.list_for_user(user_id)?)
    }

    pub fn record_concept_explored(
        &self,
        user_id: &str,
        module_id: &str,
        concept: &str,
    ) -> Result<MasteryRecord, EngineError> {
        let concept = require_non_empty(concept, "concept")?;
        self.update(user_id, module_id, |record| record.explore_concept(concept))
    }

    pub fn record_insight_unlocked(
        &self,
        user_id: &str,
        module_id: &str,
        insight: &str,
    ) -> Result<MasteryRecord, EngineError> {
        let insight = require_non_empty(insight, "insight")?;
        self.update(user_id, module_id, |record| record.unlock_insight(insight))
    }

    pub fn record_exercise_completed(
        &self,
        user_id: &str,
        module_id: &str,
        exercise_id: &str,
    ) -> Result<MasteryRecord, EngineError> {
        let exercise_id = require_non_empty(exercise_id, "exercise_id")?;
        self.update(user_id, module_id, |record| record.complete_exercise(exercise_id))
    }

    pub fn record_question_asked(&self, user_id: &str, module_id: &str) -> Result<MasteryRecord, EngineError> {
        self.update(user_id, module_id, |record| {
            record.ask_question();
            true
        })
    }

    pub fn record_quiz_score(
        &self,
        user_id: &str,
        module_id: &str,
        grade: &QuizGrade,
    ) -> Result<MasteryRecord, EngineError> {
        self.update(user_id, module_id, |record| {
            record.record_quiz(grade);
            true
        })
    }

    /// Promotes the record by at most one level and returns the new level, or
    /// `None` when no record exists or the next transition is not yet earned.
    pub fn evaluate(&self, user_id: &str, module_id: &str) -> Result<Option<SkillLevel>, EngineError> {
        let user_id = require_non_empty(user_id, "user_id")?;
        let module_id = require_non_empty(module_id, "module_id")?;

        let Some(mut record) = self.store.get(user_id, module_id)? else {
            debug!(user_id, module_id, "No mastery record yet; nothing to evaluate.");
            return Ok(None);
        };
        let Some(target) = next_level(&record, &self.config.thresholds) else {
            return Ok(None);
        };
        let from = record.skill_level();
        if !record.promote_to(target) {
            return Ok(None);
        }
        self.store.upsert(&record)?;
        info!(user_id, module_id, %from, to = %target, "Skill level advanced.");
        Ok(Some(target))
    }

    pub fn on_question_answered(&self, user_id: &str, module_id: &str) -> Option<LevelUp> {
        self.track(user_id, module_id, "question answered", |engine| {
            engine.record_question_asked(user_id, module_id).map(|_| ())
        })
    }

    pub fn on_concept_explored(&self, user_id: &str, module_id: &str, concept: &str) -> Option<LevelUp> {
        self.track(user_id, module_id, "concept explored", |engine| {
            engine
                .record_concept_explored(user_id, module_id, concept)
                .map(|_| ())
        })
    }

    pub fn on_insight_unlocked(&self, user_id: &str, module_id: &str, insight: &str) -> Option<LevelUp> {
        self.track(user_id, module_id, "insight unlocked", |engine| {
            engine
                .record_insight_unlocked(user_id, module_id, insight)
                .map(|_| ())
        })
    }

    pub fn on_exercise_completed(&self, user_id: &str, module_id: &str, exercise_id: &str) -> Option<LevelUp> {
        self.track(user_id, module_id, "exercise completed", |engine| {
            engine
                .record_exercise_completed(user_id, module_id, exercise_id)
                .map(|_| ())
        })
    }

    pub fn on_quiz_graded(&self, user_id: &str, module_id: &str, grade: &QuizGrade) -> Option<LevelUp> {
        self.track(user_id, module_id, "quiz graded", |engine| {
            engine.record_quiz_score(user_id, module_id, grade).map(|_| ())
        })
    }

    fn track(
        &self,
        user_id: &str,
        module_id: &str,
        event: &'static str,
        record_signal: impl FnOnce(&Self) -> Result<(), EngineError>,
    ) -> Option<LevelUp> {
        if let Err(e) = record_signal(self) {
            warn!(user_id, module_id, event, error = %e, "Failed to record learning signal.");
            return None;
        }
        let from = match self.store.get(user_id.trim(), module_id.trim()) {
            Ok(Some(record)) => record.skill_level(),
            Ok(None) => SkillLevel::Novice,
            Err(e) => {
                warn!(user_id, module_id, event, error = %e, "Failed to read mastery record.");
                return None;
            }
        };
        match self.evaluate(user_id, module_id) {
            Ok(Some(to)) => Some(LevelUp {
                user_id: user_id.trim().to_string(),
                module_id: module_id.trim().to_string(),
                from,
                to,
            }),
            Ok(None) => None,
            Err(e) => {
                warn!(user_id, module_id, event, error = %e, "Failed to evaluate progression.");
                None
            }
        }
    }

    /// Read-modify-write of one record. The record is created when absent and
    /// written back when it is new or `apply` reports a change.
    fn update(
        &self,
        user_id: &str,
        module_id: &str,
        apply: impl FnOnce(&mut MasteryRecord) -> bool,
    ) -> Result<MasteryRecord, EngineError> {
        let user_id = require_non_empty(user_id, "user_id")?;
        let module_id = require_non_empty(module_id, "module_id")?;

        let (mut record, created) = match self.store.get(user_id, module_id)? {
            Some(existing) => (existing, false),
            None => {
                debug!(user_id, module_id, "Creating mastery record.");
                (MasteryRecord::new(user_id, module_id), true)
            }
        };
        let changed = apply(&mut record);
        if created || changed {
            self.store.upsert(&record)?;
        }
        Ok(record)
    }
}
