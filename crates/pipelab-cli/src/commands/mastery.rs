use crate::cli::{MasteryArgs, MasteryCommands, MasteryTarget};
use crate::config::AppConfig;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::utils::parser;
use pipelab::core::mastery::record::MasteryRecord;
use pipelab::core::quiz::{self, QuizQuestion};
use pipelab::engine::config::ProgressionConfig;
use pipelab::engine::progression::{LevelUp, ProgressionEngine};
use pipelab::engine::store::JsonFileMasteryStore;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

type Engine = ProgressionEngine<JsonFileMasteryStore>;

pub fn run(args: MasteryArgs, config: &AppConfig) -> Result<()> {
    let store_path = match &args.store {
        Some(path) => path.clone(),
        None => DataManager::new()?.mastery_store_path(config.store_path.as_deref()),
    };
    info!("Using mastery store at {:?}", &store_path);
    let engine = ProgressionEngine::new(
        JsonFileMasteryStore::open(&store_path)?,
        ProgressionConfig::default(),
    );
    execute(&engine, args.command)
}

fn execute(engine: &Engine, command: MasteryCommands) -> Result<()> {
    match command {
        MasteryCommands::Explore { target, concept } => {
            let level_up = engine.on_concept_explored(&target.user, &target.module, &concept);
            report(engine, &target, level_up)
        }
        MasteryCommands::Insight { target, insight } => {
            let level_up = engine.on_insight_unlocked(&target.user, &target.module, &insight);
            report(engine, &target, level_up)
        }
        MasteryCommands::Exercise { target, exercise } => {
            let level_up = engine.on_exercise_completed(&target.user, &target.module, &exercise);
            report(engine, &target, level_up)
        }
        MasteryCommands::Question { target } => {
            let level_up = engine.on_question_answered(&target.user, &target.module);
            report(engine, &target, level_up)
        }
        MasteryCommands::Quiz {
            target,
            file,
            answers,
        } => {
            let questions = load_quiz(&file)?;
            let answers =
                parser::parse_answers(&answers).map_err(|e| CliError::Argument(e.to_string()))?;
            let grade = quiz::grade(&questions, &answers);
            println!(
                "Quiz score: {}% ({}/{} correct)",
                grade.score, grade.correct, grade.total
            );
            let level_up = engine.on_quiz_graded(&target.user, &target.module, &grade);
            report(engine, &target, level_up)
        }
        MasteryCommands::Evaluate { target } => {
            match engine.evaluate(&target.user, &target.module)? {
                Some(level) => println!("🎉 {} reached {} on {}.", target.user, level, target.module),
                None => println!("No level change."),
            }
            show_one(engine, &target.user, &target.module)
        }
        MasteryCommands::Show { user, module } => match module {
            Some(module) => show_one(engine, &user, &module),
            None => {
                let records = engine.summary(&user)?;
                if records.is_empty() {
                    println!("No mastery records for {}.", user);
                }
                for record in &records {
                    print!("{}", render(record));
                }
                Ok(())
            }
        },
    }
}

fn report(engine: &Engine, target: &MasteryTarget, level_up: Option<LevelUp>) -> Result<()> {
    if let Some(LevelUp { from, to, .. }) = level_up {
        println!("🎉 Level up on {}: {} → {}", target.module, from, to);
    }
    show_one(engine, &target.user, &target.module)
}

fn show_one(engine: &Engine, user: &str, module: &str) -> Result<()> {
    match engine.record(user.trim(), module.trim())? {
        Some(record) => print!("{}", render(&record)),
        None => println!("No mastery record for {} on {}.", user, module),
    }
    Ok(())
}

fn render(record: &MasteryRecord) -> String {
    let quiz = match (record.last_quiz_score(), record.last_quiz_at()) {
        (Some(score), Some(at)) => format!("{}% on {}", score, at.format("%Y-%m-%d %H:%M UTC")),
        (Some(score), None) => format!("{}%", score),
        _ => "-".to_string(),
    };
    format!(
        "{} / {}: {}\n  Questions: {}\n  Concepts:  {}\n  Insights:  {}\n  Exercises: {}\n  Last quiz: {}\n",
        record.user_id(),
        record.module_id(),
        record.skill_level(),
        record.questions_asked(),
        join_or_dash(record.concepts_explored()),
        join_or_dash(record.insights_unlocked()),
        join_or_dash(record.exercises_completed()),
        quiz,
    )
}

fn join_or_dash<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    let joined = items.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ");
    if joined.is_empty() { "-".to_string() } else { joined }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct QuizFile {
    #[serde(rename = "question", default)]
    questions: Vec<FileQuizQuestion>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileQuizQuestion {
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
}

fn load_quiz(path: &Path) -> Result<Vec<QuizQuestion>> {
    let content = std::fs::read_to_string(path)?;
    let file: QuizFile = toml::from_str(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    file.questions
        .into_iter()
        .map(|q| {
            if q.correct_index >= q.options.len() {
                return Err(CliError::FileParsing {
                    path: path.to_path_buf(),
                    source: anyhow::anyhow!(
                        "question '{}' has correct-index {} but only {} option(s)",
                        q.prompt,
                        q.correct_index,
                        q.options.len()
                    ),
                });
            }
            Ok(QuizQuestion {
                prompt: q.prompt,
                options: q.options,
                correct_index: q.correct_index,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipelab::core::mastery::level::SkillLevel;
    use tempfile::tempdir;

    fn target() -> MasteryTarget {
        MasteryTarget {
            user: "ada".to_string(),
            module: "esmfold".to_string(),
        }
    }

    fn engine_at(path: &Path) -> Engine {
        ProgressionEngine::new(
            JsonFileMasteryStore::open(path).unwrap(),
            ProgressionConfig::default(),
        )
    }

    #[test]
    fn commands_persist_and_promote() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mastery.json");
        let engine = engine_at(&path);

        execute(&engine, MasteryCommands::Explore { target: target(), concept: "plddt".into() }).unwrap();
        for _ in 0..3 {
            execute(&engine, MasteryCommands::Question { target: target() }).unwrap();
        }

        let reopened = engine_at(&path);
        let record = reopened.record("ada", "esmfold").unwrap().unwrap();
        assert_eq!(record.skill_level(), SkillLevel::Beginner);
        assert_eq!(record.questions_asked(), 3);
    }

    #[test]
    fn quiz_file_is_loaded_and_checked() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(
            &path,
            r#"
            [[question]]
            prompt = "What does pLDDT estimate?"
            options = ["Local confidence", "Binding energy"]
            correct-index = 0

            [[question]]
            prompt = "Which format does ESMFold read?"
            options = ["PDB", "FASTA"]
            correct-index = 1
            "#,
        )
        .unwrap();
        let questions = load_quiz(&path).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(quiz::grade(&questions, &[0, 1]).score, 100);

        std::fs::write(
            &path,
            "[[question]]\nprompt = \"q\"\noptions = [\"a\"]\ncorrect-index = 3\n",
        )
        .unwrap();
        assert!(matches!(load_quiz(&path), Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn render_shows_level_and_signals() {
        let dir = tempdir().unwrap();
        let engine = engine_at(&dir.path().join("mastery.json"));
        engine.record_concept_explored("ada", "esmfold", "msa").unwrap();
        let record = engine.record("ada", "esmfold").unwrap().unwrap();
        let text = render(&record);
        assert!(text.starts_with("ada / esmfold: NOVICE"));
        assert!(text.contains("Concepts:  msa"));
        assert!(text.contains("Last quiz: -"));
    }
}
