//! The `kuku play` command.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, oneshot};

use kuku_core::facts::fact_table;
use kuku_core::generator::generate_problems;
use kuku_core::levels::{final_level, find_level};
use kuku_core::model::{LevelConfig, ProblemInstance, QuestionType};
use kuku_core::scoring::LevelResult;
use kuku_core::session::{AnswerFeedback, DrillSession};
use kuku_core::time_format::{format_time, format_time_japanese};
use kuku_core::timer::SessionTimer;

use crate::config::load_config_from;
use crate::OutputFormat;

/// Options for one `play` run.
pub struct PlayArgs {
    pub level: Option<u32>,
    pub levels: Option<PathBuf>,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Console output for a drill. In JSON mode everything except the final
/// result goes to stderr so stdout stays machine-readable.
struct ConsoleReporter {
    format: OutputFormat,
}

impl ConsoleReporter {
    fn say(&self, line: impl Display) {
        match self.format {
            OutputFormat::Text => println!("{line}"),
            OutputFormat::Json => eprintln!("{line}"),
        }
    }

    fn on_start(&self, level: &LevelConfig, total: usize) {
        self.say(format_args!("レベル{}: {}", level.id, level.title));
        if !level.description.is_empty() {
            self.say(&level.description);
        }
        self.say(format_args!(
            "{total}問 / 目標 {}  (q でおわる)",
            format_time(i64::from(level.target_time))
        ));
        self.say("");
    }

    fn on_question(&self, instance: &ProblemInstance, total: usize, show_reading: bool) {
        self.say(format_args!(
            "[{}/{}] {}",
            instance.index + 1,
            total,
            question_text(instance)
        ));
        if show_reading {
            self.say(format_args!("      {}", reading_text(instance)));
        }
        self.flush();
    }

    fn on_answer(&self, feedback: &AnswerFeedback) {
        if feedback.attempt.is_correct {
            self.say("  せいかい！");
        } else {
            self.say(format_args!("  ざんねん… こたえは {}", feedback.correct_answer));
        }
    }

    fn on_time_up(&self) {
        self.say("");
        self.say("⏰ 時間切れ");
    }

    fn on_finish(
        &self,
        level: &LevelConfig,
        last_level: u32,
        result: &LevelResult,
    ) -> Result<()> {
        if self.format == OutputFormat::Json {
            let json =
                serde_json::to_string_pretty(result).context("failed to serialize result")?;
            println!("{json}");
            return Ok(());
        }

        println!();
        println!("結果発表  レベル{}: {}", level.id, level.title);
        if result.is_timed_out {
            println!(
                "時間切れ ({}/{}問 解答)",
                result.answered_questions, result.total_questions
            );
        }
        println!(
            "タイム: {} (目標: {})",
            format_time_japanese(i64::from(result.total_time_spent)),
            format_time_japanese(i64::from(result.target_time))
        );
        println!(
            "正答率: {}% ({}/{}問正解)",
            result.accuracy, result.correct_answers, result.total_questions
        );
        if result.is_passed {
            println!("レベル{} 合格！", result.level_id);
        } else {
            println!("もう少し！");
        }
        println!("{}", result.summary_message(last_level));

        if !result.wrong_answers.is_empty() {
            println!();
            println!("間違えた問題:");
            for wrong in &result.wrong_answers {
                let p = &wrong.problem_instance.problem;
                println!("  {} × {} = {}", p.multiplicand, p.multiplier, p.answer);
            }
        }
        Ok(())
    }

    fn flush(&self) {
        let _ = match self.format {
            OutputFormat::Text => std::io::stdout().flush(),
            OutputFormat::Json => std::io::stderr().flush(),
        };
    }
}

/// The question as shown, with `?` in place of the hidden number.
pub fn question_text(instance: &ProblemInstance) -> String {
    let p = &instance.problem;
    match instance.question_type {
        QuestionType::Normal => format!("{} × {} = ?", p.multiplicand, p.multiplier),
        QuestionType::MissingMultiplicand => format!("? × {} = {}", p.multiplier, p.answer),
        QuestionType::MissingMultiplier => format!("{} × ? = {}", p.multiplicand, p.answer),
    }
}

/// The chanted reading of the numbers that are shown.
fn reading_text(instance: &ProblemInstance) -> String {
    let r = &instance.problem.reading;
    let (left, right, answer) = match instance.question_type {
        QuestionType::Normal => (r.multiplicand.as_str(), r.multiplier.as_str(), "?"),
        QuestionType::MissingMultiplicand => ("?", r.multiplier.as_str(), r.answer.as_str()),
        QuestionType::MissingMultiplier => (r.multiplicand.as_str(), "?", r.answer.as_str()),
    };
    format!("{left} {right} {} {answer}", r.equals)
}

/// Read stdin lines on a plain thread. A blocking read cannot be cancelled,
/// so it must not hold up runtime shutdown after a time-up.
fn spawn_stdin_reader() -> mpsc::Receiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

enum Ending {
    Completed,
    Quit,
    TimedOut,
}

pub async fn execute(args: PlayArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let levels = config.load_levels(args.levels.as_deref())?;

    let level_id = args.level.unwrap_or(config.default_level);
    let mut level = find_level(&levels, level_id)
        .cloned()
        .with_context(|| format!("level {level_id} not found"))?;
    let last_level = final_level(&levels).unwrap_or(level.id);
    if let Some(show_reading) = config.show_reading {
        level.has_reading = show_reading;
    }

    let mut rng = match config.resolve_seed(args.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let problems = generate_problems(&level, fact_table(), &mut rng);
    let total = problems.len();
    let mut session = DrillSession::new(level.clone(), problems);

    let reporter = ConsoleReporter {
        format: args.format,
    };
    reporter.on_start(&level, total);

    let (time_up_tx, mut time_up_rx) = oneshot::channel::<()>();
    let mut timer = SessionTimer::new(level.target_time, move || {
        let _ = time_up_tx.send(());
    });
    let mut answers = spawn_stdin_reader();

    timer.start();
    let ending = loop {
        let Some(instance) = session.current() else {
            break Ending::Completed;
        };
        reporter.on_question(instance, total, level.has_reading);

        tokio::select! {
            Ok(()) = &mut time_up_rx => break Ending::TimedOut,
            line = answers.recv() => {
                let line = match line {
                    None => break Ending::Quit,
                    Some(line) => line.context("failed to read answer from stdin")?,
                };
                if line.trim().eq_ignore_ascii_case("q") {
                    break Ending::Quit;
                }
                if let Some(feedback) = session.submit(&line) {
                    reporter.on_answer(&feedback);
                }
            }
        }
    };
    timer.pause();

    let timed_out = matches!(ending, Ending::TimedOut);
    let total_time_spent = match ending {
        Ending::TimedOut => {
            reporter.on_time_up();
            level.target_time
        }
        Ending::Quit => {
            tracing::info!(answered = session.position(), "drill ended early");
            timer.elapsed_seconds()
        }
        Ending::Completed => timer.elapsed_seconds(),
    };

    let result = session.finish(total_time_spent, timed_out);
    reporter.on_finish(&level, last_level, &result)?;

    if let Some(path) = &args.output {
        result.save_json(path)?;
        eprintln!("Result saved to: {}", path.display());
    }

    Ok(())
}
