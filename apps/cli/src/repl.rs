//! Line-oriented drill loop.
//!
//! Plain lines are answers; lines starting with `:` are commands.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::Utc;
use vocab_core::{
    policy_for, Direction, ExerciseMode, Lecture, Outcome, ProgressStore, Session, Settings,
    VocabError,
};

/// How many progress lines `:progress` prints.
const PROGRESS_LINES: usize = 30;

const HELP: &str = "\
Type the answer and press enter. Commands:
  :next               skip to another item
  :back               show the previous item again
  :reverse            swap question and answer languages
  :mode <name>        translation, plural or article
  :lecture <a>[,<b>]  switch lecture, or drill several as one pool
  :load <path>        load a lecture file and switch to it
  :lectures           list lectures
  :stats              answers in this session
  :progress           longest intervals first
  :help               this text
  :quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Answer(String),
    Next,
    Back,
    Reverse,
    Mode(ExerciseMode),
    /// One or more lecture names; several are drilled as one pool.
    Lecture(Vec<String>),
    Load(PathBuf),
    Lectures,
    Stats,
    Progress,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(command) = line.strip_prefix(':') else {
            return Some(Self::Answer(line.to_string()));
        };
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        let parsed = match name {
            "next" | "n" => Self::Next,
            "back" | "b" => Self::Back,
            "reverse" | "r" => Self::Reverse,
            "mode" | "m" => match ExerciseMode::from_str(arg) {
                Some(mode) => Self::Mode(mode),
                None => Self::Unknown(line.to_string()),
            },
            "lecture" | "l" => {
                let names: Vec<String> = arg
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect();
                if names.is_empty() {
                    Self::Unknown(line.to_string())
                } else {
                    Self::Lecture(names)
                }
            }
            "load" if !arg.is_empty() => Self::Load(PathBuf::from(arg)),
            "lectures" => Self::Lectures,
            "stats" => Self::Stats,
            "progress" | "p" => Self::Progress,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        };
        Some(parsed)
    }
}

enum Flow {
    Quit,
    Switch(usize),
    /// Add (or replace by name) a lecture and switch to it.
    Add(Lecture),
}

/// Drive sessions over `lectures` until the input ends or `:quit`.
///
/// Switching lecture starts a fresh session; the direction carries over,
/// the exercise mode goes back to translation. Combined and loaded lectures
/// are appended to the list for the rest of the run.
pub fn run<R: BufRead, W: Write>(
    mut lectures: Vec<Lecture>,
    settings: &Settings,
    forward: &mut ProgressStore,
    mut reverse: Option<&mut ProgressStore>,
    mut input: R,
    mut output: W,
) -> anyhow::Result<()> {
    if lectures.is_empty() {
        anyhow::bail!("no lectures to drill");
    }
    writeln!(output, "Type :help for commands.")?;

    let mut current = 0;
    let mut direction = Direction::Forward;
    loop {
        let lecture = &lectures[current];
        let mut session =
            Session::new(lecture, &mut *forward).with_policy(policy_for(settings.selection));
        if let Some(store) = reverse.as_deref_mut() {
            session = session.with_reverse_store(store);
        }
        session.set_direction(direction);

        writeln!(
            output,
            "Lecture '{}' ({} entries, {} selection)",
            lecture.name(),
            lecture.len(),
            session.policy_name()
        )?;
        tracing::info!("Started session on lecture '{}'", lecture.name());

        let flow = drill(&mut session, &lectures, &mut input, &mut output)?;
        let stats = session.stats();
        tracing::info!(
            "Session on '{}' ended: {} correct, {} wrong",
            lecture.name(),
            stats.correct,
            stats.wrong
        );

        direction = session.direction();
        drop(session);

        match flow {
            Flow::Quit => return Ok(()),
            Flow::Switch(index) => current = index,
            Flow::Add(lecture) => {
                current = match lectures.iter().position(|l| l.name() == lecture.name()) {
                    Some(index) => {
                        lectures[index] = lecture;
                        index
                    }
                    None => {
                        lectures.push(lecture);
                        lectures.len() - 1
                    }
                };
            }
        }
    }
}

fn drill<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    lectures: &[Lecture],
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Flow> {
    show_next(session, output)?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(Flow::Quit);
        }
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        match command {
            Command::Answer(answer) => {
                match session.submit(&answer, Utc::now()) {
                    Ok(outcome) => print_outcome(&outcome, output)?,
                    Err(e @ VocabError::Persistence { .. }) => {
                        tracing::error!("Failed to save progress: {}", e);
                        if let Some(outcome) = session.last_outcome() {
                            print_outcome(outcome, output)?;
                        }
                        writeln!(output, "Warning: {}", e)?;
                    }
                    Err(e) => {
                        tracing::error!("Failed to record answer: {}", e);
                        writeln!(output, "Error: {}", e)?;
                    }
                }
                show_next(session, output)?;
            }
            Command::Next => show_next(session, output)?,
            Command::Back => match session.back() {
                Some(prompt) => show_prompt(session, &prompt, output)?,
                None => writeln!(output, "Already at the first item.")?,
            },
            Command::Reverse => {
                let direction = session.toggle_direction();
                writeln!(output, "Direction: {}", direction.as_str())?;
                show_next(session, output)?;
            }
            Command::Mode(mode) => match session.set_mode(mode) {
                Ok(()) => {
                    writeln!(output, "Mode: {}", mode.as_str())?;
                    show_next(session, output)?;
                }
                Err(e) => writeln!(output, "{}", e)?,
            },
            Command::Lecture(names) => {
                let found: Vec<Option<usize>> = names
                    .iter()
                    .map(|name| lectures.iter().position(|lecture| lecture.name() == name))
                    .collect();
                if let Some((name, _)) = names.iter().zip(&found).find(|(_, index)| index.is_none()) {
                    writeln!(output, "No lecture named '{}'. Try :lectures.", name)?;
                    continue;
                }
                let indices: Vec<usize> = found.into_iter().flatten().collect();
                if let [index] = indices[..] {
                    return Ok(Flow::Switch(index));
                }
                let parts: Vec<&Lecture> = indices.iter().map(|&index| &lectures[index]).collect();
                return Ok(Flow::Add(Lecture::combine(&parts)));
            }
            Command::Load(path) => match Lecture::from_path(&path) {
                Ok(lecture) if lecture.is_empty() => {
                    writeln!(output, "{} has no entries.", path.display())?;
                }
                Ok(lecture) => {
                    tracing::info!("Loaded lecture '{}' from {}", lecture.name(), path.display());
                    return Ok(Flow::Add(lecture));
                }
                Err(e) => writeln!(output, "Error: {}", e)?,
            },
            Command::Lectures => {
                for lecture in lectures {
                    let marker = if lecture.name() == session.lecture().name() {
                        "*"
                    } else {
                        " "
                    };
                    writeln!(output, "{} {} ({})", marker, lecture.name(), lecture.len())?;
                }
            }
            Command::Stats => {
                let stats = session.stats();
                writeln!(
                    output,
                    "{} answered, {} correct, {} wrong",
                    stats.total(),
                    stats.correct,
                    stats.wrong
                )?;
            }
            Command::Progress => {
                let report = session.report(Utc::now());
                if report.is_empty() {
                    writeln!(output, "No progress recorded yet.")?;
                }
                for entry in report.iter().take(PROGRESS_LINES) {
                    writeln!(
                        output,
                        "{:<30} every {}d, ease {:.2}, due in {}d",
                        entry.key, entry.interval, entry.ease, entry.due_in_days
                    )?;
                }
            }
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(text) => {
                writeln!(output, "Unknown command '{}'. Type :help.", text)?;
            }
        }
    }
}

fn show_next<W: Write>(session: &mut Session<'_>, output: &mut W) -> anyhow::Result<()> {
    let prompt = session.advance(Utc::now())?;
    show_prompt(session, &prompt, output)
}

fn show_prompt<W: Write>(session: &Session<'_>, prompt: &str, output: &mut W) -> anyhow::Result<()> {
    let label = match session.mode() {
        ExerciseMode::Translation => "translate",
        ExerciseMode::Plural => "plural of",
        ExerciseMode::IndefiniteArticle => "indefinite article for",
    };
    writeln!(output, "{}: {}", label, prompt)?;
    output.flush()?;
    Ok(())
}

fn print_outcome<W: Write>(outcome: &Outcome, output: &mut W) -> anyhow::Result<()> {
    if outcome.correct {
        let days = outcome.record.interval;
        let unit = if days == 1 { "day" } else { "days" };
        writeln!(output, "Correct! Next review in {} {}.", days, unit)?;
    } else {
        writeln!(output, "Wrong. Expected: {}", outcome.expected_display)?;
    }
    for (person, form) in &outcome.conjugation {
        writeln!(output, "  {:<8} {}", person, form)?;
    }
    Ok(())
}
