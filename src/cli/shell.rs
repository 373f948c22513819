use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;
use strsim::levenshtein;

use super::output;
use super::{CliError, CliMode, CommandError, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os("ECO_CORE_CLI_SCRIPT").is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    let helper = CommandHelper::new(context.command_names());
    editor.set_helper(Some(helper));
    editor.bind_sequence(KeyEvent::from('\t'), Cmd::Complete);

    loop {
        if !context.running {
            break;
        }
        let prompt = context.prompt();
        let line = editor.readline(&prompt);

        match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    LoopControl::Continue => {}
                    LoopControl::Exit => break,
                }
            }
            Err(ReadlineError::Interrupted) => {
                output::info("Interrupted. Type `exit` to quit.");
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match handle_line(context, line.trim()) {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> LoopControl {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not parse command line: {}", err));
            return LoopControl::Continue;
        }
    };
    let Some((name, rest)) = tokens.split_first() else {
        return LoopControl::Continue;
    };

    let Some(entry) = context.registry.get(name.as_str()) else {
        report_unknown(context, name);
        return LoopControl::Continue;
    };

    let handler = entry.handler;
    let args: Vec<&str> = rest.iter().map(|s| s.as_str()).collect();
    context.last_command = Some(name.clone());

    match handler(context, &args) {
        Ok(()) => {}
        Err(CommandError::InvalidArguments(message)) => output::warning(message),
        Err(err) => output::error(err),
    }

    if context.running {
        LoopControl::Continue
    } else {
        LoopControl::Exit
    }
}

fn report_unknown(context: &ShellContext, name: &str) {
    let suggestion = context
        .command_names()
        .into_iter()
        .map(|candidate| (levenshtein(name, candidate), candidate))
        .min()
        .filter(|(distance, _)| *distance <= 2)
        .map(|(_, candidate)| candidate);

    match suggestion {
        Some(candidate) => output::warning(format!(
            "Unknown command `{}`. Did you mean `{}`?",
            name, candidate
        )),
        None => output::warning(format!(
            "Unknown command `{}`. Type `help` for the command list.",
            name
        )),
    }
}

/// Completes top-level command names on tab.
struct CommandHelper {
    commands: Vec<&'static str>,
}

impl CommandHelper {
    fn new(commands: Vec<&'static str>) -> Self {
        Self { commands }
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        if prefix.contains(' ') {
            return Ok((pos, Vec::new()));
        }
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

impl Helper for CommandHelper {}
