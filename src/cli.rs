//! Terminal front-end: stdin/stdout REPL standing in for the guide page.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use crate::chat::{Sender, TranscriptEvent};
use crate::error::CommandError;
use crate::fees::{AdditionalOption, PassportType, ProcessingTime};
use crate::guide::GuideSession;
use crate::steps::{StepId, Transition};

pub const HELP: &str = "\
Commands:
  steps                          show the guide steps
  toggle <n>                     open or close step n
  close                          close the open step
  time <standard|expedited|emergency>
  type <5|10>
  option <pickup|transfer|replacement> <on|off>
  fees                           show the fee calculation
  submit <text>                  submit your travel details
  ask <text>                     ask the passport assistant
  related <n>                    ask the n-th \"People also ask\" question
  chat                           open or close the assistant
  help
  quit";

/// A parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Steps,
    Toggle(StepId),
    Close,
    Time(ProcessingTime),
    Type(PassportType),
    Option {
        option: AdditionalOption,
        checked: bool,
    },
    Fees,
    Submit(String),
    Ask(String),
    Related(usize),
    Chat,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> std::result::Result<Self, CommandError> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_ascii_lowercase().as_str() {
            "steps" => Ok(Self::Steps),
            "toggle" | "open" => {
                let n = required(rest, "toggle", "a step number")?;
                n.parse()
                    .map(Self::Toggle)
                    .map_err(|_| invalid("toggle", n))
            }
            "close" => Ok(Self::Close),
            "time" => {
                let value = required(rest, "time", "standard, expedited or emergency")?;
                value.parse().map(Self::Time).map_err(|_| invalid("time", value))
            }
            "type" => {
                let value = required(rest, "type", "5 or 10")?;
                value.parse().map(Self::Type).map_err(|_| invalid("type", value))
            }
            "option" => {
                let mut parts = rest.split_whitespace();
                let name = parts.next().ok_or(CommandError::MissingArgument {
                    command: "option",
                    expected: "pickup, transfer or replacement",
                })?;
                let option = name.parse().map_err(|_| invalid("option", name))?;
                let checked = match parts.next() {
                    None | Some("on") => true,
                    Some("off") => false,
                    Some(other) => return Err(invalid("option", other)),
                };
                Ok(Self::Option { option, checked })
            }
            "fees" => Ok(Self::Fees),
            "submit" => Ok(Self::Submit(rest.to_string())),
            "ask" => Ok(Self::Ask(rest.to_string())),
            "related" => {
                let n = required(rest, "related", "a question number")?;
                match n.parse::<usize>() {
                    Ok(i) if i >= 1 => Ok(Self::Related(i)),
                    _ => Err(invalid("related", n)),
                }
            }
            "chat" => Ok(Self::Chat),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "/quit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(head.to_string())),
        }
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    expected: &'static str,
) -> std::result::Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, expected })
    } else {
        Ok(rest)
    }
}

fn invalid(command: &'static str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}

/// Render the step list. The expanded step shows its content.
pub fn render_steps(guide: &GuideSession) -> String {
    let stepper = guide.stepper();
    let mut out = String::new();
    for step in stepper.catalog().iter() {
        out.push_str(&render_step(guide, step.id));
    }
    if out.is_empty() {
        out.push_str("(no steps)\n");
    }
    out
}

/// Render a single step line (plus content when expanded).
pub fn render_step(guide: &GuideSession, id: StepId) -> String {
    let stepper = guide.stepper();
    let Some(step) = stepper.catalog().get(id) else {
        return String::new();
    };
    let marker = if stepper.is_expanded(id) {
        "[>]"
    } else if stepper.is_completed(id) {
        "[x]"
    } else {
        "[ ]"
    };
    let mut out = format!("{marker} {}. {}\n", step.id, step.title);
    if let Some(subtitle) = guide.step_subtitle(step) {
        out.push_str(&format!("        {subtitle}\n"));
    }
    if stepper.is_expanded(id) {
        out.push_str(&format!("        {}\n", step.content));
    }
    out
}

pub fn render_fees(guide: &GuideSession) -> String {
    let breakdown = guide.fee_breakdown();
    let mut out = String::from("Fee Calculation\n");
    for line in &breakdown.lines {
        out.push_str(&format!("  {:<60} ${}\n", line.label, line.amount));
    }
    out.push_str(&format!("  {:<60} ${}\n", "Total Fee:", breakdown.total));
    if guide.shows_emergency_disclaimer() {
        out.push_str(
            "\n  Emergency service is only for urgent travel. You must show proof of \
             travel when you apply.\n",
        );
    }
    out
}

pub fn render_answer(guide: &GuideSession) -> String {
    let Some(answer) = guide.chat().current_answer() else {
        return "Ask me anything about passports!\n".to_string();
    };
    let mut out = format!("{}\n{}\n\nPeople also ask:\n", answer.title, answer.body);
    for (i, q) in answer.related_questions.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, q));
    }
    out
}

/// Apply one command. Returns the text to print, or `None` to quit.
pub async fn execute(guide: &mut GuideSession, command: Command) -> Option<String> {
    let output = match command {
        Command::Quit => return None,
        Command::Help => HELP.to_string(),
        Command::Steps => render_steps(guide),
        Command::Toggle(id) => {
            let update = guide.toggle_step(id).await;
            match update.transition {
                Transition::Unchanged => format!("No step {id}.\n"),
                // Keep the viewport where it was: only reprint the step itself.
                _ if update.restore_scroll() => render_step(guide, id),
                _ => render_steps(guide),
            }
        }
        Command::Close => {
            guide.collapse_steps().await;
            render_steps(guide)
        }
        Command::Time(time) => {
            guide.select_processing_time(time);
            render_fees(guide)
        }
        Command::Type(passport_type) => {
            guide.select_passport_type(passport_type);
            render_fees(guide)
        }
        Command::Option { option, checked } => {
            guide.set_additional_option(option, checked);
            render_fees(guide)
        }
        Command::Fees => render_fees(guide),
        Command::Submit(text) => match guide.submit_travel_details(&text).await {
            Some(_) => render_steps(guide),
            None => "Please enter your travel details first.\n".to_string(),
        },
        Command::Ask(text) => {
            if !guide.chat().is_open() {
                guide.chat_mut().toggle_open();
            }
            match guide.chat_mut().send(&text).await {
                Some(_) => render_answer(guide),
                None => String::new(),
            }
        }
        Command::Related(n) => {
            let question = guide
                .chat()
                .current_answer()
                .and_then(|a| {
                    n.checked_sub(1)
                        .and_then(|i| a.related_questions.get(i).cloned())
                });
            match question {
                Some(q) => {
                    guide.chat_mut().ask_related(&q).await;
                    format!("You: {q}\n\n{}", render_answer(guide))
                }
                None => format!("No related question {n}.\n"),
            }
        }
        Command::Chat => {
            if guide.chat_mut().toggle_open() {
                render_answer(guide)
            } else {
                "Assistant closed.\n".to_string()
            }
        }
    };
    Some(output)
}

/// Run the REPL until EOF or `quit`.
pub async fn run(guide: &mut GuideSession) {
    let (tx, mut lines_rx) = tokio::sync::mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        let reader = BufReader::new(tokio::io::stdin());
        let mut lines = reader.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break, // EOF
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    break;
                }
            }
        }
    });

    let mut events = guide.chat().transcript().subscribe();
    eprint!("> ");

    loop {
        tokio::select! {
            line = lines_rx.recv() => {
                let Some(line) = line else { break };
                if line.trim().is_empty() {
                    eprint!("> ");
                    continue;
                }
                match Command::parse(&line) {
                    Ok(command) => match execute(guide, command).await {
                        Some(output) => println!("\n{output}"),
                        None => break,
                    },
                    Err(e) => eprintln!("{e}. Type 'help' for commands."),
                }
                eprint!("> ");
            }
            event = events.recv() => match event {
                Ok(TranscriptEvent::MessageAppended { message }) if message.sender == Sender::Bot => {
                    println!("\nAssistant: {}\n", message.text);
                    eprint!("> ");
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Transcript listener lagged");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
}
