//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::{ConsoleFormatter, spinner};
use anyhow::Result;
use colored::Colorize;
use pcai_application::ChatSession;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// Interactive chat REPL
pub struct ChatRepl {
    session: ChatSession,
    show_progress: bool,
}

/// What a slash command asks the loop to do next.
#[derive(Debug, PartialEq, Eq)]
enum CommandAction {
    Continue,
    Exit,
}

impl ChatRepl {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            show_progress: true,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> Result<()> {
        let mut editor = Reedline::create();
        if let Some(path) = Self::history_path() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match FileBackedHistory::with_file(HISTORY_CAPACITY, path) {
                Ok(history) => editor = editor.with_history(Box::new(history)),
                Err(e) => warn!(error = %e, "Chat history unavailable"),
            }
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(format!("pcai:{}", self.session.mode())),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if line.starts_with('/') {
                        if self.handle_command(line) == CommandAction::Exit {
                            break;
                        }
                        continue;
                    }
                    self.process_message(line).await;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => continue,
            }
        }

        Ok(())
    }

    fn history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("pcai").join("history.txt"))
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", format!("pcai - {} mode", self.session.mode()).bold());
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?    - Show this help");
        println!("  /reset           - Clear the conversation");
        println!("  /quit, /exit, /q - Exit chat");
        println!();
    }

    fn handle_command(&mut self, cmd: &str) -> CommandAction {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                CommandAction::Exit
            }
            "/help" | "/h" | "/?" => {
                Self::print_help();
                CommandAction::Continue
            }
            "/reset" => {
                self.session.reset();
                println!("Conversation cleared.");
                CommandAction::Continue
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                CommandAction::Continue
            }
        }
    }

    async fn process_message(&mut self, message: &str) {
        let progress = spinner("Thinking...", self.show_progress);
        let result = self.session.send(message).await;
        progress.finish_and_clear();

        match result {
            Ok(turn) => {
                println!();
                println!("{}", turn.response);
                println!();
                eprintln!("{}", ConsoleFormatter::turn_status(&turn));
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
            }
        }
    }
}
