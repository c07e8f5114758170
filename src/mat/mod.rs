//! Command registry for the `xdg-mat` binary.

mod mime;

pub use mime::{MimeArgs, MimeArgsError, MimeCommand, MimeRequest, parse_request};

use crate::mimeapps::MimeApps;

/// Everything a command needs, built once at startup.
#[derive(Clone)]
pub struct MatContext {
    pub apps: MimeApps,
}

impl MatContext {
    pub fn new(apps: MimeApps) -> Self {
        Self { apps }
    }
}

pub trait MatCommand {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run with the raw arguments, `args[0]` being the command name. Returns the exit code.
    fn run(&self, ctx: &MatContext, args: &[String]) -> i32;

    fn description_help_text(&self) -> String {
        format!("  {:<16}{}", self.name(), self.description())
    }
}

pub struct CommandManager {
    commands: Vec<Box<dyn MatCommand>>,
}

impl CommandManager {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn with_builtin_commands() -> Self {
        let mut manager = Self::new();
        manager.add(Box::new(MimeCommand));
        manager
    }

    pub fn add(&mut self, command: Box<dyn MatCommand>) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> impl Iterator<Item = &dyn MatCommand> {
        self.commands.iter().map(|c| c.as_ref())
    }

    pub fn find(&self, name: &str) -> Option<&dyn MatCommand> {
        self.commands().find(|c| c.name() == name)
    }

    /// One line per registered command.
    pub fn help_text(&self) -> String {
        self.commands()
            .map(|c| c.description_help_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Run the command named by `args[0]`; `None` when nothing matches.
    pub fn dispatch(&self, ctx: &MatContext, args: &[String]) -> Option<i32> {
        let name = args.first()?;
        let command = self.find(name)?;
        Some(command.run(ctx, args))
    }
}

impl Default for CommandManager {
    fn default() -> Self {
        Self::new()
    }
}
