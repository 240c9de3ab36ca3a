//! Parsing of the lines typed into the terminal.

/// What a line of input asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Nothing but whitespace.
    Empty,
    /// A message for the assistant.
    Say(String),
    /// `/key <value>` sets the API key, `/key` alone clears it.
    SetKey(Option<String>),
    /// `/models` lists the models available to the current key.
    ListModels,
    /// `/quit` leaves the program.
    Quit,
    /// `/help` or a command that doesn't exist.
    Help,
}

impl Command {
    /// Parses a line of input.
    ///
    /// Anything that doesn't start with `/` is a message; it is passed on
    /// untrimmed.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        let Some(command) = trimmed.strip_prefix('/') else {
            return Self::Say(line.to_owned());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        match name {
            "key" if arg.is_empty() => Self::SetKey(None),
            "key" => Self::SetKey(Some(arg.to_owned())),
            "models" => Self::ListModels,
            "quit" | "exit" => Self::Quit,
            _ => Self::Help,
        }
    }
}

/// Lines printed for [`Command::Help`].
pub const HELP_TEXT: &str = "\
Commands:
  /key <value>  use an API key for the following messages
  /key          forget the API key and go back to demo mode
  /models       list the models your API key can use
  /quit         exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_messages() {
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("  \n"), Command::Empty);
        assert_eq!(
            Command::parse("How do I start composting?\n"),
            Command::Say("How do I start composting?\n".to_owned())
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("/key  AIza123 \n"),
            Command::SetKey(Some("AIza123".to_owned()))
        );
        assert_eq!(Command::parse("/key"), Command::SetKey(None));
        assert_eq!(Command::parse(" /key   "), Command::SetKey(None));
        assert_eq!(Command::parse("/models"), Command::ListModels);
        assert_eq!(Command::parse("/quit\n"), Command::Quit);
        assert_eq!(Command::parse("/exit"), Command::Quit);
        assert_eq!(Command::parse("/help"), Command::Help);
        assert_eq!(Command::parse("/keys abc"), Command::Help);
    }
}
