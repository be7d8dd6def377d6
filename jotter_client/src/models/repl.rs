use std::str::FromStr;

#[derive(Debug, PartialEq)]
pub enum Command {
    /// Print all notes.
    List,
    /// Set the draft and submit it in one go.
    Add(String),
    /// Replace the draft without submitting it.
    Draft(String),
    /// Submit the current draft.
    Submit,
    /// Request a summary for a note by ID.
    Summarize(i32),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim_start();
        let (name, rest) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
        match name {
            "list" | "ls" => Ok(Self::List),
            "add" => Ok(Self::Add(rest.to_string())),
            "draft" => Ok(Self::Draft(rest.to_string())),
            "submit" => Ok(Self::Submit),
            "summarize" | "sum" => rest
                .trim()
                .parse()
                .map(Self::Summarize)
                .map_err(|_| format!("expected a note ID, got {:?}", rest.trim())),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "" => Err("enter a command, or `help` to see them all".to_string()),
            other => Err(format!("unknown command {other:?}, try `help`")),
        }
    }
}

pub enum UserRequest {
    Command(Command),
    Invalid(String),
}

pub enum ServerResponse {
    Summary {
        id: i32,
        result: Result<String, String>,
    },
}
