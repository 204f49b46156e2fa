use crate::{error::ScriptParseError, model::Script};

pub trait CommandParser: Send + Sync {
    fn parse<'a>(&self, content: &'a str) -> Result<Script<'a>, ScriptParseError>;
}
