use std::fmt::{
    Display,
    Formatter,
};

use crate::FormatResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command
{
    Init,
    Run,
    Test,
    Help,
}

impl Command
{
    const HELP: &'static str = "help";
    const INIT: &'static str = "init";
    const RUN: &'static str = "run";
    const TEST: &'static str = "test";

    pub fn name(&self) -> &'static str
    {
        match self
        {
            Self::Init => Self::INIT,
            Self::Run => Self::RUN,
            Self::Test => Self::TEST,
            Self::Help => Self::HELP,
        }
    }

    pub fn from_name(name: &str) -> Option<Self>
    {
        [Self::Init, Self::Run, Self::Test, Self::Help].into_iter().find(|cmd| {
            name == cmd.name() || name == cmd.alias_short() || name == cmd.alias_long()
        })
    }

    /// Splits the arguments into a command and its operands.
    ///
    /// Without a recognised command name the whole argument list belongs to `run`, so
    /// `v2fx clip.mp4 "Clip" 15 128 64` works like the explicit form.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> (Self, Vec<String>)
    {
        let mut args: Vec<String> = args.into_iter().collect();
        match args.first().and_then(|first| Self::from_name(first))
        {
            Some(cmd) =>
            {
                args.remove(0);
                (cmd, args)
            },
            None => (Self::Run, args),
        }
    }

    fn alias_short(&self) -> String
    {
        let initial = self.name().chars().next().unwrap_or_default();
        format!("-{}", initial)
    }

    fn alias_long(&self) -> String
    {
        format!("--{}", self.name())
    }

    pub fn usage() -> &'static str
    {
        "Usage:
    v2fx [run] [file] [title] [fps] [width] [height]
        Convert a video into <file name>.bin and video.h for the FX video player.
        Anything not given here or in v2fx_config.json is asked for.
    v2fx init [directory]
        Write a starter v2fx_config.json.
    v2fx test [file] [title] [fps] [width] [height]
        Save PNG previews of one frame (output.test_frame in the config).
    v2fx help
        Show this message.

Set RUST_LOG=debug for per-frame logging."
    }
}

impl Display for Command
{
    fn fmt(
        &self,
        f: &mut Formatter,
    ) -> FormatResult
    {
        write!(f, "{}", self.name())
    }
}
