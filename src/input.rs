use std::{
    io::{
        BufRead,
        Write,
    },
    path::PathBuf,
};

use crate::{
    CliError,
    Config,
    ValidationError,
    VideoSpec,
    prompt::Prompter,
    video_spec::{
        parse_number,
        validate_fps,
        validate_height,
        validate_source,
        validate_width,
    },
};

const SIZE_GUIDANCE: [&str; 4] = [
    "To continue, please provide a width and height for the video file.",
    "- If you want your video to fit the entire screen, provide a width of 128 and a height of 64.",
    "- If you want your video to have a 16:9 aspect ratio, provide a width of 114 and a height of 64.",
    "- If you want your video to have a 4:3 aspect ratio, provide a width of 86 and a height of 64.",
];

/// Positional operands in the order `[file] [title] [fps] [width] [height]`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Answers
{
    pub file: Option<String>,
    pub title: Option<String>,
    pub fps: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl Answers
{
    /// Empty operands count as not given.
    pub fn from_args(args: &[String]) -> Self
    {
        let get = |index: usize| args.get(index).filter(|arg| !arg.is_empty()).cloned();
        Self {
            file: get(0),
            title: get(1),
            fps: get(2),
            width: get(3),
            height: get(4),
        }
    }

    /// Fills gaps from the config file; operands take precedence.
    pub fn with_config(
        self,
        config: &Config,
    ) -> Self
    {
        Self {
            file: self
                .file
                .or_else(|| config.video_file.as_ref().map(|path| path.display().to_string())),
            title: self.title.or_else(|| config.title.clone()),
            fps: self.fps.or_else(|| config.fps.map(|fps| fps.to_string())),
            width: self.width.or_else(|| config.width.map(|width| width.to_string())),
            height: self.height.or_else(|| config.height.map(|height| height.to_string())),
        }
    }
}

/// Builds the [`VideoSpec`], prompting for whatever `answers` leaves out.
///
/// A value that was supplied up front and fails validation is fatal; a prompted value is
/// asked for again until it is valid.
pub fn gather_spec<R: BufRead, W: Write>(
    answers: Answers,
    prompter: &mut Prompter<R, W>,
) -> Result<VideoSpec, CliError>
{
    let source: PathBuf = match answers.file
    {
        Some(file) => validate_source(&file)?,
        // an empty answer is not re-asked
        None => validate_source(&prompter.ask("video file", "Video file path: ")?)?,
    };

    let title = match answers.title
    {
        Some(title) => title,
        None => prompter.ask("title", "Video title: ")?,
    };

    let fps = resolve(
        answers.fps,
        prompter,
        "fps",
        "Frames Per Second: (Somewhere between 15 and 20 is usually good) ",
        |given| validate_fps(parse_number("frames per second", given)?),
    )?;

    if answers.width.is_none() || answers.height.is_none()
    {
        for line in SIZE_GUIDANCE
        {
            prompter.say(line)?;
        }
    }
    let width = resolve(answers.width, prompter, "width", "Width: ", |given| {
        validate_width(parse_number("width", given)?)
    })?;
    let height = resolve(answers.height, prompter, "height", "Height: ", |given| {
        validate_height(parse_number("height", given)?)
    })?;

    Ok(VideoSpec::new(source, &title, fps as i64, width as i64, height as i64)?)
}

fn resolve<R: BufRead, W: Write>(
    given: Option<String>,
    prompter: &mut Prompter<R, W>,
    field: &'static str,
    question: &str,
    validate: impl Fn(&str) -> Result<u16, ValidationError>,
) -> Result<u16, CliError>
{
    match given
    {
        Some(given) => Ok(validate(&given)?),
        None => prompter.ask_until_valid(field, question, validate),
    }
}

#[cfg(test)]
mod tests
{
    use std::{
        fs,
        io::Cursor,
    };

    use super::*;

    fn source_file() -> (tempfile::TempDir, String)
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        fs::write(&path, b"not really a video").unwrap();
        let path = path.display().to_string();
        (dir, path)
    }

    fn args(list: &[&str]) -> Vec<String>
    {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn all_operands_need_no_prompt()
    {
        let (_dir, path) = source_file();
        let answers = Answers::from_args(&args(&[&path, "Clip", "15", "128", "64"]));
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(""), &mut output);

        let spec = gather_spec(answers, &mut prompter).unwrap();

        assert_eq!(spec.title(), "Clip");
        assert_eq!((spec.fps(), spec.width(), spec.height()), (15, 128, 64));
        drop(prompter);
        assert!(output.is_empty());
    }

    #[test]
    fn invalid_operand_is_fatal()
    {
        let (_dir, path) = source_file();
        for (width, height, expected) in [
            ("129", "64", ValidationError::WidthTooLarge(129)),
            ("128", "10", ValidationError::HeightNotMultipleOfEight(10)),
        ]
        {
            let answers = Answers::from_args(&args(&[&path, "Clip", "15", width, height]));
            let mut prompter = Prompter::new(Cursor::new("128\n64\n"), Vec::new());

            let result = gather_spec(answers, &mut prompter);

            assert!(matches!(result, Err(CliError::InvalidArgument(e)) if e == expected));
        }
    }

    #[test]
    fn missing_values_are_prompted_with_guidance()
    {
        let (_dir, path) = source_file();
        let answers = Answers::from_args(&args(&[&path, "Clip"]));
        let input = Cursor::new("0\n20\n130\n114\n10\n64\n");
        let mut output = Vec::new();
        let mut prompter = Prompter::new(input, &mut output);

        let spec = gather_spec(answers, &mut prompter).unwrap();

        assert_eq!((spec.fps(), spec.width(), spec.height()), (20, 114, 64));
        drop(prompter);
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("16:9 aspect ratio"));
        assert!(transcript.contains("must be a positive number"));
        assert!(transcript.contains("multiple of 8"));
    }

    #[test]
    fn config_fills_gaps_but_operands_win()
    {
        let config = Config {
            title: Some(String::from("From Config")),
            fps: Some(12),
            width: Some(86),
            ..Config::default()
        };

        let answers = Answers::from_args(&args(&["clip.mp4", "", "15"])).with_config(&config);

        assert_eq!(answers.file.as_deref(), Some("clip.mp4"));
        assert_eq!(answers.title.as_deref(), Some("From Config"));
        assert_eq!(answers.fps.as_deref(), Some("15"));
        assert_eq!(answers.width.as_deref(), Some("86"));
        assert_eq!(answers.height, None);
    }

    #[test]
    fn missing_file_is_rejected()
    {
        let answers = Answers::from_args(&args(&["nowhere.mp4", "Clip", "15", "128", "64"]));
        let mut prompter = Prompter::new(Cursor::new(""), Vec::new());

        let result = gather_spec(answers, &mut prompter);

        assert!(matches!(
            result,
            Err(CliError::InvalidArgument(ValidationError::SourceNotFound(_)))
        ));
    }

    #[test]
    fn long_title_is_truncated_not_rejected()
    {
        let (_dir, path) = source_file();
        let long_title = "Twenty-Five Characters!!!";
        let answers = Answers::from_args(&args(&[&path, long_title, "15", "128", "64"]));
        let mut prompter = Prompter::new(Cursor::new(""), Vec::new());

        let spec = gather_spec(answers, &mut prompter).unwrap();

        assert_eq!(spec.title(), &long_title[..19]);
    }
}
