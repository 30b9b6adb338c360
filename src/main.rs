use std::{
    env,
    io,
    path::PathBuf,
    process,
};

use anyhow::Context;
use video_to_fx::{
    Config,
    VideoSpec,
    command::Command,
    functions::get_path_or_curr_dir,
    input::{
        self,
        Answers,
    },
    output,
    prompt::Prompter,
};

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main()
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run()
    {
        eprintln!("Error:\t{:#}", e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()>
{
    println!("\t{}\n\tVersion {}\n", NAME, VERSION);

    let (command, args) = Command::from_args(env::args().skip(1));
    log::debug!("Executing '{}' with {:?}", command, args);

    match command
    {
        Command::Init => execute_init(args.into_iter().next().map(PathBuf::from)),
        Command::Run => execute_run(&args),
        Command::Test => execute_test(&args),
        Command::Help =>
        {
            println!("{}", Command::usage());
            Ok(())
        },
    }
}

fn execute_init(path: Option<PathBuf>) -> anyhow::Result<()>
{
    let dir = get_path_or_curr_dir(path)?;
    let config_file = Config::write_template(&dir)?;
    println!("Created {}", config_file.display());
    Ok(())
}

fn execute_run(args: &[String]) -> anyhow::Result<()>
{
    let (spec, config) = load_spec(args)?;
    print_summary(&spec);

    let defines = output::convert(&spec, &config)
        .with_context(|| format!("converting {}", spec.source().display()))?;

    println!();
    println!(
        "Wrote {} ({} frames, {}, {} bytes)",
        spec.artifact_file_name(),
        defines.frame_count,
        defines.duration,
        defines.byte_size
    );
    println!();
    println!("DONE!");
    println!();
    println!(
        "Put the {} file in the Player/ directory, then compile the Player.ino file! \
         After, upload it to the Arduboy with the {} file.",
        config.output.header_file.display(),
        spec.artifact_file_name()
    );
    Ok(())
}

fn execute_test(args: &[String]) -> anyhow::Result<()>
{
    let (spec, config) = load_spec(args)?;
    print_summary(&spec);

    let (thresholded, packed) = output::test_frame(&spec, &config)
        .with_context(|| format!("previewing {}", spec.source().display()))?;

    println!("Thresholded frame: {}", thresholded.display());
    println!("Packed frame:      {}", packed.display());
    Ok(())
}

fn load_spec(args: &[String]) -> anyhow::Result<(VideoSpec, Config)>
{
    let dir = get_path_or_curr_dir(None)?;
    let config = Config::load(&dir)?;
    let answers = Answers::from_args(args).with_config(&config);

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let spec = input::gather_spec(answers, &mut prompter)?;
    Ok((spec, config))
}

fn print_summary(spec: &VideoSpec)
{
    println!();
    println!("Video Title:\t{}", spec.title());
    println!("Video FPS:\t{}", spec.fps());
    println!("Width:\t\t{}", spec.width());
    println!("Height:\t\t{}", spec.height());
    println!();
}
