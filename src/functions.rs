use std::{
    env,
    path::PathBuf,
};

use crate::CliError;

pub fn get_path_or_curr_dir(path: Option<PathBuf>) -> Result<PathBuf, CliError>
{
    match path
    {
        None => env::current_dir().map_err(|_| CliError::AccessCurrentDirectory),
        Some(path) => Ok(path),
    }
}

pub fn format_elapsed(miliseconds: u128) -> String
{
    if miliseconds < 1000
    {
        format!("{}ms", miliseconds)
    }
    else
    {
        format!("{:.2}s", miliseconds as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn elapsed_switches_to_seconds()
    {
        assert_eq!(format_elapsed(950), "950ms");
        assert_eq!(format_elapsed(1500), "1.50s");
    }

    #[test]
    fn explicit_path_wins()
    {
        let path = PathBuf::from("somewhere");
        assert_eq!(get_path_or_curr_dir(Some(path.clone())).unwrap(), path);
    }
}
