#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use gamelist::{CONFIG_ENV, DATASET_ENV, Game};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

pub fn game_list_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_game-list"))
}

/// Command for the CLI with the dataset/config environment cleared so the
/// caller's shell cannot leak into assertions.
pub fn game_list_command() -> Command {
    let mut cmd = Command::new(game_list_binary());
    cmd.env_remove(DATASET_ENV)
        .env_remove(CONFIG_ENV)
        .env_remove("RUST_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run `cmd` with `input` on stdin and return its output regardless of status.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn command: {:?}", cmd))?;
    child
        .stdin
        .take()
        .context("stdin was not piped")?
        .write_all(input.as_bytes())?;
    child.wait_with_output().context("waiting for command")
}

/// Seven games; two carry the "RPG" genre and two tie on rating.
pub fn seven_games() -> Vec<Game> {
    vec![
        Game::new(
            "Star Wars: Knights of the Old Republic",
            &["RPG", "Sci-Fi"],
            8.7,
            "kotor.jpg",
        ),
        Game::new("Hades", &["Roguelike", "Action"], 9.0, "hades.jpg"),
        Game::new("Celeste", &["Platformer"], 8.8, "celeste.jpg"),
        Game::new("Disco Elysium", &["RPG", "Adventure"], 9.1, "disco-elysium.jpg"),
        Game::new("Portal 2", &["Puzzle", "Adventure"], 9.5, "portal2.jpg"),
        Game::new("Hollow Knight", &["Metroidvania", "Action"], 9.0, "hollow-knight.jpg"),
        Game::new("Dead Cells", &["Roguelike", "Action"], 8.6, "dead-cells.jpg"),
    ]
}

pub fn write_dataset(games: &[Game]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate dataset file")?;
    serde_json::to_writer(&mut file, games)?;
    file.flush()?;
    Ok(file)
}

pub fn write_text(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate temp file")?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

pub fn titles(games: &[Game]) -> Vec<&str> {
    games.iter().map(|game| game.title.as_str()).collect()
}
