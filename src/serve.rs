//! Line protocol for running one process per shell session.
//!
//! Requests, one per line:
//!
//! - `preexec` - a command is about to run
//! - `precmd <exit-code>` - it finished
//! - `dirstack <depth>` - directory-stack depth changed
//! - `render` - answer with one JSON line `{"left","right","transient"}`
//! - `quit` - stop
//!
//! A request arriving while a render is still composing abandons that
//! render; nothing is written for it. The `transient` field is plain text,
//! without terminal color codes.

use crate::session::PromptSession;
use crate::utils::debug_with_context;
use anyhow::{bail, Context, Result};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Preexec,
    Precmd(i32),
    DirStack(usize),
    Render,
    Quit,
}

impl FromStr for Request {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let request = match (words.next(), words.next()) {
            (Some("preexec"), None) => Request::Preexec,
            (Some("precmd"), Some(code)) => Request::Precmd(
                code.parse()
                    .with_context(|| format!("invalid exit code: {}", code))?,
            ),
            (Some("precmd"), None) => Request::Precmd(0),
            (Some("dirstack"), Some(depth)) => Request::DirStack(
                depth
                    .parse()
                    .with_context(|| format!("invalid depth: {}", depth))?,
            ),
            (Some("render"), None) => Request::Render,
            (Some("quit"), None) => Request::Quit,
            _ => bail!("unknown request: {}", line.trim()),
        };
        Ok(request)
    }
}

enum Outcome {
    Rendered(String),
    Interrupted(String),
}

pub async fn serve<R, W>(session: &mut PromptSession, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    session.set_paint_transient(false);
    let mut lines = reader.lines();
    let mut pending: Option<String> = None;

    loop {
        let line = match pending.take() {
            Some(line) => line,
            None => match lines.next_line().await? {
                Some(line) => line,
                None => break,
            },
        };
        if line.trim().is_empty() {
            continue;
        }

        let request = match line.parse::<Request>() {
            Ok(request) => request,
            Err(e) => {
                log::warn!("{:#}", e);
                continue;
            }
        };

        match request {
            Request::Preexec => session.on_command_start(),
            Request::Precmd(code) => session.on_command_complete(code),
            Request::DirStack(depth) => session.set_dir_stack_depth(depth),
            Request::Quit => break,
            Request::Render => {
                let outcome = {
                    let render = session.render_prompt();
                    tokio::select! {
                        rendered = render => Outcome::Rendered(serde_json::to_string(&rendered)?),
                        // End of input is not a new request; let the render finish.
                        Ok(Some(next)) = lines.next_line() => Outcome::Interrupted(next),
                    }
                };

                match outcome {
                    Outcome::Rendered(json) => {
                        writer.write_all(format!("{}\n", json).as_bytes()).await?;
                        writer.flush().await?;
                    }
                    Outcome::Interrupted(next) => {
                        debug_with_context("serve", "Render abandoned for a newer request");
                        pending = Some(next);
                    }
                }
            }
        }
    }

    Ok(())
}
