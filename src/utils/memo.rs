use crate::utils::ProbeError;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::Arc;

/// A command in flight or finished; every clone resolves to the same result.
pub type SharedRun = Shared<BoxFuture<'static, Result<String, ProbeError>>>;

/// Memo of external command results, keyed by the full command line.
///
/// A fresh memo is created for every redraw and dropped with it. Providers
/// asking the same question in one pass, even concurrently, share one
/// subprocess while nothing leaks into the next redraw.
#[derive(Default)]
pub struct CommandMemo {
    data: Arc<DashMap<String, SharedRun>>,
}

impl CommandMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(program: &str, args: &[&str]) -> String {
        let mut key = program.to_string();
        for arg in args {
            key.push('\u{1f}');
            key.push_str(arg);
        }
        key
    }

    /// The command stored under `key`, starting it with `start` on first use.
    /// Lookup and insert happen under one shard lock.
    pub fn get_or_start<F>(&self, key: String, start: F) -> SharedRun
    where
        F: FnOnce() -> BoxFuture<'static, Result<String, ProbeError>>,
    {
        self.data
            .entry(key)
            .or_insert_with(|| start().shared())
            .value()
            .clone()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Clone for CommandMemo {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}
