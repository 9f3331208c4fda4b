//! Call-site resolution for drivers that record the caller
//!
//! Symbol resolution is expensive, so resolved frames are memoised per
//! instruction pointer in a process-wide cache. The cache only ever grows; the
//! number of distinct call sites in a program is small and fixed.

use dashmap::DashMap;
use std::path::Path;
use std::sync::LazyLock;

static FRAME_CACHE: LazyLock<DashMap<usize, Caller>> = LazyLock::new(DashMap::new);

/// A resolved stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub file: String,
    pub line: u32,
    /// Function name shortened to its last two path segments
    pub function: String,
}

impl Caller {
    /// File name without its directory
    pub fn file_name(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file)
    }
}

/// Resolve the frame `skip` levels above the function that calls `get_caller`.
///
/// `get_caller(0)` describes the immediate caller. Returns `None` when the
/// stack is shallower than requested or cannot be inspected on this platform.
#[inline(never)]
pub fn get_caller(skip: usize) -> Option<Caller> {
    let anchor = get_caller as fn(usize) -> Option<Caller> as usize;
    let mut anchored = false;
    let mut remaining = skip.checked_add(1)?;
    let mut target: Option<(usize, backtrace::Frame)> = None;

    backtrace::trace(|frame| {
        if !anchored {
            anchored = frame.symbol_address() as usize == anchor;
            return true;
        }
        remaining -= 1;
        if remaining == 0 {
            target = Some((frame.ip() as usize, frame.clone()));
            return false;
        }
        true
    });

    let (ip, frame) = target?;
    if let Some(cached) = FRAME_CACHE.get(&ip) {
        return Some(cached.value().clone());
    }

    let caller = resolve(&frame)?;
    FRAME_CACHE.insert(ip, caller.clone());
    Some(caller)
}

/// Number of call sites resolved so far
pub fn cached_call_sites() -> usize {
    FRAME_CACHE.len()
}

fn resolve(frame: &backtrace::Frame) -> Option<Caller> {
    let mut caller: Option<Caller> = None;
    backtrace::resolve_frame(frame, |symbol| {
        if caller.is_some() {
            return;
        }
        let Some(name) = symbol.name() else {
            return;
        };
        caller = Some(Caller {
            file: symbol
                .filename()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            line: symbol.lineno().unwrap_or(0),
            function: short_function_name(&format!("{:#}", name)),
        });
    });
    caller
}

fn short_function_name(full: &str) -> String {
    let mut segments = full.rsplitn(3, "::");
    match (segments.next(), segments.next()) {
        (Some(last), Some(parent)) => format!("{}::{}", parent, last),
        (Some(last), None) => last.to_string(),
        _ => String::new(),
    }
}
