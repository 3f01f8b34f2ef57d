//! Workload replay
//!
//! Replays a scripted sequence of heap operations against a classic and a
//! naive heap side by side and reports the average number of structural
//! steps per operation for both. The script holds one command per line:
//!
//! | line            | meaning                                              |
//! |-----------------|------------------------------------------------------|
//! | `# N`           | start a run over element ids `0..=N`                 |
//! | `I id priority` | insert element `id`                                  |
//! | `M`             | extract the minimum                                  |
//! | `D id priority` | decrease element `id` if present and not already lower |
//!
//! Starting a run closes the previous one (its [`RunStats`] are emitted) and
//! empties both heaps; the end of the input closes the last run.
//!
//! ```rust
//! use rust_fibonacci_heap::workload::{replay, ReplayOptions};
//!
//! let script = "# 3\nI 0 5\nI 1 7\nI 2 9\nM\nD 2 1\nM\n";
//! let runs = replay(script.as_bytes(), ReplayOptions::default()).unwrap();
//! assert_eq!(runs.len(), 1);
//! assert_eq!(runs[0].n, 3);
//! ```

use std::fmt;
use std::io::BufRead;
use std::str::{FromStr, SplitWhitespace};

use log::debug;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::error::HeapError;
use crate::fibonacci::{FibonacciHandle, FibonacciHeap};
use crate::observer::{Operation, StepCounter};
use crate::policy::{Cascading, CutPolicy, Naive};

/// Priority type used by workload scripts
pub type Priority = i64;

/// Errors raised while reading or replaying a script. Line numbers are
/// 1-based.
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// The line is not a valid command
    #[error("line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: ParseError,
    },

    /// An `I` or `D` names an id above the current run's `N`
    #[error("line {line}: element id {id} is outside the run's range 0..={n}")]
    IdOutOfRange { line: usize, id: usize, n: usize },

    /// An `I`, `M` or `D` line appears before any `#` line
    #[error("line {line}: command before the first `#` line")]
    NoRun { line: usize },

    /// The heap reported an integrity failure
    #[error("line {line}: {source}")]
    Heap {
        line: usize,
        #[source]
        source: HeapError,
    },

    /// Reading the input failed
    #[error("failed to read workload")]
    Io(#[from] std::io::Error),
}

/// Why a single line failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// First token is not `#`, `I`, `M` or `D`
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// The line ends before a required field
    #[error("missing {0}")]
    Missing(&'static str),

    /// A field does not parse as its type
    #[error("invalid {what} `{token}`")]
    Invalid { what: &'static str, token: String },

    /// Extra tokens after the last field
    #[error("unexpected trailing token `{0}`")]
    Trailing(String),
}

/// One parsed script line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `# N`: close the current run and start one over ids `0..=n`
    StartRun { n: usize },
    /// `I id priority`
    Insert { id: usize, priority: Priority },
    /// `M`
    ExtractMin,
    /// `D id priority`
    Decrease { id: usize, priority: Priority },
}

impl Command {
    /// Parses one line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else {
            return Ok(None);
        };
        let command = match tag {
            "#" => Command::StartRun {
                n: field(&mut tokens, "run size")?,
            },
            "I" => Command::Insert {
                id: field(&mut tokens, "element id")?,
                priority: field(&mut tokens, "priority")?,
            },
            "M" => Command::ExtractMin,
            "D" => Command::Decrease {
                id: field(&mut tokens, "element id")?,
                priority: field(&mut tokens, "priority")?,
            },
            other => return Err(ParseError::UnknownCommand(other.to_owned())),
        };
        if let Some(extra) = tokens.next() {
            return Err(ParseError::Trailing(extra.to_owned()));
        }
        Ok(Some(command))
    }
}

fn field<F: FromStr>(
    tokens: &mut SplitWhitespace<'_>,
    what: &'static str,
) -> Result<F, ParseError> {
    let token = tokens.next().ok_or(ParseError::Missing(what))?;
    token.parse().map_err(|_| ParseError::Invalid {
        what,
        token: token.to_owned(),
    })
}

/// Averages measured over one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStats {
    /// Largest element id of the run
    pub n: usize,
    /// Classic heap: steps per completed extract-min
    pub classic_extract: f64,
    /// Classic heap: steps per applied decrease
    pub classic_decrease: f64,
    /// `None` when the naive heap was skipped
    pub naive: Option<(f64, f64)>,
}

impl fmt::Display for RunStats {
    /// `n classic_extract classic_decrease [naive_extract naive_decrease]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.n, self.classic_extract, self.classic_decrease)?;
        if let Some((extract, decrease)) = self.naive {
            write!(f, " {extract} {decrease}")?;
        }
        Ok(())
    }
}

/// Replay settings
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// Skip the naive heap
    pub classic_only: bool,
}

/// A heap under measurement plus the handles of its live elements, keyed
/// by element id.
struct Lane<C: CutPolicy> {
    heap: FibonacciHeap<usize, Priority, C, StepCounter>,
    handles: FxHashMap<usize, FibonacciHandle>,
}

impl<C: CutPolicy> Lane<C> {
    fn new() -> Self {
        Lane {
            heap: FibonacciHeap::with_parts(C::default(), StepCounter::default()),
            handles: FxHashMap::default(),
        }
    }

    fn reset(&mut self) {
        self.heap.clear();
        self.heap.observer_mut().reset();
        self.handles.clear();
    }

    fn insert(&mut self, id: usize, priority: Priority) {
        self.handles.insert(id, self.heap.insert(priority, id));
    }

    fn extract_min(&mut self) -> Result<(), HeapError> {
        if let Some(min) = self.heap.extract_min()? {
            self.handles.remove(&min.item);
        }
        Ok(())
    }

    fn decrease(&mut self, id: usize, priority: Priority) -> Result<(), HeapError> {
        let Some(&handle) = self.handles.get(&id) else {
            return Ok(());
        };
        let current = *self
            .heap
            .get(handle)
            .ok_or(HeapError::InvalidHandle)?
            .priority();
        if current >= priority {
            self.heap.decrease(handle, priority)?;
        }
        Ok(())
    }

    fn averages(&self) -> (f64, f64) {
        let counter = self.heap.observer();
        (
            counter.average_steps(Operation::ExtractMin),
            counter.average_steps(Operation::Decrease),
        )
    }
}

/// Incremental replay state, fed one command at a time.
pub struct Replay {
    classic: Lane<Cascading>,
    naive: Option<Lane<Naive>>,
    run: Option<usize>,
}

impl Replay {
    /// Creates a replay with no run open.
    pub fn new(options: ReplayOptions) -> Self {
        Replay {
            classic: Lane::new(),
            naive: (!options.classic_only).then(Lane::new),
            run: None,
        }
    }

    /// Applies one command read from line `line`. Returns the statistics of
    /// the previous run when `command` starts a new one.
    pub fn apply(
        &mut self,
        line: usize,
        command: Command,
    ) -> Result<Option<RunStats>, WorkloadError> {
        let heap_error = |source: HeapError| WorkloadError::Heap { line, source };

        match command {
            Command::StartRun { n } => {
                let finished = self.finish();
                debug!("starting run over ids 0..={n} at line {line}");
                self.classic.reset();
                if let Some(naive) = &mut self.naive {
                    naive.reset();
                }
                self.run = Some(n);
                return Ok(finished);
            }
            Command::Insert { id, priority } => {
                self.check_id(line, id)?;
                self.classic.insert(id, priority);
                if let Some(naive) = &mut self.naive {
                    naive.insert(id, priority);
                }
            }
            Command::ExtractMin => {
                self.check_run(line)?;
                self.classic.extract_min().map_err(heap_error)?;
                if let Some(naive) = &mut self.naive {
                    naive.extract_min().map_err(heap_error)?;
                }
            }
            Command::Decrease { id, priority } => {
                self.check_id(line, id)?;
                self.classic.decrease(id, priority).map_err(heap_error)?;
                if let Some(naive) = &mut self.naive {
                    naive.decrease(id, priority).map_err(heap_error)?;
                }
            }
        }
        Ok(None)
    }

    fn check_run(&self, line: usize) -> Result<usize, WorkloadError> {
        self.run.ok_or(WorkloadError::NoRun { line })
    }

    fn check_id(&self, line: usize, id: usize) -> Result<(), WorkloadError> {
        let n = self.check_run(line)?;
        if id > n {
            return Err(WorkloadError::IdOutOfRange { line, id, n });
        }
        Ok(())
    }

    /// Closes the current run, if any, and returns its statistics.
    pub fn finish(&mut self) -> Option<RunStats> {
        let n = self.run.take()?;
        let (classic_extract, classic_decrease) = self.classic.averages();
        let stats = RunStats {
            n,
            classic_extract,
            classic_decrease,
            naive: self.naive.as_ref().map(Lane::averages),
        };
        debug!("finished run: {stats}");
        Some(stats)
    }
}

/// Replays a whole script and returns the statistics of every run.
pub fn replay<R: BufRead>(
    reader: R,
    options: ReplayOptions,
) -> Result<Vec<RunStats>, WorkloadError> {
    let mut replay = Replay::new(options);
    let mut runs = Vec::new();
    for (index, text) in reader.lines().enumerate() {
        let line = index + 1;
        let text = text?;
        let Some(command) =
            Command::parse(&text).map_err(|source| WorkloadError::Malformed { line, source })?
        else {
            continue;
        };
        runs.extend(replay.apply(line, command)?);
    }
    runs.extend(replay.finish());
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("# 10"), Ok(Some(Command::StartRun { n: 10 })));
        assert_eq!(
            Command::parse("I 3 -7"),
            Ok(Some(Command::Insert { id: 3, priority: -7 }))
        );
        assert_eq!(Command::parse("M"), Ok(Some(Command::ExtractMin)));
        assert_eq!(
            Command::parse("  D  1   2 "),
            Ok(Some(Command::Decrease { id: 1, priority: 2 }))
        );
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            Command::parse("X 1"),
            Err(ParseError::UnknownCommand("X".to_owned()))
        );
        assert_eq!(Command::parse("I 1"), Err(ParseError::Missing("priority")));
        assert_eq!(
            Command::parse("I a 2"),
            Err(ParseError::Invalid {
                what: "element id",
                token: "a".to_owned()
            })
        );
        assert_eq!(
            Command::parse("M 4").unwrap_err().to_string(),
            "unexpected trailing token `4`"
        );
        // Run sizes that do not fit a usize are rejected, not wrapped.
        assert!(matches!(
            Command::parse("# 18446744073709551616"),
            Err(ParseError::Invalid { what: "run size", .. })
        ));
    }

    #[test]
    fn test_decrease_skips_extracted_elements() {
        let mut replay = Replay::new(ReplayOptions::default());
        replay.apply(1, Command::StartRun { n: 1 }).unwrap();
        replay.apply(2, Command::Insert { id: 0, priority: 5 }).unwrap();
        replay.apply(3, Command::Insert { id: 1, priority: 9 }).unwrap();
        replay.apply(4, Command::ExtractMin).unwrap();
        replay.apply(5, Command::Decrease { id: 0, priority: 1 }).unwrap();

        assert!(!replay.classic.handles.contains_key(&0));
        assert_eq!(replay.classic.heap.peek(), Some((&9, &1)));
        assert_eq!(replay.classic.heap.observer().operations(Operation::Decrease), 0);
    }

    #[test]
    fn test_new_run_resets_heaps_and_counters() {
        let mut replay = Replay::new(ReplayOptions::default());
        replay.apply(1, Command::StartRun { n: 0 }).unwrap();
        replay.apply(2, Command::Insert { id: 0, priority: 5 }).unwrap();
        let stats = replay.apply(3, Command::StartRun { n: 4 }).unwrap().unwrap();

        assert_eq!(stats.n, 0);
        assert!(replay.classic.heap.is_empty());
        assert!(replay.classic.handles.is_empty());
        assert_eq!(*replay.classic.heap.observer(), StepCounter::default());
    }

    #[test]
    fn test_stats_display() {
        let stats = RunStats {
            n: 7,
            classic_extract: 2.5,
            classic_decrease: 1.0,
            naive: Some((3.0, 1.0)),
        };
        assert_eq!(stats.to_string(), "7 2.5 1 3 1");

        let classic_only = RunStats { naive: None, ..stats };
        assert_eq!(classic_only.to_string(), "7 2.5 1");
    }
}
