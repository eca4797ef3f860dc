use crate::core::Marker;
use std::error;
use std::fmt;

/// What to do with a line fed to the [`LineFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Copy the line to the output unchanged
    Emit,
    /// The line is inside a guard that does not hold
    Drop,
    /// The line is a guard marker and never appears in the output
    Marker,
}

/// One open guard
#[derive(Debug)]
struct Frame {
    /// Whether this guard and every enclosing guard hold
    emit: bool,
    /// Line of the opening marker, 0 for the outer context
    line: usize,
}

/// Line-by-line conditional inclusion filter.
///
/// Create one filter per file, [`feed`](LineFilter::feed) it every line in order,
/// then call [`finish`](LineFilter::finish) to make sure all guards are closed.
#[derive(Debug)]
pub struct LineFilter {
    version: i64,
    stack: Vec<Frame>,
    cur_line: usize,
}

impl LineFilter {
    pub fn new(version: i64) -> Self {
        Self {
            version,
            stack: vec![Frame {
                emit: true,
                line: 0,
            }],
            cur_line: 0,
        }
    }

    /// Number of guards currently open
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Whether ordinary lines are currently emitted
    pub fn is_emitting(&self) -> bool {
        self.stack.last().map(|f| f.emit).unwrap_or(true)
    }

    /// Classify the next line
    pub fn feed(&mut self, line: &str) -> Result<Action, FilterError> {
        self.cur_line += 1;
        match Marker::detect_from(line) {
            Marker::If(guard) => {
                let emit = guard.eval(self.version) && self.is_emitting();
                log::debug!(
                    "line {}: guard {guard:?} opened, emitting: {emit}",
                    self.cur_line
                );
                self.stack.push(Frame {
                    emit,
                    line: self.cur_line,
                });
                Ok(Action::Marker)
            }
            Marker::Endif => {
                if self.stack.len() == 1 {
                    return Err(FilterError {
                        kind: FilterErrorKind::UnbalancedEndif,
                        line: self.cur_line,
                    });
                }
                self.stack.pop();
                log::debug!("line {}: guard closed", self.cur_line);
                Ok(Action::Marker)
            }
            Marker::None => {
                if self.is_emitting() {
                    Ok(Action::Emit)
                } else {
                    Ok(Action::Drop)
                }
            }
        }
    }

    /// Check that every guard has been closed
    pub fn finish(self) -> Result<(), FilterError> {
        if self.stack.len() > 1 {
            let line = self.stack.last().map(|f| f.line).unwrap_or_default();
            return Err(FilterError {
                kind: FilterErrorKind::UnclosedEndif,
                line,
            });
        }
        Ok(())
    }
}

/// Filter a whole text. Lines keep their terminators.
pub fn filter_text(text: &str, version: i64) -> Result<String, FilterError> {
    let mut filter = LineFilter::new(version);
    let mut output = String::new();
    for line in text.split_inclusive('\n') {
        if filter.feed(line)? == Action::Emit {
            output.push_str(line);
        }
    }
    filter.finish()?;
    Ok(output)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterErrorKind {
    /// `#endif ... VERSION` without an open guard
    UnbalancedEndif,
    /// End of input with a guard still open
    UnclosedEndif,
}

/// Error from the line filter.
///
/// `line` is the 1-based line of the offending marker. For
/// [`FilterErrorKind::UnclosedEndif`] it is the innermost guard left open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterError {
    pub kind: FilterErrorKind,
    pub line: usize,
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            FilterErrorKind::UnbalancedEndif => {
                write!(f, "Unbalanced endif at line {}", self.line)
            }
            FilterErrorKind::UnclosedEndif => {
                write!(f, "Unclosed endif for guard at line {}", self.line)
            }
        }
    }
}

impl error::Error for FilterError {}
