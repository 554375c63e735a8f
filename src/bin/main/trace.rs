use core::fmt;

use touchline_core::{CoordinateSpace, Crossing, ThresholdConfig, TouchPhase, TouchSample};

pub(super) const DEFAULT_SCREEN_WIDTH: u16 = 320;
pub(super) const DEFAULT_RAW_WIDTH: u16 = 4096;

/// Parsed replay trace.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct Trace {
    pub(super) screen_width: u16,
    pub(super) raw_width: u16,
    pub(super) threshold: Option<ThresholdConfig<i32>>,
    pub(super) steps: Vec<Step>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Step {
    /// 1-based source line.
    pub(super) line: usize,
    pub(super) input: StepInput,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum StepInput {
    Touch(TouchSample),
    Reading(i32),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum TraceErrorKind {
    UnknownDirective(String),
    MissingField(&'static str),
    InvalidNumber(String),
    UnexpectedToken(String),
    MissingThreshold,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct TraceError {
    pub(super) line: usize,
    pub(super) kind: TraceErrorKind,
}

impl TraceError {
    fn new(line: usize, kind: TraceErrorKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            TraceErrorKind::UnknownDirective(word) => write!(f, "unknown directive `{word}`"),
            TraceErrorKind::MissingField(field) => write!(f, "missing {field}"),
            TraceErrorKind::InvalidNumber(word) => write!(f, "invalid number `{word}`"),
            TraceErrorKind::UnexpectedToken(word) => write!(f, "unexpected `{word}`"),
            TraceErrorKind::MissingThreshold => {
                write!(f, "`sample` needs a `threshold` directive in the trace")
            }
        }
    }
}

type TraceResult<T> = Result<T, TraceError>;

pub(super) fn parse_trace(text: &str) -> TraceResult<Trace> {
    let mut trace = Trace {
        screen_width: DEFAULT_SCREEN_WIDTH,
        raw_width: DEFAULT_RAW_WIDTH,
        threshold: None,
        steps: Vec::new(),
    };
    let mut first_reading_line = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw_line.split('#').next().unwrap_or("");
        let mut words = content.split_whitespace();
        let Some(directive) = words.next() else {
            continue;
        };
        let mut fields = Fields { line, words };

        match directive {
            "screen" => trace.screen_width = fields.number("screen width")?,
            "calibration" => trace.raw_width = fields.number("raw width")?,
            "threshold" => {
                let lower = fields.number("lower threshold")?;
                let upper = fields.number("upper threshold")?;
                let initial = match fields.next() {
                    None | Some("lower") => Crossing::Lower,
                    Some("upper") => Crossing::Upper,
                    Some(other) => return Err(fields.unexpected(other)),
                };
                trace.threshold = Some(ThresholdConfig::new(lower, upper).with_initial(initial));
            }
            "begin" | "move" | "end" => {
                let phase = match directive {
                    "begin" => TouchPhase::Begin,
                    "move" => TouchPhase::Move,
                    _ => TouchPhase::End,
                };
                let x = fields.number("x")?;
                let y = fields.number("y")?;
                let mut sample = TouchSample::new(phase, x, y);
                while let Some(word) = fields.next() {
                    sample = match word {
                        "raw" => sample.in_space(CoordinateSpace::Raw),
                        "screen" => sample.in_space(CoordinateSpace::Screen),
                        "handled" => sample.claimed(),
                        other => return Err(fields.unexpected(other)),
                    };
                }
                trace.steps.push(Step {
                    line,
                    input: StepInput::Touch(sample),
                });
            }
            "sample" => {
                let value = fields.number("sample value")?;
                first_reading_line.get_or_insert(line);
                trace.steps.push(Step {
                    line,
                    input: StepInput::Reading(value),
                });
            }
            other => {
                return Err(TraceError::new(
                    line,
                    TraceErrorKind::UnknownDirective(other.to_owned()),
                ));
            }
        }

        fields.finish()?;
    }

    if let Some(line) = first_reading_line
        && trace.threshold.is_none()
    {
        return Err(TraceError::new(line, TraceErrorKind::MissingThreshold));
    }

    Ok(trace)
}

struct Fields<I> {
    line: usize,
    words: I,
}

impl<'a, I: Iterator<Item = &'a str>> Fields<I> {
    fn next(&mut self) -> Option<&'a str> {
        self.words.next()
    }

    fn number<T: core::str::FromStr>(&mut self, field: &'static str) -> TraceResult<T> {
        let word = self
            .next()
            .ok_or_else(|| TraceError::new(self.line, TraceErrorKind::MissingField(field)))?;
        word.parse().map_err(|_| {
            TraceError::new(self.line, TraceErrorKind::InvalidNumber(word.to_owned()))
        })
    }

    fn unexpected(&self, word: &str) -> TraceError {
        TraceError::new(self.line, TraceErrorKind::UnexpectedToken(word.to_owned()))
    }

    fn finish(mut self) -> TraceResult<()> {
        match self.next() {
            Some(word) => Err(self.unexpected(word)),
            None => Ok(()),
        }
    }
}
