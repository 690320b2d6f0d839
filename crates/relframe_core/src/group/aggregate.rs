use std::fmt::{self, Debug};

use relframe_error::{RelError, Result};

use crate::expr::functions::round_to;
use crate::expr::scalar::{ScalarValue, format_float, parse_float, parse_int};

/// Aggregates available on a `GroupAggregator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Count,
    Sum,
    Max,
    Min,
    Mean,
    Median,
}

impl AggregateFunction {
    pub const ALL: [AggregateFunction; 6] = [
        Self::Count,
        Self::Sum,
        Self::Max,
        Self::Min,
        Self::Mean,
        Self::Median,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Max => "max",
            Self::Min => "min",
            Self::Mean => "mean",
            Self::Median => "median",
        }
    }

    /// Name of the output column when aggregating `column`.
    pub fn output_column(&self, column: &str) -> String {
        format!("{}_{column}", self.name())
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// State for computing an aggregate over the values of a single bucket.
pub trait AggregateState: Default + Debug {
    /// Update this state with a value from the aggregated column.
    fn update(&mut self, input: &str) -> Result<()>;

    /// Produce the final value.
    ///
    /// Returns `None` if the state saw no input and the aggregate has no
    /// meaningful value for an empty bucket.
    fn finalize(self) -> Result<Option<String>>;
}

#[derive(Debug, Default)]
pub struct CountState {
    count: i64,
}

impl AggregateState for CountState {
    fn update(&mut self, _input: &str) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    fn finalize(self) -> Result<Option<String>> {
        Ok(Some(self.count.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct SumState {
    sum: i64,
}

impl AggregateState for SumState {
    fn update(&mut self, input: &str) -> Result<()> {
        let v = parse_int(input)?;
        self.sum = self
            .sum
            .checked_add(v)
            .ok_or_else(|| RelError::invalid_argument("Integer overflow in sum"))?;
        Ok(())
    }

    fn finalize(self) -> Result<Option<String>> {
        Ok(Some(self.sum.to_string()))
    }
}

/// Max or min, compared as floats and truncated to an integer on output.
///
/// Non-finite inputs are rejected. Extremes outside the `i64` range
/// saturate when truncated.
#[derive(Debug, Default)]
pub struct ExtremumState<const MAX: bool> {
    value: Option<f64>,
}

pub type MaxState = ExtremumState<true>;
pub type MinState = ExtremumState<false>;

impl<const MAX: bool> AggregateState for ExtremumState<MAX> {
    fn update(&mut self, input: &str) -> Result<()> {
        let v = parse_float(input)?;
        if !v.is_finite() {
            return Err(RelError::parse_error(input, "a finite number"));
        }
        self.value = Some(match self.value {
            Some(curr) if MAX => curr.max(v),
            Some(curr) => curr.min(v),
            None => v,
        });
        Ok(())
    }

    fn finalize(self) -> Result<Option<String>> {
        match self.value {
            Some(v) => Ok(Some(ScalarValue::Float(v).to_int()?.to_string())),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Default)]
pub struct MeanState {
    sum: i64,
    count: i64,
}

impl AggregateState for MeanState {
    fn update(&mut self, input: &str) -> Result<()> {
        let v = parse_int(input)?;
        self.sum = self
            .sum
            .checked_add(v)
            .ok_or_else(|| RelError::invalid_argument("Integer overflow in mean"))?;
        self.count += 1;
        Ok(())
    }

    fn finalize(self) -> Result<Option<String>> {
        if self.count == 0 {
            return Ok(None);
        }
        let mean = self.sum as f64 / self.count as f64;
        Ok(Some(format_float(round_to(mean, 2))))
    }
}

#[derive(Debug, Default)]
pub struct MedianState {
    values: Vec<i64>,
}

impl AggregateState for MedianState {
    fn update(&mut self, input: &str) -> Result<()> {
        self.values.push(parse_int(input)?);
        Ok(())
    }

    fn finalize(mut self) -> Result<Option<String>> {
        if self.values.is_empty() {
            return Ok(None);
        }
        self.values.sort_unstable();
        let n = self.values.len();
        let median = if n % 2 == 0 {
            let a = self.values[n / 2 - 1] as f64;
            let b = self.values[n / 2] as f64;
            format_float((a + b) / 2.0)
        } else {
            self.values[n / 2].to_string()
        };
        Ok(Some(median))
    }
}
