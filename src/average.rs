//! Averaging strategies, multidim reduction modes, and task tags.
//!
//! All three are closed enums validated at the API boundary, so an invalid
//! mode cannot reach the reduction code. String tags (for configuration
//! files and CLIs) go through `FromStr`, which is where an unrecognized tag
//! turns into an [`InvalidArgument`](crate::MetricError::InvalidArgument)
//! error.

use std::fmt;
use std::str::FromStr;

use crate::error::MetricError;

/// Averaging strategy applied over classes/labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Average {
    /// Single positive-class statistic (binary tasks only)
    Binary,
    /// Sum statistics over all classes before scoring
    Micro,
    /// Score each class, return the unweighted mean over non-empty classes
    Macro,
    /// Score each class, weight the mean by support (tp + fn)
    Weighted,
    /// Score each class, apply no reduction
    None,
}

/// How dimensions beyond the ones a task consumes are reduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MultidimAverage {
    /// Extra dimensions are flattened into the batch dimension
    Global,
    /// Statistics are computed independently for each sample on the first axis
    Samplewise,
}

/// Classification task kind, used by the dispatching entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    /// Two classes, predictions are a single positive-class score per entry
    Binary,
    /// Mutually exclusive classes, predictions are class ids or per-class scores
    Multiclass,
    /// Independent binary labels, predictions are per-label scores
    Multilabel,
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Average::Binary => "binary",
            Average::Micro => "micro",
            Average::Macro => "macro",
            Average::Weighted => "weighted",
            Average::None => "none",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Average {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(Average::Binary),
            "micro" => Ok(Average::Micro),
            "macro" => Ok(Average::Macro),
            "weighted" => Ok(Average::Weighted),
            "none" => Ok(Average::None),
            other => Err(MetricError::InvalidArgument(format!(
                "unknown average `{other}`, expected one of binary, micro, macro, weighted, none"
            ))),
        }
    }
}

impl fmt::Display for MultidimAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MultidimAverage::Global => "global",
            MultidimAverage::Samplewise => "samplewise",
        };
        write!(f, "{name}")
    }
}

impl FromStr for MultidimAverage {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(MultidimAverage::Global),
            "samplewise" => Ok(MultidimAverage::Samplewise),
            other => Err(MetricError::InvalidArgument(format!(
                "unknown multidim average `{other}`, expected global or samplewise"
            ))),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Task::Binary => "binary",
            Task::Multiclass => "multiclass",
            Task::Multilabel => "multilabel",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Task {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(Task::Binary),
            "multiclass" => Ok(Task::Multiclass),
            "multilabel" => Ok(Task::Multilabel),
            other => Err(MetricError::InvalidArgument(format!(
                "unknown task `{other}`, expected one of binary, multiclass, multilabel"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_parsing() {
        assert!(matches!("micro".parse::<Average>(), Ok(Average::Micro)));
        assert!(matches!("none".parse::<Average>(), Ok(Average::None)));
        assert!("Micro".parse::<Average>().is_err());
        assert!("samples".parse::<Average>().is_err());
    }

    #[test]
    fn test_task_parsing() {
        assert!(matches!("binary".parse::<Task>(), Ok(Task::Binary)));
        assert!(matches!(
            "multilabel".parse::<Task>(),
            Ok(Task::Multilabel)
        ));
        let err = "regression".parse::<Task>().unwrap_err();
        assert!(err.to_string().contains("unknown task"));
    }

    #[test]
    fn test_display_round_trips() {
        for avg in [
            Average::Binary,
            Average::Micro,
            Average::Macro,
            Average::Weighted,
            Average::None,
        ] {
            assert_eq!(avg.to_string().parse::<Average>().unwrap(), avg);
        }
        for mda in [MultidimAverage::Global, MultidimAverage::Samplewise] {
            assert_eq!(mda.to_string().parse::<MultidimAverage>().unwrap(), mda);
        }
        for task in [Task::Binary, Task::Multiclass, Task::Multilabel] {
            assert_eq!(task.to_string().parse::<Task>().unwrap(), task);
        }
    }
}
