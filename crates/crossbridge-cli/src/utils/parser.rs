use crossbridge::core::models::lattice::AxisRange;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid range '{0}'. Expected 'START:STOP:STEP' (e.g., '0:20:0.1').")]
    InvalidRangeFormat(String),

    #[error("Component '{component}' of range '{range}' is not a number.")]
    NotANumber {
        component: &'static str,
        range: String,
    },
}

/// Parses `START:STOP:STEP` into a half-open range. Bounds are checked later, when the
/// grid is assembled.
pub fn parse_range(input: &str) -> Result<AxisRange, ParseError> {
    let parts: Vec<&str> = input.split(':').map(str::trim).collect();
    let [start, stop, step] = parts.as_slice() else {
        return Err(ParseError::InvalidRangeFormat(input.to_string()));
    };
    let number = |text: &str, component: &'static str| {
        text.parse::<f64>().map_err(|_| ParseError::NotANumber {
            component,
            range: input.to_string(),
        })
    };
    Ok(AxisRange::new(
        number(start, "start")?,
        number(stop, "stop")?,
        number(step, "step")?,
    ))
}
