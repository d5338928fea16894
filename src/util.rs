use crate::error::{Error, Result};

/// Checks that a numerical value is in the interval `[a,b]`
///
/// ### Example
/// ```ignore
/// let gamma = 2.0;
/// ensure_interval!(gamma, 0.0, 1.0)?;
/// ```
/// This fails with the message "invalid value for \`gamma\`: must be in the interval \[0, 1\]".
macro_rules! ensure_interval {
    ($var:expr, $a:expr, $b:expr) => {
        $crate::util::check_interval(stringify!($var), $var, $a, $b)
    };
}

pub(crate) use ensure_interval;

pub(crate) fn check_interval(name: &'static str, value: f64, a: f64, b: f64) -> Result<()> {
    if value >= a && value <= b {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field: name.rsplit('.').next().unwrap_or(name),
            reason: format!("must be in the interval [{a}, {b}]"),
        })
    }
}
