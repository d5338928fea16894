use crate::error::{Error, Result};

/// A value that changes with the episode index, such as a learning rate or an exploration threshold
pub trait Decay {
    /// The value at episode `t`
    fn evaluate(&self, t: f64) -> f64;
}

impl<D: Decay + ?Sized> Decay for Box<D> {
    fn evaluate(&self, t: f64) -> f64 {
        (**self).evaluate(t)
    }
}

/// Where a schedule starts and the value it settles at
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    start: f64,
    end: f64,
}

impl Span {
    /// A span that `rate` moves from `start` towards `end`
    fn towards(start: f64, end: f64, rate: f64) -> Result<Self> {
        let heading_down = start > end && rate >= 0.0;
        let heading_up = start < end && rate < 0.0;
        if heading_down || heading_up {
            Ok(Self { start, end })
        } else {
            Err(Error::InvalidDecay("`start - end` must have same sign as `rate`"))
        }
    }

    /// `end` plus `fraction` of the distance back to `start`
    fn remaining(&self, fraction: f64) -> f64 {
        self.end + (self.start - self.end) * fraction
    }

    /// Limit `value` so it never passes `end`
    fn settle(&self, value: f64) -> f64 {
        if self.start > self.end {
            value.max(self.end)
        } else {
            value.min(self.end)
        }
    }
}

/// The same value at every episode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f64) -> f64 {
        self.value
    }
}

/// v(t) = end + (start - end) * e<sup>-rate * t</sup>
///
/// The default epsilon schedule for [`EpsilonGreedy`](crate::exploration::EpsilonGreedy).
#[derive(Debug, Clone, PartialEq)]
pub struct Exponential {
    span: Span,
    rate: f64,
}

impl Exponential {
    pub fn new(rate: f64, start: f64, end: f64) -> Result<Self> {
        let span = Span::towards(start, end, rate)?;
        Ok(Self { span, rate })
    }

    /// Episode after which the value has covered `1 - 1/e` of the way from start to end
    pub fn time_constant(&self) -> f64 {
        self.rate.recip()
    }
}

impl Decay for Exponential {
    fn evaluate(&self, t: f64) -> f64 {
        self.span.remaining((-self.rate * t).exp())
    }
}

/// v(t) = start - rate * t, held at `end` once reached
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    span: Span,
    rate: f64,
}

impl Linear {
    pub fn new(rate: f64, start: f64, end: f64) -> Result<Self> {
        let span = Span::towards(start, end, rate)?;
        Ok(Self { span, rate })
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: f64) -> f64 {
        self.span.settle(self.span.start - self.rate * t)
    }
}

/// v(t) = start * factor<sup>floor(t / every)</sup>, held at `end` once reached
///
/// Halving the learning rate every 500 episodes is `Step::new(0.5, alpha, min_alpha, 500.0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    span: Span,
    factor: f64,
    every: f64,
}

impl Step {
    pub fn new(factor: f64, start: f64, end: f64, every: f64) -> Result<Self> {
        if every <= 0.0 {
            return Err(Error::InvalidDecay("`every` must be positive"));
        }
        if !(factor > 0.0 && factor < 1.0) {
            return Err(Error::InvalidDecay("`factor` must be in the interval (0, 1)"));
        }
        let span = Span::towards(start, end, factor)?;
        Ok(Self {
            span,
            factor,
            every,
        })
    }
}

impl Decay for Step {
    fn evaluate(&self, t: f64) -> f64 {
        let drops = (t / self.every).floor();
        self.span.settle(self.span.start * self.factor.powf(drops))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_direction() {
        assert!(Span::towards(1.0, 0.0, 1.0).is_ok(), "decreasing with positive rate");
        assert!(Span::towards(0.0, 1.0, -1.0).is_ok(), "increasing with negative rate");
        assert!(Span::towards(-1.0, 0.0, 1.0).is_err());
        assert!(Span::towards(1.0, 0.0, -1.0).is_err());
        assert!(Span::towards(0.5, 0.5, 1.0).is_err(), "start equal to end");
    }

    #[test]
    fn constant_value() {
        let alpha = Constant::new(0.1);
        assert_eq!(alpha.evaluate(0.0), 0.1);
        assert_eq!(alpha.evaluate(1e6), 0.1);
    }

    #[test]
    fn exponential_epsilon() {
        let epsilon = Exponential::new(1e-3, 1.0, 0.01).unwrap();
        assert_eq!(epsilon.evaluate(0.0), 1.0, "starts fully exploring");
        let after_tau = epsilon.evaluate(epsilon.time_constant());
        assert!((after_tau - (0.01 + 0.99 / std::f64::consts::E)).abs() < 1e-12);
        assert!((epsilon.evaluate(1e5) - 0.01).abs() < 1e-12, "settles at end");
    }

    #[test]
    fn linear_clamps_at_end() {
        let alpha = Linear::new(0.25, 1.0, 0.5).unwrap();
        assert_eq!(alpha.evaluate(1.0), 0.75);
        assert_eq!(alpha.evaluate(2.0), 0.5);
        assert_eq!(alpha.evaluate(100.0), 0.5);

        let warmup = Linear::new(-0.25, 0.0, 0.5).unwrap();
        assert_eq!(warmup.evaluate(1.0), 0.25);
        assert_eq!(warmup.evaluate(100.0), 0.5, "increasing schedules clamp too");
    }

    #[test]
    fn step_halves_learning_rate() {
        let alpha = Step::new(0.5, 0.8, 0.1, 100.0).unwrap();
        assert_eq!(alpha.evaluate(99.0), 0.8);
        assert_eq!(alpha.evaluate(100.0), 0.4);
        assert_eq!(alpha.evaluate(250.0), 0.2);
        assert_eq!(alpha.evaluate(10_000.0), 0.1, "never below end");
    }

    #[test]
    fn step_rejects_bad_parameters() {
        assert_eq!(
            Step::new(0.5, 0.8, 0.1, 0.0),
            Err(Error::InvalidDecay("`every` must be positive"))
        );
        assert!(Step::new(1.5, 0.8, 0.1, 10.0).is_err(), "factor must shrink the value");
        assert!(Step::new(0.5, 0.1, 0.8, 10.0).is_err(), "steps only decrease");
    }

    #[test]
    fn boxed_schedule() {
        let schedule: Box<dyn Decay> = Box::new(Linear::new(0.25, 1.0, 0.5).unwrap());
        assert_eq!(schedule.evaluate(1.0), 0.75);
    }
}
