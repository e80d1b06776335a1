use crate::error::AggregateError;
use crate::types::{ResponseTime, TimeResult};
use statrs::statistics::{Data, OrderStatistics, Statistics};

const MINUTES_PER_DAY: f64 = 60.0 * 24.0;

/// Which response metric a run reports, and in what unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    /// Minutes until the first reply.
    ResponseTimes,
    /// Days until the first reply.
    FirstContactTimes,
}

impl Metric {
    pub fn title(&self) -> &'static str {
        match self {
            Metric::ResponseTimes => "Response Time Stats",
            Metric::FirstContactTimes => "First Contact Time Stats",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::ResponseTimes => "minutes",
            Metric::FirstContactTimes => "days",
        }
    }

    fn in_unit(&self, minutes: f64) -> f64 {
        match self {
            Metric::ResponseTimes => minutes,
            Metric::FirstContactTimes => minutes / MINUTES_PER_DAY,
        }
    }
}

/// The elapsed-minute observations of a run. Order carries no meaning.
#[derive(Clone, Debug, Default)]
pub struct Sample {
    minutes: Vec<f64>,
}

impl Sample {
    pub fn push(&mut self, minutes: f64) {
        self.minutes.push(minutes);
    }

    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }

    /// Summarizes the sample in `metric`'s unit.
    ///
    /// Quantiles use linear interpolation between order statistics (Hyndman
    /// and Fan's R8). An empty sample yields NaN for every statistic.
    pub fn summarize(&self, metric: Metric) -> Summary {
        let mean = self.minutes.iter().mean();
        let mut data = Data::new(self.minutes.clone());

        Summary {
            metric,
            count: self.len(),
            mean: metric.in_unit(mean),
            median: metric.in_unit(data.quantile(0.5)),
            p95: metric.in_unit(data.quantile(0.95)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub metric: Metric,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub p95: f64,
}

/// Sole owner of the sample while results stream in.
///
/// The first error-tagged result fails the whole run; nothing after it is recorded.
#[derive(Debug, Default)]
pub struct Aggregator {
    sample: Sample,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful result, or turns an error into the run's fatal error.
    ///
    /// The returned error counts the results recorded before it arrived.
    pub fn record(&mut self, result: TimeResult) -> Result<ResponseTime, AggregateError> {
        match result {
            Ok(time) => {
                self.sample.push(time.minutes);
                Ok(time)
            }
            Err(source) => Err(AggregateError {
                collected: self.sample.len(),
                source,
            }),
        }
    }

    pub fn finish(self) -> Sample {
        self.sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, PipelineError, RepositoryError};
    use pretty_assertions::assert_eq;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn sample(values: &[f64]) -> Sample {
        let mut sample = Sample::default();
        for v in values {
            sample.push(*v);
        }
        sample
    }

    fn time(minutes: f64) -> TimeResult {
        Ok(ResponseTime {
            repo: "o/r".to_string(),
            number: 1,
            author: "someone".to_string(),
            reply_author: "maintainer".to_string(),
            minutes,
        })
    }

    fn failure() -> TimeResult {
        Err(PipelineError::Issues(RepositoryError::Request {
            repo: "o/r".to_string(),
            source: ClientError::Status {
                status: 500,
                body: "boom".to_string(),
            },
        }))
    }

    #[test]
    fn test_single_observation() {
        let summary = sample(&[10.0]).summarize(Metric::ResponseTimes);

        assert_eq!(summary.count, 1);
        assert_close(summary.mean, 10.0);
        assert_close(summary.median, 10.0);
        assert_close(summary.p95, 10.0);
    }

    #[test]
    fn test_first_contact_reports_days() {
        let summary = sample(&[10.0]).summarize(Metric::FirstContactTimes);

        assert_close(summary.mean, 10.0 / 1440.0);
        assert_close(summary.median, 10.0 / 1440.0);
        assert_close(summary.p95, 10.0 / 1440.0);
    }

    #[test]
    fn test_quantiles_interpolate() {
        // Order of arrival does not matter.
        let summary = sample(&[4.0, 1.0, 3.0, 2.0]).summarize(Metric::ResponseTimes);

        assert_eq!(summary.count, 4);
        assert_close(summary.mean, 2.5);
        assert_close(summary.median, 2.5);
        assert_close(summary.p95, 4.0);
    }

    #[test]
    fn test_p95_between_order_statistics() {
        let values: Vec<f64> = (1..=20).map(f64::from).collect();
        let summary = sample(&values).summarize(Metric::ResponseTimes);

        // R8: h = (20 + 1/3) * 0.95 + 1/3 = 19.65
        assert_close(summary.median, 10.5);
        assert_close(summary.p95, 19.65);
    }

    #[test]
    fn test_empty_sample() {
        let summary = Sample::default().summarize(Metric::ResponseTimes);

        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_nan());
        assert!(summary.median.is_nan());
        assert!(summary.p95.is_nan());
    }

    #[test]
    fn test_aggregator_fails_on_first_error_and_counts_collected() {
        let mut aggregator = Aggregator::new();

        aggregator.record(time(10.0)).unwrap();
        aggregator.record(time(20.0)).unwrap();
        let err = aggregator.record(failure()).unwrap_err();

        assert_eq!(err.collected, 2);
        assert_eq!(
            err.to_string(),
            "getting repo response times: getting recent issues for o/r: server returned 500: boom (after 2 successful results)"
        );
    }

    #[test]
    fn test_aggregator_error_before_any_result() {
        let mut aggregator = Aggregator::new();

        let err = aggregator.record(failure()).unwrap_err();

        assert_eq!(err.collected, 0);
        assert!(aggregator.finish().is_empty());
    }
}
