/// Summary statistics over a sample of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl Summary {
    /// Collects and summarizes the sample; `None` when it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridfall_stats::Summary;
    ///
    /// let summary = Summary::new([5.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(summary.min, 1.0);
    /// assert_eq!(summary.max, 5.0);
    /// assert_eq!(summary.mean, 3.0);
    /// assert_eq!(summary.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let min = values[0];
        let max = values[values.len() - 1];
        #[expect(clippy::cast_precision_loss)]
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let median = values[values.len() / 2];
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}
