//! Conversions into series value sequences.

/// Anything that can supply the numbers of one series.
pub trait IntoSeriesData {
    fn into_series_data(self) -> Vec<f64>;
}

impl<T: Into<f64>> IntoSeriesData for Vec<T> {
    fn into_series_data(self) -> Vec<f64> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<f64> + Copy> IntoSeriesData for &[T] {
    fn into_series_data(self) -> Vec<f64> {
        self.iter().map(|&v| v.into()).collect()
    }
}

impl<T: Into<f64> + Copy, const N: usize> IntoSeriesData for [T; N] {
    fn into_series_data(self) -> Vec<f64> {
        self.iter().map(|&v| v.into()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!([0, 1, 2].into_series_data(), vec![0.0, 1.0, 2.0]);
        assert_eq!([0.5, 2.0].into_series_data(), vec![0.5, 2.0]);
        assert_eq!(vec![1.5f32].into_series_data(), vec![1.5]);
        let counts: &[u32] = &[3, 4];
        assert_eq!(counts.into_series_data(), vec![3.0, 4.0]);
    }
}
