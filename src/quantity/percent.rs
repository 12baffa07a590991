quantity!(Percent, "%");

impl Percent {
    pub const fn to_proportion(self) -> f64 {
        0.01 * self.0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_to_proportion() {
        assert_abs_diff_eq!(Percent(20.0).to_proportion(), 0.2);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("12.5".parse::<Percent>().unwrap(), Percent(12.5));
        assert!("twenty".parse::<Percent>().is_err());
    }
}
