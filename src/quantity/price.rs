quantity!(
    /// Total price per kilowatt-hour, taxes and fees included.
    KilowattHourPrice, "€/kWh"
);

impl KilowattHourPrice {
    /// Round the price to whole cents, as the host displays it.
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_abs_diff_eq!(KilowattHourPrice(0.2349).round_to_cents().0, 0.23);
        assert_abs_diff_eq!(KilowattHourPrice(0.2351).round_to_cents().0, 0.24);
    }

    #[test]
    fn test_ordering() {
        assert!(KilowattHourPrice(0.05) < KilowattHourPrice(0.10));
        assert_eq!(KilowattHourPrice(0.10).max(KilowattHourPrice(0.08)), KilowattHourPrice(0.10));
    }

    #[test]
    fn test_display_keeps_precision() {
        assert_eq!(format!("{:.2}", KilowattHourPrice(0.1234)), "0.12 €/kWh");
    }
}
