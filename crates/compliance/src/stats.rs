//! Summary arithmetic shared by the three checks.

/// Percentage of compliant entities, rounded half-up to the nearest whole
/// number. An empty entity set counts as 0% compliant, never a division
/// error.
pub fn percentage_compliant(passing: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((passing as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_zero_percent() {
        assert_eq!(percentage_compliant(0, 0), 0);
    }

    #[test]
    fn thirds_round_half_up() {
        assert_eq!(percentage_compliant(1, 3), 33);
        assert_eq!(percentage_compliant(2, 3), 67);
    }

    #[test]
    fn full_and_no_compliance() {
        assert_eq!(percentage_compliant(5, 5), 100);
        assert_eq!(percentage_compliant(0, 5), 0);
    }

    #[test]
    fn exact_halves_round_up() {
        assert_eq!(percentage_compliant(1, 8), 13);
    }
}
