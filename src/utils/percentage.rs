use std::{fmt::Display, ops::Deref, str::FromStr};

use anyhow::anyhow;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Percentage {
    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || value.is_nan() {
            None
        } else {
            Some(Percentage(value))
        }
    }

    pub fn zero() -> Percentage {
        Percentage(0.)
    }
}

impl FromStr for Percentage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // This means that 100%% also works, but I think I'm fine with that
        let s = s.trim_end_matches("%");
        let v = s.parse::<f64>()?;
        Percentage::new_opt(v).ok_or_else(|| anyhow!("Can't parse {s} into percentage"))
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Share of `value` in `whole`. An empty whole has no share to give, so the result is 0%.
pub fn count_percentage(value: u64, whole: u64) -> Percentage {
    if whole == 0 {
        return Percentage::zero();
    }
    Percentage(value as f64 / whole as f64 * 100.)
}

#[cfg(test)]
mod tests {
    use super::{count_percentage, Percentage};

    #[test]
    fn parses_with_and_without_sign() {
        assert_eq!("5".parse::<Percentage>().unwrap(), Percentage::new_opt(5.).unwrap());
        assert_eq!("12.5%".parse::<Percentage>().unwrap(), Percentage::new_opt(12.5).unwrap());
        assert!("-1".parse::<Percentage>().is_err());
        assert!("abc".parse::<Percentage>().is_err());
    }

    #[test]
    fn shares() {
        assert_eq!(*count_percentage(1, 4), 25.);
        assert_eq!(*count_percentage(0, 0), 0.);
        assert_eq!(*count_percentage(3, 3), 100.);
    }
}
