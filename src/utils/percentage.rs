use std::{fmt::Display, ops::Deref};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0.round())
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
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Share of `whole` that `value` represents. An empty whole counts as nothing done.
pub fn completion_percentage(value: u32, whole: u32) -> Percentage {
    if whole == 0 {
        return Percentage(0.);
    }
    Percentage::new_opt(value as f64 / whole as f64 * 100.)
        .expect("Percentage should always be at least 0")
}

#[cfg(test)]
mod tests {
    use super::{completion_percentage, Percentage};

    #[test]
    fn test_completion_percentage() {
        assert_eq!(*completion_percentage(15, 20), 75.);
        assert_eq!(*completion_percentage(0, 20), 0.);
        assert_eq!(*completion_percentage(3, 0), 0.);
    }

    #[test]
    fn test_display_rounds() {
        assert_eq!(completion_percentage(1, 3).to_string(), "33%");
        assert!(Percentage::new_opt(-1.).is_none());
    }
}
