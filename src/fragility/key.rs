//! Component-type key derivation.
//!
//! A component identifier such as `Pipe12` is mapped to the key its curve
//! family is registered under (`Pipe`). The mapping is injectable so models
//! that use another naming scheme can plug in their own rule.

/// Maps a component identifier to a curve-family key.
pub trait ComponentKey: Send + Sync {
    fn derive(&self, component: &str) -> String;
}

/// Default key rule: drop every ASCII digit, keep all other characters in order.
///
/// `Pump4 -> Pump`, `Pump12A -> PumpA`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripDigits;

impl ComponentKey for StripDigits {
    fn derive(&self, component: &str) -> String {
        component.chars().filter(|c| !c.is_ascii_digit()).collect()
    }
}

impl<F> ComponentKey for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn derive(&self, component: &str) -> String {
        self(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_digits_keeps_order_of_other_characters() {
        assert_eq!(StripDigits.derive("Pump4"), "Pump");
        assert_eq!(StripDigits.derive("Pump"), "Pump");
        assert_eq!(StripDigits.derive("Pump12A"), "PumpA");
        assert_eq!(StripDigits.derive("7"), "");
    }

    #[test]
    fn closures_act_as_key_rules() {
        let before_dash = |c: &str| c.split('-').next().unwrap_or(c).to_string();
        assert_eq!(before_dash.derive("Tank-A3"), "Tank");
    }
}
