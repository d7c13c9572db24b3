use std::fmt;

/// Integer printed with `'` between groups of three digits: `-1'234'567`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NiceInt(i128);

impl NiceInt {
    pub fn from(value: impl Into<i128>) -> Self {
        Self(value.into())
    }

    pub fn from_usize(value: usize) -> Self {
        Self(value as i128)
    }
}

impl fmt::Display for NiceInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut s = String::with_capacity(digits.len() * 4 / 3 + 1);
        if self.0 < 0 {
            s.push('-');
        }
        for (i, c) in digits.chars().enumerate() {
            if i != 0 && (digits.len() - i) % 3 == 0 {
                s.push('\'');
            }
            s.push(c);
        }
        f.pad(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::NiceInt;

    #[test]
    fn test_delimiters() {
        assert_eq!(NiceInt::from(0).to_string(), "0");
        assert_eq!(NiceInt::from(999u32).to_string(), "999");
        assert_eq!(NiceInt::from(1000u32).to_string(), "1'000");
        assert_eq!(NiceInt::from_usize(1234567).to_string(), "1'234'567");
        assert_eq!(NiceInt::from(-123456i64).to_string(), "-123'456");
        assert_eq!(NiceInt::from(i64::MIN).to_string(), "-9'223'372'036'854'775'808");
    }

    #[test]
    fn test_padding() {
        assert_eq!(format!("{:>7}", NiceInt::from(1234)), "  1'234");
    }
}
