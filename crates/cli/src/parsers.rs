use std::{fmt::Display, str::FromStr};

/// Byte count with an optional binary suffix (e.g. 4096, 64K, 1MiB).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeArg(pub usize);

impl FromStr for SizeArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().replace('_', "");
        let lower = s.to_ascii_lowercase();
        let (num_str, multiplier) = parse_with_suffix(&lower);
        let num: usize = num_str
            .parse()
            .map_err(|_| format!("Invalid size number: {num_str}"))?;
        let bytes = num
            .checked_mul(multiplier)
            .ok_or_else(|| format!("Size too large: {s}"))?;
        if bytes == 0 {
            return Err("size must be greater than 0".to_string());
        }
        Ok(Self(bytes))
    }
}

fn parse_with_suffix(s: &str) -> (&str, usize) {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;
    const SUFFIXES: &[(&[&str], usize)] = &[
        (&["gib", "gb", "g"], GB),
        (&["mib", "mb", "m"], MB),
        (&["kib", "kb", "k"], KB),
    ];
    for (suffixes, multiplier) in SUFFIXES {
        for suffix in *suffixes {
            if let Some(stripped) = s.strip_suffix(suffix) {
                return (stripped.trim(), *multiplier);
            }
        }
    }
    (s, 1)
}

fn parse_bounded_number<T>(s: &str, min: T, max: Option<T>) -> Result<T, String>
where
    T: Copy + PartialOrd + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value = s
        .parse::<T>()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    if value < min {
        return Err(format!("value must be at least {min}"));
    }
    if let Some(max_bound) = max
        && value > max_bound
    {
        return Err(format!("value must be at most {max_bound}"));
    }
    Ok(value)
}

/// Parse a positive `usize` (>= 1) from CLI input.
///
/// # Errors
/// Returns an error if the input string is not a valid number or is less than 1.
pub fn parse_positive_usize(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_arg_basic() {
        let size: SizeArg = "1024".parse().unwrap();
        assert_eq!(size.0, 1024);
    }

    #[test]
    fn test_size_arg_with_suffix() {
        let size: SizeArg = "64K".parse().unwrap();
        assert_eq!(size.0, 64 * 1024);

        let size: SizeArg = "2MiB".parse().unwrap();
        assert_eq!(size.0, 2 * 1024 * 1024);
    }

    #[test]
    fn test_size_arg_rejects_zero_and_garbage() {
        assert!("0".parse::<SizeArg>().is_err());
        assert!("0K".parse::<SizeArg>().is_err());
        assert!("lots".parse::<SizeArg>().is_err());
    }

    #[test]
    fn test_parse_positive_usize() {
        assert_eq!(parse_positive_usize("8"), Ok(8));
        assert!(parse_positive_usize("0").is_err());
        assert!(parse_positive_usize("-1").is_err());
        assert!(parse_positive_usize("four").is_err());
    }
}
