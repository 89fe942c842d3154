use core::fmt;

use serde::de;

/// Deserializes a `usize` from either a native integer or its string form,
/// as environment variables only ever carry strings.
pub fn usize_from_anything<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct UsizeVisitor;

    impl de::Visitor<'_> for UsizeVisitor {
        type Value = usize;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            write!(formatter, "a positive integer or a string holding one")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            usize::try_from(v).map_err(|_| E::custom(format!("{v} is out of range")))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            usize::try_from(v).map_err(|_| E::custom(format!("{v} is out of range")))
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            v.trim()
                .parse::<usize>()
                .map_err(|_| E::custom(format!("invalid integer: {v:?}")))
        }
    }

    deserializer.deserialize_any(UsizeVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "super::usize_from_anything")]
        value: usize,
    }

    #[test]
    fn accepts_integers_and_strings() {
        let w: Wrapper = toml::from_str("value = 42").unwrap();
        assert_eq!(w.value, 42);

        let w: Wrapper = toml::from_str("value = \" 42 \"").unwrap();
        assert_eq!(w.value, 42);
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(toml::from_str::<Wrapper>("value = -1").is_err());
        assert!(toml::from_str::<Wrapper>("value = \"many\"").is_err());
    }
}
