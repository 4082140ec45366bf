use chrono::Utc;

/// Issues timestamp-derived identifiers (epoch milliseconds as a string).
///
/// Two ids requested within the same millisecond would collide, so each id is
/// bumped past the last one issued.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start above every numeric id already in use
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a str>) -> Self {
        let last = existing
            .into_iter()
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Self { last }
    }

    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rapid_ids_are_unique_and_increasing() {
        let mut ids = IdGenerator::new();
        let issued: Vec<i64> = (0..100).map(|_| ids.next_id().parse().unwrap()).collect();

        assert!(issued.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_seeded_skips_existing_ids() {
        let future = (Utc::now().timestamp_millis() + 60_000).to_string();
        let mut ids = IdGenerator::seeded(["12", future.as_str(), "not-a-number"]);

        let next: i64 = ids.next_id().parse().unwrap();
        assert_eq!(next, future.parse::<i64>().unwrap() + 1);
    }
}
