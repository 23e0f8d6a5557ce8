use std::fmt;

/// Result of a best-effort side effect that must never fail its parent
/// operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    Skipped(&'static str),
    Failed(String),
}

impl<T> Outcome<T> {
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Outcome::Done(v),
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }

    pub fn done(&self) -> Option<&T> {
        match self {
            Outcome::Done(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn skipped(&self) -> Option<&'static str> {
        match self {
            Outcome::Skipped(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: Outcome<u8> = Outcome::from_result(Ok::<_, String>(3));
        assert_eq!(ok.done(), Some(&3));
        assert_eq!(ok.error(), None);

        let failed: Outcome<u8> = Outcome::from_result(Err("boom"));
        assert_eq!(failed.error(), Some("boom"));
        assert_eq!(failed.done(), None);
        assert_eq!(Outcome::<u8>::Skipped("inactive").skipped(), Some("inactive"));
    }
}
