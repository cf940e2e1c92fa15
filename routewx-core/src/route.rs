use crate::error::BriefingError;

/// Airport codes and waypoints pulled out of a free-text route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    pub airports: Vec<String>,
    pub waypoints: Vec<String>,
}

impl Route {
    /// First two airport codes, used as origin and destination.
    pub fn endpoints(&self) -> Result<(&str, &str), BriefingError> {
        match self.airports.as_slice() {
            [origin, destination, ..] => Ok((origin.as_str(), destination.as_str())),
            other => Err(BriefingError::InsufficientAirports { found: other.len() }),
        }
    }
}

/// Split a comma-separated route into airport codes (exactly 4 letters) and
/// waypoints (any other purely alphabetic token). Everything else is dropped.
pub fn extract_codes(route: &str) -> Route {
    let mut parsed = Route::default();

    for token in route.split(',') {
        let token = token.trim();
        if token.is_empty() || !token.chars().all(char::is_alphabetic) {
            continue;
        }

        // Length is judged before uppercasing; some letters expand when uppercased.
        if token.chars().count() == 4 {
            parsed.airports.push(token.to_uppercase());
        } else {
            parsed.waypoints.push(token.to_uppercase());
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_airports_and_waypoints() {
        let route = extract_codes("KJFK, BUBKO, VABB");

        assert_eq!(route.airports, vec!["KJFK", "VABB"]);
        assert_eq!(route.waypoints, vec!["BUBKO"]);
    }

    #[test]
    fn uppercases_tokens() {
        let route = extract_codes("vidp,gudum , vabb");

        assert_eq!(route.airports, vec!["VIDP", "VABB"]);
        assert_eq!(route.waypoints, vec!["GUDUM"]);
    }

    #[test]
    fn drops_empty_and_non_alphabetic_tokens() {
        let route = extract_codes("KJFK, , K1FK, N123, ABC-D, EGLL,");

        assert_eq!(route.airports, vec!["KJFK", "EGLL"]);
        assert!(route.waypoints.is_empty());
    }

    #[test]
    fn keeps_duplicates_and_order() {
        let route = extract_codes("EGLL, X, KJFK, EGLL, AB");

        assert_eq!(route.airports, vec!["EGLL", "KJFK", "EGLL"]);
        assert_eq!(route.waypoints, vec!["X", "AB"]);
    }

    #[test]
    fn short_tokens_become_waypoints() {
        let route = extract_codes("AB, CD");

        assert!(route.airports.is_empty());
        assert_eq!(route.waypoints, vec!["AB", "CD"]);
    }

    #[test]
    fn endpoints_require_two_airports() {
        let err = extract_codes("AB, CD").endpoints().unwrap_err();
        assert!(matches!(err, BriefingError::InsufficientAirports { found: 0 }));

        let err = extract_codes("KJFK, BUBKO").endpoints().unwrap_err();
        assert!(matches!(err, BriefingError::InsufficientAirports { found: 1 }));
    }

    #[test]
    fn endpoints_use_first_two_airports() {
        let route = extract_codes("VIDP, BUBKO, VABB, VOMM");

        assert_eq!(route.endpoints().unwrap(), ("VIDP", "VABB"));
    }
}
