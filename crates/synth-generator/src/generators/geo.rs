//! US city/state names and IPv4 addresses.

use rand::seq::SliceRandom;
use rand::Rng;
use std::net::Ipv4Addr;

const CITY_PREFIXES: &[&str] = &[
    "North", "South", "East", "West", "New", "Lake", "Port", "Fort", "Mount", "Saint",
];

const CITY_ROOTS: &[&str] = &[
    "Jackson", "Franklin", "Madison", "Clinton", "Salem", "Georgetown", "Greenville", "Fairview",
    "Springfield", "Riverside", "Oakland", "Ashland", "Milton", "Dover", "Arlington", "Marion",
    "Chester", "Burlington", "Clayton", "Hudson", "Lexington", "Newport", "Bristol", "Auburn",
];

const CITY_SUFFIXES: &[&str] = &[
    "ville", "town", "burgh", "port", "view", "haven", "side", "mouth", "land", "chester",
];

/// USPS abbreviations of the 50 states.
pub const STATE_ABBRS: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

fn pick<'a, R: Rng>(rng: &mut R, pool: &'a [&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// A plausible city name such as `"Port Madison"` or `"Clintonville"`.
pub fn city<R: Rng>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!("{} {}", pick(rng, CITY_PREFIXES), pick(rng, CITY_ROOTS)),
        1 => format!("{}{}", pick(rng, CITY_ROOTS), pick(rng, CITY_SUFFIXES)),
        _ => pick(rng, CITY_ROOTS).to_string(),
    }
}

/// A two-letter state abbreviation.
pub fn state_abbr<R: Rng>(rng: &mut R) -> String {
    pick(rng, STATE_ABBRS).to_string()
}

/// A public-looking IPv4 address in dotted notation.
pub fn ipv4<R: Rng>(rng: &mut R) -> String {
    Ipv4Addr::new(
        rng.gen_range(1..=223),
        rng.gen(),
        rng.gen(),
        rng.gen_range(1..=254),
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_state_abbr() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let state = state_abbr(&mut rng);
            assert_eq!(state.len(), 2);
            assert!(STATE_ABBRS.contains(&state.as_str()));
        }
    }

    #[test]
    fn test_ipv4_parses() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let ip = ipv4(&mut rng);
            let parsed: Ipv4Addr = ip.parse().unwrap();
            assert_ne!(parsed.octets()[0], 0);
        }
    }

    #[test]
    fn test_city_non_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert!(!city(&mut rng).is_empty());
        }
    }
}
