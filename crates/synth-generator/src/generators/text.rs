//! Company names and marketing copy built from word pools.

use rand::seq::SliceRandom;
use rand::Rng;

const SURNAMES: &[&str] = &[
    "Johnson", "Smith", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Anderson", "Taylor", "Thomas", "Moore", "Jackson", "White", "Harris", "Clark",
    "Lewis", "Young", "Walker", "Hall", "Allen", "King",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Group", "PLC", "Ltd", "and Sons"];

const BS_VERBS: &[&str] = &[
    "implement", "utilize", "integrate", "streamline", "optimize", "evolve", "transform",
    "embrace", "enable", "orchestrate", "leverage", "reinvent", "aggregate", "architect",
    "enhance", "incentivize", "morph", "empower", "envisioneer", "monetize",
];

const BS_ADJECTIVES: &[&str] = &[
    "clicks-and-mortar", "value-added", "vertical", "proactive", "robust", "revolutionary",
    "scalable", "leading-edge", "innovative", "intuitive", "strategic", "e-business",
    "mission-critical", "sticky", "one-to-one", "24/7", "end-to-end", "global", "B2B",
    "frictionless",
];

const BS_NOUNS: &[&str] = &[
    "synergies", "web-readiness", "paradigms", "markets", "partnerships", "infrastructures",
    "platforms", "initiatives", "channels", "eyeballs", "communities", "ROI", "solutions",
    "e-tailers", "web services", "action-items", "portals", "niches", "technologies",
    "content",
];

const CATCH_ADJECTIVES: &[&str] = &[
    "adaptive", "advanced", "ameliorated", "assimilated", "automated", "balanced",
    "business-focused", "centralized", "cloned", "compatible", "configurable", "customizable",
    "decentralized", "digitized", "distributed", "diverse", "enhanced", "ergonomic",
    "exclusive", "expanded", "extended", "face-to-face", "focused", "front-line",
    "fully-configurable", "innovative", "integrated", "intuitive", "managed", "multi-layered",
    "networked", "open-source", "optimized", "organic", "polarized", "proactive", "reactive",
    "realigned", "re-engineered", "robust", "seamless", "secured", "self-enabling", "sharable",
    "streamlined", "synergized", "total", "universal", "upgradable", "user-centric",
    "versatile", "virtual", "visionary",
];

const CATCH_DESCRIPTORS: &[&str] = &[
    "24hour", "3rdgeneration", "asymmetric", "asynchronous", "bottom-line", "context-sensitive",
    "dedicated", "didactic", "dynamic", "executive", "explicit", "fault-tolerant", "fresh-thinking",
    "full-range", "global", "heuristic", "high-level", "holistic", "hybrid", "interactive",
    "local", "logistical", "maximized", "mission-critical", "modular", "motivating",
    "multimedia", "neutral", "next generation", "non-volatile", "optimal", "real-time",
    "regional", "responsive", "scalable", "stable", "static", "systematic", "tangible",
    "transitional", "uniform", "value-added", "well-modulated", "zero-defect",
];

const CATCH_NOUNS: &[&str] = &[
    "ability", "access", "adapter", "algorithm", "alliance", "analyzer", "application",
    "approach", "architecture", "archive", "array", "attitude", "benchmark", "capability",
    "challenge", "circuit", "collaboration", "complexity", "concept", "conglomeration",
    "contingency", "core", "database", "definition", "emulation", "encoding", "encryption",
    "firmware", "flexibility", "focus group", "forecast", "framework", "function",
    "functionalities", "hardware", "help-desk", "hierarchy", "hub", "implementation",
    "infrastructure", "initiative", "installation", "interface", "leverage", "matrix",
    "methodology", "middleware", "migration", "model", "moderator", "monitoring", "paradigm",
    "policy", "portal", "product", "protocol", "service-desk", "software", "solution",
    "strategy", "success", "support", "system", "throughput", "toolset", "utilisation",
    "website", "workforce",
];

fn pick<'a, R: Rng>(rng: &mut R, pool: &'a [&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// A company name such as `"Walker, Hall and Clark"` or `"Lewis Group"`.
pub fn company<R: Rng>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!("{} {}", pick(rng, SURNAMES), pick(rng, COMPANY_SUFFIXES)),
        1 => format!("{}-{}", pick(rng, SURNAMES), pick(rng, SURNAMES)),
        _ => format!(
            "{}, {} and {}",
            pick(rng, SURNAMES),
            pick(rng, SURNAMES),
            pick(rng, SURNAMES)
        ),
    }
}

/// Business jargon such as `"streamline scalable platforms"`.
pub fn bs<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, BS_VERBS),
        pick(rng, BS_ADJECTIVES),
        pick(rng, BS_NOUNS)
    )
}

/// A title-cased catch phrase such as `"Robust Modular Framework"`.
pub fn catch_phrase<R: Rng>(rng: &mut R) -> String {
    let phrase = format!(
        "{} {} {}",
        pick(rng, CATCH_ADJECTIVES),
        pick(rng, CATCH_DESCRIPTORS),
        pick(rng, CATCH_NOUNS)
    );
    title_case(&phrase)
}

/// Uppercase the first letter of every word, including after hyphens.
fn title_case(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());
    let mut at_word_start = true;
    for ch in phrase.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch == ' ' || ch == '-';
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("robust modular framework"), "Robust Modular Framework");
        assert_eq!(title_case("face-to-face hub"), "Face-To-Face Hub");
    }

    #[test]
    fn test_values_are_non_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert!(!company(&mut rng).is_empty());
            assert_eq!(bs(&mut rng).split(' ').count(), 3);
            let phrase = catch_phrase(&mut rng);
            assert!(phrase.chars().next().unwrap().is_uppercase());
        }
    }

    #[test]
    fn test_deterministic_generation() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        assert_eq!(company(&mut rng1), company(&mut rng2));
        assert_eq!(catch_phrase(&mut rng1), catch_phrase(&mut rng2));
    }
}
