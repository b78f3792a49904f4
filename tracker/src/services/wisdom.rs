use crate::domain::Wisdom;
use rand::seq::IndexedRandom;

pub const SOURCE: &str = "Michael Saylor's 21 Rules of Bitcoin";

pub const RULES: [&str; 20] = [
    "Those who understand Bitcoin buy Bitcoin. Those who don't, criticize Bitcoin.",
    "Everyone is against Bitcoin before they are for it.",
    "You will never be done learning about Bitcoin.",
    "Bitcoin is powered by chaos.",
    "Bitcoin is the only game in the casino that we can all win.",
    "Bitcoin won't protect you if you don't wear the armor.",
    "Bitcoin is the one thing in the universe you can truly own.",
    "Everyone gets Bitcoin at the price they deserve.",
    "Only buy Bitcoin with the money you can't afford to lose.",
    "Tickets to escape the matrix are priced in Bitcoin.",
    "All your models will be destroyed.",
    "The cure to economic ill is the orange pill.",
    "Be for Bitcoin, not against fiat.",
    "Bitcoin is for everyone.",
    "Think in terms of Bitcoin.",
    "You don't change Bitcoin, it changes you.",
    "Laser eyes protect you from endo lies.",
    "Respect Bitcoin, or it will make a clown out of you.",
    "You do not sell your Bitcoin.",
    "Spread Bitcoin with love.",
];

/// Uniformly random rule from `RULES`.
pub fn wisdom() -> Wisdom {
    // RULES is a non-empty const array, so choose always returns Some
    let rule = RULES.choose(&mut rand::rng()).copied().unwrap_or(RULES[0]);
    Wisdom {
        rule,
        source: SOURCE,
    }
}
