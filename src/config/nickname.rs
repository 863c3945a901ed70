//! Default nickname generator.
//!
//! Produces names like `wren042`: a short bird name and three digits, which
//! stays within the 9-character nickname limit many networks still enforce.

use rand::RngExt;

const BIRDS: &[&str] = &[
    "tern", "gull", "wren", "kite", "lark", "rook", "swift", "heron", "finch", "crane", "robin",
    "egret", "stork", "raven", "owl", "jay",
];

/// Generate a random nickname like `tern417`.
pub fn generate_nickname() -> String {
    let mut rng = rand::rng();
    let bird = BIRDS[rng.random_range(0..BIRDS.len())];
    let num: u16 = rng.random_range(0..1000);
    format!("{}{:03}", bird, num)
}
