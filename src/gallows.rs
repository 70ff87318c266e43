const STAGES: [&str; 7] = [
    "   _______\n   |     |\n   |\n   |\n   |\n   |\n___|___",
    "   _______\n   |     |\n   |     O\n   |\n   |\n   |\n___|___",
    "   _______\n   |     |\n   |     O\n   |     |\n   |\n   |\n___|___",
    "   _______\n   |     |\n   |     O\n   |    /|\n   |\n   |\n___|___",
    "   _______\n   |     |\n   |     O\n   |    /|\\\n   |\n   |\n___|___",
    "   _______\n   |     |\n   |     O\n   |    /|\\\n   |    /\n   |\n___|___",
    "   _______\n   |     |\n   |     O\n   |    /|\\\n   |    / \\\n   |\n___|___",
];

/// Gallows drawing for the given number of remaining attempts.
///
/// Anything above six shows the empty gallows; zero shows the full figure.
#[must_use]
pub fn gallows(attempts_remaining: u32) -> &'static str {
    let shown = attempts_remaining.min(6) as usize;
    STAGES[STAGES.len() - 1 - shown]
}
